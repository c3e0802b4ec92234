use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use metatac::arena::{pair_count, round_robin_with};
use metatac::{load_config_from_json, Difficulty, DuelReport, EngineConfig};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerOpt {
    Easy,
    Medium,
    Hard,
}

impl From<PlayerOpt> for Difficulty {
    fn from(p: PlayerOpt) -> Self {
        match p {
            PlayerOpt::Easy => Difficulty::Easy,
            PlayerOpt::Medium => Difficulty::Medium,
            PlayerOpt::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tournament", about = "Round-robin tournament between the engine's difficulty tiers")]
struct Args {
    /// Games per duel; colours alternate every game
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Participants as a comma-separated list
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [PlayerOpt::Easy, PlayerOpt::Medium, PlayerOpt::Hard])]
    players: Vec<PlayerOpt>,

    /// Base seed for the randomized tier (deterministic)
    #[arg(long, default_value_t = 0x00C0_FFEE_u64)]
    seed: u64,

    /// Engine config JSON (search depths, error rate)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the reports as JSON on stdout instead of a table
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_report(r: &DuelReport) {
    let a = r.first.difficulty;
    let b = r.second.difficulty;
    println!("Match: {a} vs {b}");
    println!("Results:");
    println!("  {a} wins: {} ({:.1}%)", r.first.wins, r.rate(r.first.wins));
    println!("  {b} wins: {} ({:.1}%)", r.second.wins, r.rate(r.second.wins));
    println!("  draws: {} ({:.1}%)", r.draws, r.rate(r.draws));
    println!("Performance:");
    println!("  total time: {:.2}s", r.elapsed_secs);
    println!("  average per game: {:.4}s", r.avg_secs_per_game());
    println!("  {a} score total: {}", r.first.tally.score_total);
    println!("  {b} score total: {}", r.second.tally.score_total);
    println!("  {a} average score per move: {:.2}", r.first.avg_score_per_move());
    println!("  {b} average score per move: {:.2}", r.second.avg_score_per_move());
    println!("  {a} nodes: {}", r.first.tally.nodes);
    println!("  {b} nodes: {}", r.second.tally.nodes);
    println!();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match &args.config {
        Some(path) => load_config_from_json(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let players: Vec<Difficulty> = args.players.iter().copied().map(Difficulty::from).collect();
    if players.len() < 2 {
        anyhow::bail!("a tournament needs at least two players");
    }
    info!(games = args.games, seed = args.seed, ?players, "starting tournament");

    let total = pair_count(players.len()) as u64 * u64::from(args.games);
    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} games")
                .context("progress template")?,
        );
        pb
    };

    let reports = round_robin_with(&players, args.games, args.seed, &config, |_| pb.inc(1));
    pb.finish_and_clear();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("serializing reports")?
        );
    } else {
        println!("=== Tournament: {} games per duel ===\n", args.games);
        for r in &reports {
            print_report(r);
        }
    }
    Ok(())
}
