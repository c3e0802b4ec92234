use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use metatac::{
    build_strategy, load_config_from_json, rng_for_state, Difficulty, EngineConfig, GlobalBoard,
    Move, Outcome, Player, Strategy,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeatOpt {
    Human,
    Easy,
    Medium,
    Hard,
}

impl SeatOpt {
    fn difficulty(self) -> Option<Difficulty> {
        match self {
            SeatOpt::Human => None,
            SeatOpt::Easy => Some(Difficulty::Easy),
            SeatOpt::Medium => Some(Difficulty::Medium),
            SeatOpt::Hard => Some(Difficulty::Hard),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "play", about = "Play Ultimate Tic-Tac-Toe in the terminal")]
struct Args {
    /// Who plays X
    #[arg(long, value_enum, default_value_t = SeatOpt::Human)]
    x: SeatOpt,

    /// Who plays O
    #[arg(long, value_enum, default_value_t = SeatOpt::Hard)]
    o: SeatOpt,

    /// Seed for the randomized tier
    #[arg(long, default_value_t = 0x00C0_FFEE_u64)]
    seed: u64,

    /// Engine config JSON (search depths, error rate)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

enum Seat {
    Human,
    Engine(Box<dyn Strategy>),
}

/// Prompt until the human enters a legal move. Ok(None) on end of input.
fn read_human_move(
    board: &GlobalBoard,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Move>> {
    let mut line = String::new();
    loop {
        write!(
            out,
            "{} move (sub_row sub_col cell_row cell_col): ",
            board.current_player()
        )?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line).context("reading stdin")? == 0 {
            return Ok(None);
        }
        let mv = match line.parse::<Move>() {
            Ok(mv) => mv,
            Err(e) => {
                writeln!(out, "Invalid input: {e}")?;
                continue;
            }
        };
        match metatac::engine::apply::validate_move(board, mv) {
            Ok(_) => return Ok(Some(mv)),
            Err(e) => writeln!(out, "Illegal move: {e}")?,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match &args.config {
        Some(path) => load_config_from_json(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let seat = |opt: SeatOpt, player: Player, side: u8| match opt.difficulty() {
        None => Seat::Human,
        Some(d) => Seat::Engine(build_strategy(
            d,
            player,
            &config,
            rng_for_state(args.seed, 0, side),
        )),
    };
    let mut seats = [seat(args.x, Player::X, 0), seat(args.o, Player::O, 1)];
    info!(x = ?args.x, o = ?args.o, seed = args.seed, "new game");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut board = GlobalBoard::new();
    while !board.is_terminal() {
        writeln!(out, "{board}\n")?;
        let mover = board.current_player();
        let mv = match &mut seats[mover as usize] {
            Seat::Human => match read_human_move(&board, &mut input, &mut out)? {
                Some(mv) => mv,
                None => {
                    writeln!(out, "\nInput closed, game abandoned.")?;
                    return Ok(());
                }
            },
            Seat::Engine(strategy) => {
                let mv = strategy
                    .select_move(&board)
                    .context("engine found no move on a live board")?;
                let stats = strategy.last_stats();
                debug!(strategy = strategy.name(), %mv, nodes = stats.nodes, "engine move");
                writeln!(out, "{mover} ({}) plays {mv}", strategy.name())?;
                mv
            }
        };
        board
            .apply_move(mv)
            .with_context(|| format!("applying {mv}"))?;
    }

    writeln!(out, "{board}\n")?;
    match board.outcome() {
        Outcome::Won(p) => writeln!(out, "{p} wins!")?,
        Outcome::Draw => writeln!(out, "Draw.")?,
        Outcome::InProgress => {}
    }
    Ok(())
}
