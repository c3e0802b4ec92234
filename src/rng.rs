use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG factory for a given (seed, game_id, turn) triple.
///
/// - Derives a per-stream 64-bit seed by mixing the three inputs.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible sequences.
/// - `turn` doubles as a side selector when one generator per player is needed.
#[inline]
pub fn rng_for_state(seed: u64, game_id: u64, turn: u8) -> Pcg64 {
    let derived: u64 = seed
        ^ game_id.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ u64::from(turn).rotate_left(32);
    Pcg64::seed_from_u64(derived)
}

/// Generator seeded directly from a single value.
#[inline]
pub fn seeded(seed: u64) -> Pcg64 {
    Pcg64::seed_from_u64(seed)
}
