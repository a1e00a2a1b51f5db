use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::types::Seat;

/// Deterministic RNG factory for a given (seed, seat, shuffle epoch) triple.
///
/// - Derives a per-shuffle 64-bit seed by mixing the inputs through one
///   splitmix64 round so adjacent epochs do not produce correlated streams.
/// - Uses PCG 64-bit (rand_pcg::Pcg64) for reproducible sequences.
/// - Equal inputs yield identical shuffles across runs; this is what makes
///   move-log replay reconstruct the exact game.
#[inline]
pub fn rng_for_shuffle(seed: u64, seat: Seat, epoch: u32) -> Pcg64 {
    let mixed = seed ^ ((seat.index() as u64) << 32) ^ (epoch as u64);
    Pcg64::seed_from_u64(splitmix64(mixed))
}

#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
