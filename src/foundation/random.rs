use rand::SeedableRng;
use rand::rngs::StdRng;

/// Deterministic RNG for reproducible random sequences.
///
/// Every random constructor in the crate takes `&mut impl Rng`; seeding through this helper
/// makes a run repeatable from the logged seed alone.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
