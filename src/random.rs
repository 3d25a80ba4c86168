//! Seedable random source.
//!
//! Every [`Population`](crate::ga::Population) owns its own generator, so
//! runs are reproducible from a seed and no generator state is shared
//! between populations or threads.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Random generator type used throughout the crate.
///
/// `SmallRng` is fast and non-blocking; it is not cryptographically secure,
/// which the search does not need.
pub type TimetableRng = SmallRng;

/// Creates a generator from a fixed seed.
pub fn create_rng(seed: u64) -> TimetableRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> TimetableRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..32 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = create_rng(1);
        let mut b = create_rng(2);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }
}
