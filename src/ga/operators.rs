//! Generic genetic operators.
//!
//! These work on plain slices and indices and know nothing about the
//! timetabling domain; [`Individual`](super::Individual) and
//! [`Gene`](super::Gene) build on them.
//!
//! # Crossover
//!
//! - [`single_point_crossover`]: one split point, two complementary children
//!
//! # Mutation support
//!
//! - [`resample_other`]: uniform draw from a table, excluding the current entry
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use rand::Rng;

/// Single-point crossover.
///
/// Draws a split point `k` uniformly from `1..n-1` and returns
/// `(p1[..k] ++ p2[k..], p2[..k] ++ p1[k..])`. Children are built from
/// clones, so they share nothing with the parents.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths or fewer than 3 elements.
pub fn single_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 3, "crossover needs at least 3 genes, got {n}");

    let point = rng.random_range(1..n - 1);
    split_at_point(parent1, parent2, point)
}

/// Builds both children for a fixed split point.
pub(crate) fn split_at_point<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    point: usize,
) -> (Vec<T>, Vec<T>) {
    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..point]);
    child1.extend_from_slice(&parent2[point..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..point]);
    child2.extend_from_slice(&parent1[point..]);

    (child1, child2)
}

/// Draws an index in `0..len` that differs from `current`, uniformly.
///
/// Equivalent in distribution to redrawing until the value changes, but
/// takes exactly one draw.
///
/// # Panics
/// Panics in debug builds if `len < 2` or `current >= len`.
#[inline]
pub fn resample_other<R: Rng>(current: usize, len: usize, rng: &mut R) -> usize {
    debug_assert!(len >= 2, "resampling needs at least 2 entries");
    debug_assert!(current < len, "current index {current} out of range {len}");
    let drawn = rng.random_range(0..len - 1);
    if drawn >= current {
        drawn + 1
    } else {
        drawn
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_split_at_point() {
        let p1 = vec![1, 2, 3, 4, 5];
        let p2 = vec![10, 20, 30, 40, 50];
        let (c1, c2) = split_at_point(&p1, &p2, 2);
        assert_eq!(c1, vec![1, 2, 30, 40, 50]);
        assert_eq!(c2, vec![10, 20, 3, 4, 5]);
    }

    #[test]
    fn test_crossover_point_range() {
        let mut rng = create_rng(42);
        let p1 = vec![0u8; 6];
        let p2 = vec![1u8; 6];
        for _ in 0..500 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
            // Child 1 always starts with parent 1 and ends with parent 2.
            assert_eq!(c1[0], 0);
            assert_eq!(c1[5], 1);
            assert_eq!(c2[0], 1);
            assert_eq!(c2[5], 0);
            let point = c1.iter().position(|&v| v == 1).unwrap();
            assert!((1..5).contains(&point), "split point {point} out of range");
        }
    }

    #[test]
    fn test_crossover_minimum_length() {
        let mut rng = create_rng(42);
        let (c1, c2) = single_point_crossover(&[1, 2, 3], &[4, 5, 6], &mut rng);
        assert_eq!(c1, vec![1, 5, 6]);
        assert_eq!(c2, vec![4, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "crossover needs at least 3 genes")]
    fn test_crossover_too_short_panics() {
        let mut rng = create_rng(42);
        single_point_crossover(&[1, 2], &[3, 4], &mut rng);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_crossover_length_mismatch_panics() {
        let mut rng = create_rng(42);
        single_point_crossover(&[1, 2, 3], &[3, 4, 5, 6], &mut rng);
    }

    #[test]
    fn test_resample_other_never_returns_current() {
        let mut rng = create_rng(7);
        for current in 0..9 {
            for _ in 0..1000 {
                let next = resample_other(current, 9, &mut rng);
                assert_ne!(next, current);
                assert!(next < 9);
            }
        }
    }

    #[test]
    fn test_resample_other_covers_all_others() {
        let mut rng = create_rng(3);
        let mut seen = [0u32; 5];
        for _ in 0..5000 {
            seen[resample_other(2, 5, &mut rng)] += 1;
        }
        assert_eq!(seen[2], 0);
        for (i, &count) in seen.iter().enumerate() {
            if i != 2 {
                assert!(count > 1000, "index {i} under-sampled: {seen:?}");
            }
        }
    }

    #[test]
    fn test_resample_two_entries_flips() {
        let mut rng = create_rng(11);
        assert_eq!(resample_other(0, 2, &mut rng), 1);
        assert_eq!(resample_other(1, 2, &mut rng), 0);
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_length_and_positions(
            len in 3usize..40,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let p1: Vec<(u8, usize)> = (0..len).map(|i| (1, i)).collect();
            let p2: Vec<(u8, usize)> = (0..len).map(|i| (2, i)).collect();
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng);
            prop_assert_eq!(c1.len(), len);
            prop_assert_eq!(c2.len(), len);
            for i in 0..len {
                // Every locus keeps its position and the two children are complementary.
                prop_assert_eq!(c1[i].1, i);
                prop_assert_eq!(c2[i].1, i);
                prop_assert_ne!(c1[i].0, c2[i].0);
            }
        }
    }
}
