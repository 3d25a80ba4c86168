//! Mate selection.
//!
//! Fitness values are turned into weights with [`softmax`]; a [`Picker`]
//! then scans the ranked population and accepts each candidate with
//! probability equal to its weight.
//!
//! The weights act as independent per-individual acceptance thresholds,
//! not as a cumulative distribution. With many individuals every weight is
//! small and a scan can run off the end, in which case the caller's
//! fallback index is returned.
//!
//! # References
//!
//! - Bridle (1990), "Probabilistic Interpretation of Feedforward
//!   Classification Network Outputs"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

/// Softmax of `values`: `exp(v_i) / Σ exp(v_j)`.
///
/// The maximum is subtracted before exponentiation; the result is the same
/// but large fitness values cannot overflow. Returns an empty vector for
/// empty input.
///
/// ```
/// use u_timetable::ga::softmax;
///
/// let p = softmax(&[2.0, 1.0, 0.0]);
/// assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// assert!(p[0] > p[1] && p[1] > p[2]);
/// ```
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return vec![1.0 / values.len() as f64; values.len()];
    }
    let exps: Vec<f64> = values.iter().map(|&v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Roulette-style scanner over a fixed weight vector.
///
/// Each [`pick`](Picker::pick) resumes scanning just past the previously
/// returned index, so a later pick in the same mating round cannot accept
/// it again. Call [`reset`](Picker::reset) before each round.
#[derive(Debug, Clone)]
pub struct Picker<'a> {
    weights: &'a [f64],
    cursor: usize,
}

impl<'a> Picker<'a> {
    pub fn new(weights: &'a [f64]) -> Self {
        Self { weights, cursor: 0 }
    }

    /// Picks an index.
    ///
    /// Scans from the cursor; index `i` is accepted when a fresh uniform draw
    /// in `[0, 1)` is at most `weights[i]`. The cursor then moves past `i`.
    /// If no index is accepted, returns `fallback` and moves the cursor past
    /// it as well.
    pub fn pick<R: Rng>(&mut self, fallback: usize, rng: &mut R) -> usize {
        for i in self.cursor..self.weights.len() {
            if rng.random::<f64>() <= self.weights[i] {
                self.cursor = i + 1;
                return i;
            }
        }
        self.cursor = self.cursor.max(fallback + 1);
        fallback
    }

    /// Moves the cursor back to the first index.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Current scan start.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Draws two parent indices for one mating round.
///
/// Resets the picker, picks with fallback 0, then picks with fallback 1
/// (or 0 if the first parent was 1). The two indices always differ when
/// there are at least two weights.
pub fn pick_parents<R: Rng>(picker: &mut Picker<'_>, rng: &mut R) -> (usize, usize) {
    picker.reset();
    let first = picker.pick(0, rng);
    let second_fallback = if first == 1 { 0 } else { 1 };
    let second = picker.pick(second_fallback, rng);
    (first, second)
}
