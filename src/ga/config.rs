//! Search configuration.
//!
//! [`TimetableConfig`] holds every parameter that controls the population
//! and the optional [`TimetableRunner`](super::TimetableRunner) loop.

use crate::error::{Result, TimetableError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the timetabling GA.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::TimetableConfig;
///
/// let config = TimetableConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.min_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::TimetableConfig;
///
/// let config = TimetableConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.02)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimetableConfig {
    /// Target number of individuals.
    ///
    /// Each generation keeps the better half and breeds back up to this size.
    pub population_size: usize,

    /// Per-field mutation probability (0.0–1.0).
    ///
    /// Each gene's room, facilitator, and time slot are resampled
    /// independently with this probability.
    pub mutation_rate: f64,

    /// Generations the runner always executes.
    pub min_generations: usize,

    /// Hard cap on generations for the runner.
    pub max_generations: usize,

    /// Relative mean-fitness gain required to keep running past
    /// `min_generations`.
    ///
    /// The runner continues while
    /// `mean_now - mean_before > improvement_threshold * |mean_before|`.
    pub improvement_threshold: f64,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Ignored when the `parallel` feature is disabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.01,
            min_generations: 100,
            max_generations: 1000,
            improvement_threshold: 0.01,
            parallel: true,
            seed: None,
        }
    }
}

impl TimetableConfig {
    /// Sets the target population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the per-field mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the minimum number of generations.
    pub fn with_min_generations(mut self, n: usize) -> Self {
        self.min_generations = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the relative improvement threshold.
    pub fn with_improvement_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = threshold.max(0.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick experiments: population 50, 20–200 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            min_generations: 20,
            max_generations: 200,
            ..Self::default()
        }
    }

    /// Preset for thorough searches: population 300, 200–3000 generations.
    pub fn quality() -> Self {
        Self {
            population_size: 300,
            min_generations: 200,
            max_generations: 3000,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 4 {
            return Err(TimetableError::InvalidConfig(
                "population_size must be at least 4 so two parents survive culling".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TimetableError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(TimetableError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.max_generations < self.min_generations {
            return Err(TimetableError::InvalidConfig(
                "max_generations must not be below min_generations".into(),
            ));
        }
        if self.improvement_threshold.is_nan() || self.improvement_threshold < 0.0 {
            return Err(TimetableError::InvalidConfig(
                "improvement_threshold must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimetableConfig::default();
        assert_eq!(config.population_size, 100);
        assert!((config.mutation_rate - 0.01).abs() < 1e-15);
        assert_eq!(config.min_generations, 100);
        assert_eq!(config.max_generations, 1000);
        assert!((config.improvement_threshold - 0.01).abs() < 1e-15);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TimetableConfig::default()
            .with_population_size(40)
            .with_mutation_rate(0.05)
            .with_min_generations(5)
            .with_max_generations(50)
            .with_improvement_threshold(0.02)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 40);
        assert!((config.mutation_rate - 0.05).abs() < 1e-15);
        assert_eq!(config.min_generations, 5);
        assert_eq!(config.max_generations, 50);
        assert!((config.improvement_threshold - 0.02).abs() < 1e-15);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(TimetableConfig::default().validate().is_ok());
        assert!(TimetableConfig::fast().validate().is_ok());
        assert!(TimetableConfig::quality().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = TimetableConfig::default().with_population_size(3);
        assert!(matches!(
            config.validate(),
            Err(TimetableError::InvalidConfig(_))
        ));
        assert!(TimetableConfig::default()
            .with_population_size(4)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_generation_bounds() {
        let config = TimetableConfig::default()
            .with_min_generations(10)
            .with_max_generations(5);
        assert!(config.validate().is_err());

        let config = TimetableConfig::default()
            .with_min_generations(0)
            .with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_raw_fields() {
        let config = TimetableConfig {
            mutation_rate: 1.5,
            ..TimetableConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TimetableConfig {
            improvement_threshold: f64::NAN,
            ..TimetableConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_rates() {
        let config = TimetableConfig::default()
            .with_mutation_rate(2.0)
            .with_improvement_threshold(-1.0);
        assert!((config.mutation_rate - 1.0).abs() < 1e-15);
        assert!((config.improvement_threshold - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_preset_chainable() {
        let config = TimetableConfig::fast().with_population_size(60).with_seed(7);
        assert_eq!(config.population_size, 60);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_generations, 200);
    }
}
