//! Generational driver loop.
//!
//! [`TimetableRunner`] wraps a [`Population`] and decides when to stop:
//! at least `min_generations` are always executed, after which the run
//! continues only while the mean fitness keeps improving by more than
//! `improvement_threshold` (relative), up to `max_generations`.

use super::config::TimetableConfig;
use super::individual::Individual;
use super::population::Population;
use crate::catalog::Catalog;
use crate::error::{Result, TimetableError};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Mean fitness stopped improving after the minimum generations.
    Converged,
    /// `max_generations` was reached.
    MaxGenerations,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of a [`TimetableRunner`] run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Best schedule of the final generation.
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    /// Best fitness after the initial ranking and after each generation.
    pub best_history: Vec<f64>,

    /// Mean fitness after the initial ranking and after each generation.
    pub mean_history: Vec<f64>,

    pub stop_reason: StopReason,
}

/// Executes the generational loop.
///
/// # Usage
///
/// ```
/// use u_timetable::catalog::Catalog;
/// use u_timetable::ga::{StopReason, TimetableConfig, TimetableRunner};
///
/// let catalog = Catalog::university_preset();
/// let config = TimetableConfig::fast()
///     .with_population_size(20)
///     .with_min_generations(5)
///     .with_max_generations(10)
///     .with_seed(42);
///
/// let result = TimetableRunner::run(&catalog, &config).unwrap();
/// assert!(result.generations >= 5 && result.generations <= 10);
/// assert_ne!(result.stop_reason, StopReason::Cancelled);
/// ```
pub struct TimetableRunner;

impl TimetableRunner {
    /// Runs the search to completion.
    pub fn run(catalog: &Catalog, config: &TimetableConfig) -> Result<RunResult> {
        Self::run_with_cancel(catalog, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The flag is checked before each generation; once it is set the run
    /// returns the best schedule found so far.
    pub fn run_with_cancel(
        catalog: &Catalog,
        config: &TimetableConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult> {
        let mut population = Population::new(catalog, config.clone())?;
        population.rank();

        let mut best_history = Vec::with_capacity(config.min_generations + 1);
        let mut mean_history = Vec::with_capacity(config.min_generations + 1);
        record(&population, &mut best_history, &mut mean_history)?;

        info!(
            "timetable search started: population {}, generations {}..={}",
            config.population_size, config.min_generations, config.max_generations
        );

        let stop_reason = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break StopReason::Cancelled;
                }
            }
            if population.generation() >= config.max_generations {
                break StopReason::MaxGenerations;
            }

            let previous_mean = population.mean_fitness().unwrap_or(f64::NEG_INFINITY);
            population.run_generation();
            let (_, mean) = record(&population, &mut best_history, &mut mean_history)?;

            if population.generation() >= config.min_generations
                && population.generation() < config.max_generations
                && !improved(previous_mean, mean, config.improvement_threshold)
            {
                break StopReason::Converged;
            }
        };

        let best = population
            .best()
            .cloned()
            .ok_or_else(|| TimetableError::InvalidConfig("population is empty".into()))?;
        let best_fitness = best.fitness().unwrap_or(f64::NEG_INFINITY);

        info!(
            "timetable search stopped after {} generations ({:?}): best {:.3}",
            population.generation(),
            stop_reason,
            best_fitness
        );

        Ok(RunResult {
            best,
            best_fitness,
            generations: population.generation(),
            best_history,
            mean_history,
            stop_reason,
        })
    }
}

/// Whether `current` beats `previous` by more than `threshold * |previous|`.
fn improved(previous: f64, current: f64, threshold: f64) -> bool {
    current - previous > threshold * previous.abs()
}

fn record(
    population: &Population<'_>,
    best_history: &mut Vec<f64>,
    mean_history: &mut Vec<f64>,
) -> Result<(f64, f64)> {
    let (best, mean) = population
        .best_fitness()
        .zip(population.mean_fitness())
        .ok_or_else(|| TimetableError::InvalidConfig("population is not ranked".into()))?;
    best_history.push(best);
    mean_history.push(mean);
    Ok((best, mean))
}

// ============================================================================
// Tests
// ============================================================================
