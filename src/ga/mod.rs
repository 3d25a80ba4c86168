//! Genetic-algorithm search over course timetables.
//!
//! A candidate schedule is an [`Individual`]: one [`Gene`] per catalog
//! activity, each assigning a room, a time slot, and a facilitator.
//! A [`Population`] of individuals is ranked by [`FitnessEvaluator`],
//! culled to its better half, and refilled by softmax-weighted mating
//! (single-point crossover plus per-field mutation).
//!
//! # Key Types
//!
//! - [`TimetableConfig`]: Population and loop parameters, with presets
//! - [`Population`]: One generation at a time, under caller control
//! - [`TimetableRunner`]: Runs generations until convergence
//! - [`FitnessBreakdown`]: Score split into its rule groups
//!
//! # Submodules
//!
//! - [`operators`]: Generic crossover and resampling helpers
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod config;
mod fitness;
mod gene;
mod individual;
pub mod operators;
mod population;
mod runner;
mod selection;

pub use config::TimetableConfig;
pub use fitness::{capacity_score, FitnessBreakdown, FitnessEvaluator};
pub use gene::Gene;
pub use individual::{Individual, ScheduleDisplay};
pub use population::Population;
pub use runner::{RunResult, StopReason, TimetableRunner};
pub use selection::{pick_parents, softmax, Picker};
