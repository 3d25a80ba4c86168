//! University course timetabling by genetic algorithm.
//!
//! Assigns every activity a room, a time slot, and a facilitator, searching
//! for the assignment that scores best under a fixed set of soft rules
//! (room conflicts, room size, facilitator preference and load, section
//! spacing, linked-course timing, building proximity).
//!
//! - [`catalog`]: The read-only problem dataset and its global rules,
//!   including the built-in university preset.
//! - [`ga`]: Chromosomes, the fitness evaluator, mate selection, the
//!   population lifecycle, and a convergence-driven runner.
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::Catalog;
//! use u_timetable::ga::{TimetableConfig, TimetableRunner};
//!
//! let catalog = Catalog::university_preset();
//! let config = TimetableConfig::fast()
//!     .with_min_generations(5)
//!     .with_max_generations(5)
//!     .with_seed(7);
//!
//! let result = TimetableRunner::run(&catalog, &config).unwrap();
//! println!("{}", result.best.display(&catalog));
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod random;

pub use error::{Result, TimetableError};
