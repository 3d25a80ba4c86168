//! Error types.
//!
//! Errors only arise while building a [`Catalog`](crate::catalog::Catalog)
//! or a [`Population`](crate::ga::Population). Once construction succeeds,
//! fitness evaluation, selection, crossover, and mutation are infallible.

use thiserror::Error;

/// Errors raised while constructing the timetabling domain or engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// An activity name is not present in the catalog.
    #[error("unknown activity: '{0}'")]
    UnknownActivity(String),

    /// A room name is not present in the catalog.
    #[error("unknown room: '{0}'")]
    UnknownRoom(String),

    /// A facilitator name is not present in the catalog.
    #[error("unknown facilitator: '{0}'")]
    UnknownFacilitator(String),

    /// Two catalog entries of the same kind share a name.
    #[error("duplicate {kind} name: '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// A table is too small for the search operators to work on it.
    #[error("degenerate domain: {0}")]
    DegenerateDomain(String),

    /// A gene list does not cover every activity exactly once, in order.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;
