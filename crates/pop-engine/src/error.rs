use thiserror::Error;

/// Errors raised by [`BucketedPopulation`][crate::BucketedPopulation].
///
/// `NoMatchingEntities` and `InsufficientPopulation` mean the caller asked
/// for something the current state cannot satisfy — usually input data that
/// disagrees with the simulation's own bookkeeping.  Both are raised before
/// any count is modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no entities match the predicate ({requested} requested)")]
    NoMatchingEntities { requested: u64 },

    #[error("requested {requested} entities but only {available} match the predicate")]
    InsufficientPopulation { requested: u64, available: u64 },
}

pub type EngineResult<T> = Result<T, EngineError>;
