use chrono::NaiveDate;
use pop_core::PopError;
use pop_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] PopError),

    /// An `affect` issued by a scenario failed.  `event` names the step
    /// ("deaths", "cases", …) so the offending input row can be found.
    #[error("{event} on {date}: {source}")]
    Affect {
        event:  &'static str,
        date:   NaiveDate,
        source: EngineError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
