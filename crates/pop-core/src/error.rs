//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `PopError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `pop-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PopError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `pop-*` crates.
pub type PopResult<T> = Result<T, PopError>;
