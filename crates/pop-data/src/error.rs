use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no rows for location {0:?}")]
    LocationNotFound(String),

    #[error("invalid population for {location:?}: {value:?}")]
    InvalidPopulation { location: String, value: Option<f64> },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DataResult<T> = Result<T, DataError>;
