use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed location file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to build trace batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("failed to write trace: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("no locations to route")]
    NoLocations,
    #[error("at least {required} locations are needed to calculate a route, got {actual}")]
    TooFewLocations { required: usize, actual: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
