use thiserror::Error;

/// Errors that can occur when loading or querying the dataset.
#[derive(Debug, Error)]
pub enum RecError {
    #[error("row count mismatch: {restaurants} restaurant rows, {encoded} encoded rows")]
    RowCountMismatch { restaurants: usize, encoded: usize },

    #[error("feature dimension mismatch at row {row}: expected {expected}, got {got}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("row index out of range: {index} (dataset has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("csv parse error at row {row}: {message}")]
    CsvParse { row: usize, message: String },

    #[error("regression fit failed: {0}")]
    FitFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for recommendation operations.
pub type Result<T> = std::result::Result<T, RecError>;
