use thiserror::Error;

/// A caller-supplied field is missing or malformed. Recoverable by correcting
/// the input; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("price must be a non-negative amount in whole cents, at most 9999999999.99, got {0:?}")]
    InvalidPrice(String),

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },
}

/// Failure reported by the asset store. No listing is created after one.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("an asset named {0:?} already exists")]
    Conflict(String),

    #[error("asset store quota exceeded")]
    QuotaExceeded,

    #[error("asset store rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("asset store unreachable: {0}")]
    Network(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Network(err.to_string())
    }
}

/// Failure at the relational layer. The operation is abandoned.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored record is corrupt: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
