// Error types shared by the validator, the gateway and the service

use thiserror::Error;

/// Every failure the directory can report.
///
/// The first four variants are client errors and carry the human-readable
/// message produced by validation, lookup or body parsing. Their `Display` output is the
/// exact plain-text body the HTTP layer returns.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Invalid SWIFT code: {0}")]
    InvalidSwiftCode(String),

    #[error("Invalid ISO2 code: {0}")]
    InvalidIso2Code(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request body that could not be read as a bank record
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DirectoryError {
    pub fn invalid_swift_code(message: impl Into<String>) -> Self {
        DirectoryError::InvalidSwiftCode(message.into())
    }

    pub fn invalid_iso2_code(message: impl Into<String>) -> Self {
        DirectoryError::InvalidIso2Code(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DirectoryError::NotFound(message.into())
    }

    /// True for errors caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DirectoryError::InvalidSwiftCode(_)
                | DirectoryError::InvalidIso2Code(_)
                | DirectoryError::NotFound(_)
                | DirectoryError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
