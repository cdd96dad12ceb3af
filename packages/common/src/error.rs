use thiserror::Error;

/// Common error type shared by the svgsync crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("Invalid position ({line},{column}): lines and columns are 1-based")]
    InvalidPosition { line: u32, column: u32 },

    #[error("Invalid range {0}: start is after end")]
    InvalidRange(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
