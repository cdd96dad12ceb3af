//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid range in event: {0}")]
    Range(#[from] svgsync_common::CommonError),

    #[error("Event #{index} is invalid: {message}")]
    Script { index: usize, message: String },
}

pub type EditorResult<T> = Result<T, EditorError>;
