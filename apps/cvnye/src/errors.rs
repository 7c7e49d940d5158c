use thiserror::Error;

use crate::llm_client::LlmError;

/// Shown inline when a pipeline failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while processing your CV. Please try again.";

/// Application-level error type.
/// Every pipeline failure is converted into one of these before it reaches the surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI service error: {0}")]
    Upstream(String),

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("Cannot {action} while in the {from} step")]
    InvalidTransition { from: &'static str, action: &'static str },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The message surfaced next to the input box after a failed run.
    pub fn user_message(&self) -> String {
        let detail = match self {
            AppError::Validation(msg)
            | AppError::Upstream(msg)
            | AppError::MalformedResponse(msg)
            | AppError::Export(msg) => msg.trim().to_string(),
            AppError::InvalidTransition { .. } => self.to_string(),
            AppError::Internal(e) => e.to_string().trim().to_string(),
        };

        if detail.is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            detail
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => AppError::MalformedResponse(e.to_string()),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
