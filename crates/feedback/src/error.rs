use thiserror::Error;

/// Why a notification produced no usable text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    /// The chat service could not be reached
    #[error("chat service unavailable")]
    Unavailable,
    /// The chat service answered with an error
    #[error("chat service rejected the prompt: {0}")]
    Rejected(String),
    /// The chat service answered with nothing to show
    #[error("empty response")]
    Empty,
}

impl FeedbackError {
    /// Failures replace the text with the fallback line; an empty answer keeps
    /// whatever is currently displayed.
    pub fn shows_fallback(&self) -> bool {
        !matches!(self, FeedbackError::Empty)
    }
}
