use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrokeError {
    /// Missing field, wrong semantic type, or a value no clinical reading can take.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StrokeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        StrokeError::InvalidInput(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StrokeError::InvalidInput(_))
    }
}
