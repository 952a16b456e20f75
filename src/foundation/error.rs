/// Convenience result type used across the renderer.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Error taxonomy used by renderer internals.
///
/// None of these ever reach the host through the [`crate::Renderer`] lifecycle
/// calls: the renderer logs them and degrades instead.
#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    /// Invalid options, sizes or other user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The container cannot provide a 2D drawing context or surface.
    #[error("context unavailable: {0}")]
    ContextUnavailable(String),

    /// A drawing step failed while composing a frame.
    #[error("draw error: {0}")]
    Draw(String),

    /// The container could not be measured.
    #[error("measure error: {0}")]
    Measure(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackdropError {
    /// Build a [`BackdropError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BackdropError::ContextUnavailable`] value.
    pub fn context_unavailable(msg: impl Into<String>) -> Self {
        Self::ContextUnavailable(msg.into())
    }

    /// Build a [`BackdropError::Draw`] value.
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }

    /// Build a [`BackdropError::Measure`] value.
    pub fn measure(msg: impl Into<String>) -> Self {
        Self::Measure(msg.into())
    }

    /// Build a [`BackdropError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BackdropError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
