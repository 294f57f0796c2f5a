/// Result alias used across the crate.
pub type Diff2GifResult<T> = Result<T, Diff2GifError>;

/// Failure kinds surfaced by the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Diff2GifError {
    /// Inputs the pipeline cannot work with: unknown states, bad paths, missing statuses.
    #[error("configuration error: {0}")]
    Config(String),

    /// A frame or the final animation could not be written or read back.
    #[error("resource error: {0}")]
    Resource(String),

    /// Image codec failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Job or config JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Context-annotated lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Diff2GifError {
    /// Shorthand for [`Diff2GifError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Shorthand for [`Diff2GifError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Shorthand for [`Diff2GifError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Shorthand for [`Diff2GifError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors caused by the caller's inputs rather than the environment.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
