/// Crate-wide result alias.
pub type HypnoResult<T> = Result<T, HypnoError>;

/// Errors surfaced by the pattern engine and the editing session.
///
/// Every failure is local to one operation; the session stays usable afterwards.
#[derive(thiserror::Error, Debug)]
pub enum HypnoError {
    /// Caller-provided input was rejected (bad import payload, unknown field, bad color).
    #[error("validation error: {0}")]
    Validation(String),

    /// A render or raster step could not be carried out.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, usually from an IO or decode seam.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HypnoError {
    /// Build a [`HypnoError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HypnoError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`HypnoError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HypnoError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
