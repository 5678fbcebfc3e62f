/// Convenience result type used across tilemux.
pub type TileResult<T> = Result<T, TileError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only configuration problems surface as errors, and only from the
/// validating factory ([`crate::Tiler::new`]). Placement anomalies at
/// compose time (unknown areas, unmatched grid rules, capacity drops) are
/// logged and resolved by policy, never raised.
#[derive(thiserror::Error, Debug)]
pub enum TileError {
    /// Invalid user-provided layout configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileError {
    /// Build a [`TileError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TileError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
