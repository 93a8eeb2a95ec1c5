use thiserror::Error;

/// Top-level error taxonomy shared across the engine.
///
/// `NotFound`, `StaleTarget` and `Ambiguous` are *outcomes*, not errors
/// (see [`crate::Outcome`]); only genuinely fatal conditions surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed scope or filter, detected before any tree access.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A mutation or dispatch verb was invoked on a detached node.
    #[error("node is detached: {0}")]
    Detached(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        CoreError::InvalidQuery(msg.into())
    }

    pub fn detached(msg: impl Into<String>) -> Self {
        CoreError::Detached(msg.into())
    }

    /// Fatal errors abort the run; everything else is reported as an outcome.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoreError::InvalidQuery(_) | CoreError::Internal(_))
    }
}
