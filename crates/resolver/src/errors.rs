use thiserror::Error;

use domtap_core_types::CoreError;

/// Resolution failures. An empty result is *not* an error (the resolver
/// returns [`crate::Resolution::NotFound`]); only structurally invalid
/// queries fail, and they fail fast before any tree access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("node-type filter has no categories")]
    EmptyFilter,

    #[error("query scope is not part of any tree")]
    DetachedScope,
}

impl From<ResolveError> for CoreError {
    fn from(err: ResolveError) -> Self {
        CoreError::InvalidQuery(err.to_string())
    }
}
