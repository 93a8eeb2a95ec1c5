use thiserror::Error;

use domtap_core_types::CoreError;

/// Dispatch failures. Staleness is *not* an error — it is reported as
/// [`Outcome::StaleTarget`](domtap_core_types::Outcome) with the count of
/// events already sent. Only tree-port faults surface here.
#[derive(Debug, Error, Clone)]
pub enum DispatchError {
    #[error("tree port failure during {verb}: {source}")]
    Tree {
        verb: &'static str,
        #[source]
        source: CoreError,
    },
}

impl DispatchError {
    pub(crate) fn tree(verb: &'static str, source: CoreError) -> Self {
        DispatchError::Tree { verb, source }
    }
}

impl From<DispatchError> for CoreError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Tree { source, .. } => source,
        }
    }
}
