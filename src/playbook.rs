//! Per-site configuration: logical action names mapped to query specs.
//!
//! Playbooks are plain data — the whole point of the engine is that site
//! differences live here, not in new code paths. A spec binds to a live
//! scope at run time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use domtap_core_types::{Action, CoreError, NodeFilter, NodeHandle};
use domtap_resolver::{AmbiguityPolicy, Query, Strategy};

/// Scope-free query description, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpec {
    pub filter: NodeFilter,
    pub strategy: Strategy,
    pub action: Action,
    #[serde(default)]
    pub ambiguity: AmbiguityPolicy,
}

impl QuerySpec {
    /// Bind this spec to a live scope.
    pub fn bind(&self, scope: NodeHandle) -> Query {
        Query::new(
            scope,
            self.filter.clone(),
            self.strategy.clone(),
            self.action.clone(),
        )
        .with_ambiguity(self.ambiguity)
    }
}

/// One site's table of logical actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Playbook {
    #[serde(default)]
    pub site: String,
    pub actions: BTreeMap<String, QuerySpec>,
}

impl Playbook {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|err| CoreError::invalid_query(format!("playbook parse: {err}")))
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|err| CoreError::Internal(err.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&QuerySpec> {
        self.actions.get(name)
    }
}
