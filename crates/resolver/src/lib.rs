//! Element resolution: snapshot capture, match predicates, ordered
//! fallback strategies and deterministic tie-break.
//!
//! A [`Query`] describes which node to find; [`Resolver::resolve`] narrows
//! the live tree to at most one target (or the full ordered candidate set
//! for whole-set actions) while streaming a nested diagnostic trace.

pub mod errors;
pub mod resolver;
pub mod snapshot;
pub mod types;

pub use errors::ResolveError;
pub use resolver::Resolver;
pub use snapshot::Snapshot;
pub use types::{
    AmbiguityPolicy, Candidate, DescendantPath, Predicate, Query, Resolution, Strategy,
    StrategyEntry,
};
