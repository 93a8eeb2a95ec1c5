//! Interaction dispatch: executes an [`Action`](domtap_core_types::Action)
//! against resolved targets as a deterministic synthetic event sequence or
//! an idempotent tree mutation, re-validating attachment before every
//! step so a stale target halts cleanly instead of acting on dangling
//! state.

pub mod errors;
pub mod model;
mod runner;

pub use errors::DispatchError;
pub use model::DispatchReport;
pub use runner::Dispatcher;
