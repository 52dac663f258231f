//! Booter
//!
//! Declare application components with deferred lifecycle definitions and
//! boot them idempotently. See [`booter_core`] for the engine.

pub use booter_core::*;
