//! Booter Core Library
//!
//! Component lifecycle orchestration: components are declared by key with a
//! deferred finalizer that binds a target and `start` / `activate` / `stop`
//! hooks. The [`Booter`] materializes each component's [`Lifecycle`] on first
//! use, caches it for the rest of its own lifetime, and runs every phase hook
//! at most once no matter how often, or from how many threads, a boot is
//! requested.
//!
//! ```
//! use booter_core::{Booter, Phase};
//! use std::sync::Arc;
//!
//! let booter = Booter::new();
//! booter.register_finalizer("db", |lifecycle| {
//!     let pool = Arc::new(String::from("postgres://localhost/app"));
//!     lifecycle.set_target(pool.clone())?;
//!     lifecycle.on_start(move || {
//!         assert!(!pool.is_empty());
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! booter.boot("db")?;
//! booter.boot_fully("db")?;
//! assert_eq!(booter.resolve("db")?.statuses(), vec![Phase::Start, Phase::Activate]);
//! # Ok::<(), booter_core::BootError>(())
//! ```

pub mod booter;
pub mod error;
pub mod finalizer;
pub mod key;
pub mod ledger;
pub mod lifecycle;
pub mod phase;
pub mod plan;

pub use booter::{BootMode, BootReport, Booter, ComponentReport};
pub use error::{BootError, BootResult};
pub use finalizer::{FinalizerBody, FinalizerDefinition, FinalizerRegistry};
pub use key::ComponentKey;
pub use ledger::{PhaseEntry, StatusLedger};
pub use lifecycle::{Hook, Lifecycle};
pub use phase::Phase;
pub use plan::{BootPlan, PlanEntry};
