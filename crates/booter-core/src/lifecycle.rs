//! Lifecycle records
//!
//! A [`Lifecycle`] holds one component's target, its phase hooks and the
//! ledger of phases that already ran. It is populated once by the
//! component's finalizer body (the builder half of the API) and afterwards
//! driven through its phases by any number of callers (the trigger half).

use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{BootError, BootResult};
use crate::key::ComponentKey;
use crate::ledger::{PhaseEntry, StatusLedger};
use crate::phase::Phase;

/// Phase hook: a side-effecting action closed over the component target
pub type Hook = Box<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

type Target = Arc<dyn Any + Send + Sync>;

/// Hooks, target and execution history of one component
pub struct Lifecycle {
    key: ComponentKey,
    target: Option<Target>,
    hooks: [Option<Hook>; 3],
    /// Serializes check-and-run of phases
    trigger_lock: Mutex<()>,
    ledger: RwLock<StatusLedger>,
}

impl Lifecycle {
    /// Create an empty record for `key`
    pub fn new(key: impl Into<ComponentKey>) -> Self {
        Self {
            key: key.into(),
            target: None,
            hooks: [None, None, None],
            trigger_lock: Mutex::new(()),
            ledger: RwLock::new(StatusLedger::new()),
        }
    }

    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Bind the component instance. May be called once.
    pub fn set_target<T>(&mut self, target: Arc<T>) -> BootResult<()>
    where
        T: Any + Send + Sync,
    {
        if self.target.is_some() {
            return Err(BootError::TargetAlreadySet {
                key: self.key.clone(),
            });
        }
        let target: Target = target;
        self.target = Some(target);
        Ok(())
    }

    /// Assign the hook for `phase`. Each phase accepts one hook.
    pub fn on<F>(&mut self, phase: Phase, hook: F) -> BootResult<()>
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let slot = &mut self.hooks[phase.index()];
        if slot.is_some() {
            return Err(BootError::HookAlreadySet {
                key: self.key.clone(),
                phase,
            });
        }
        *slot = Some(Box::new(hook));
        Ok(())
    }

    pub fn on_start<F>(&mut self, hook: F) -> BootResult<()>
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on(Phase::Start, hook)
    }

    pub fn on_activate<F>(&mut self, hook: F) -> BootResult<()>
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on(Phase::Activate, hook)
    }

    pub fn on_stop<F>(&mut self, hook: F) -> BootResult<()>
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on(Phase::Stop, hook)
    }

    /// The bound target, if one was set and it has type `T`
    pub fn target<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.target.clone()?.downcast::<T>().ok()
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn has_hook(&self, phase: Phase) -> bool {
        self.hooks[phase.index()].is_some()
    }

    pub fn start(&self) -> BootResult<()> {
        self.trigger(Phase::Start)
    }

    pub fn activate(&self) -> BootResult<()> {
        self.trigger(Phase::Activate)
    }

    pub fn stop(&self) -> BootResult<()> {
        self.trigger(Phase::Stop)
    }

    /// Run the hook for `phase` unless the phase already completed.
    ///
    /// A failing hook leaves the phase pending, so calling again retries it.
    /// Hooks run under the record's trigger lock and must not trigger phases
    /// of their own record.
    pub fn trigger(&self, phase: Phase) -> BootResult<()> {
        let _guard = self.trigger_lock.lock();

        if self.ledger.read().contains(phase) {
            tracing::trace!(component = %self.key, %phase, "Phase already completed");
            return Ok(());
        }

        if let Some(hook) = &self.hooks[phase.index()] {
            hook().map_err(|source| BootError::hook_execution(&self.key, phase, source))?;
        }

        let recorded = self.ledger.write().record(phase);
        debug_assert!(recorded, "phase recorded twice under the trigger lock");
        tracing::debug!(component = %self.key, %phase, "Lifecycle phase completed");
        Ok(())
    }

    /// Completed phases in execution order
    pub fn statuses(&self) -> Vec<Phase> {
        self.ledger.read().phases()
    }

    pub fn is_completed(&self, phase: Phase) -> bool {
        self.ledger.read().contains(phase)
    }

    /// Completed phases with their completion times
    pub fn entries(&self) -> Vec<PhaseEntry> {
        self.ledger.read().entries().to_vec()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<Phase> = Phase::ALL
            .into_iter()
            .filter(|phase| self.has_hook(*phase))
            .collect();
        f.debug_struct("Lifecycle")
            .field("key", &self.key)
            .field("has_target", &self.has_target())
            .field("hooks", &hooks)
            .field("statuses", &self.statuses())
            .finish()
    }
}
