//! Booter: resolves component keys to cached lifecycle records and drives
//! them through their phases.

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BootError, BootResult};
use crate::finalizer::{FinalizerDefinition, FinalizerRegistry};
use crate::key::ComponentKey;
use crate::ledger::PhaseEntry;
use crate::lifecycle::Lifecycle;
use crate::plan::BootPlan;

/// How far a boot drives a component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootMode {
    /// Run `start` only
    Start,
    /// Run `start`, then `activate`
    #[default]
    Full,
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Full => write!(f, "full"),
        }
    }
}

type Slot = Arc<OnceCell<Arc<Lifecycle>>>;

/// Orchestrator owning the finalizer registry and the lifecycle cache.
///
/// One instance per application, shared by reference (or `Arc`) with
/// everything that needs to boot components.
pub struct Booter {
    registry: RwLock<FinalizerRegistry>,
    cache: Mutex<HashMap<ComponentKey, Slot>>,
    /// Keys in the order their records were materialized
    resolved: Mutex<Vec<ComponentKey>>,
}

impl Booter {
    /// Create a booter with an empty registry
    pub fn new() -> Self {
        Self::with_registry(FinalizerRegistry::new())
    }

    /// Create with existing registry
    pub fn with_registry(registry: FinalizerRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
            cache: Mutex::new(HashMap::new()),
            resolved: Mutex::new(Vec::new()),
        }
    }

    /// Declare the lifecycle of a component.
    ///
    /// The body runs lazily, on the first `resolve` of `key`.
    pub fn register_finalizer<F>(&self, key: impl Into<ComponentKey>, body: F) -> BootResult<()>
    where
        F: Fn(&mut Lifecycle) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(FinalizerDefinition::new(key, body))
    }

    /// Register a prebuilt finalizer definition
    pub fn register(&self, definition: FinalizerDefinition) -> BootResult<()> {
        self.registry.write().register(definition)
    }

    /// Stable lifecycle handle for `key`.
    ///
    /// The finalizer body is evaluated on the first successful call only;
    /// every later call returns the same `Arc`. A failing body leaves nothing
    /// cached and is evaluated again on the next call. Bodies must not
    /// resolve their own key.
    pub fn resolve(&self, key: impl AsRef<str>) -> BootResult<Arc<Lifecycle>> {
        let key = key.as_ref();
        let slot = self.slot(key)?;

        if let Some(lifecycle) = slot.get() {
            tracing::trace!(component = key, "Lifecycle cache hit");
            return Ok(lifecycle.clone());
        }

        let lifecycle = slot.get_or_try_init(|| self.materialize(key))?;
        Ok(lifecycle.clone())
    }

    fn slot(&self, key: &str) -> BootResult<Slot> {
        let mut cache = self.cache.lock();
        if let Some(slot) = cache.get(key) {
            return Ok(slot.clone());
        }

        if !self.registry.read().contains(key) {
            return Err(BootError::unknown_component(key));
        }

        let slot = Slot::default();
        cache.insert(ComponentKey::new(key), slot.clone());
        Ok(slot)
    }

    fn materialize(&self, key: &str) -> BootResult<Arc<Lifecycle>> {
        let definition = self.registry.read().lookup(key)?;
        let lifecycle = definition.evaluate()?;

        tracing::debug!(component = key, "Finalizer evaluated");
        self.resolved.lock().push(definition.key().clone());
        Ok(Arc::new(lifecycle))
    }

    /// Resolve `key` and run its `start` phase
    pub fn boot(&self, key: impl AsRef<str>) -> BootResult<Arc<Lifecycle>> {
        self.boot_with(key, BootMode::Start)
    }

    /// Resolve `key` and run `start` followed by `activate`
    pub fn boot_fully(&self, key: impl AsRef<str>) -> BootResult<Arc<Lifecycle>> {
        self.boot_with(key, BootMode::Full)
    }

    /// Resolve `key` and run the phases `mode` asks for
    pub fn boot_with(&self, key: impl AsRef<str>, mode: BootMode) -> BootResult<Arc<Lifecycle>> {
        let lifecycle = self.resolve(key)?;
        lifecycle.start()?;
        if mode == BootMode::Full {
            lifecycle.activate()?;
        }
        Ok(lifecycle)
    }

    /// Boot every registered component in registration order.
    ///
    /// Stops at the first failure; completed phases are skipped on the next call.
    pub fn finalize(&self, mode: BootMode) -> BootResult<()> {
        let keys = self.keys();
        for key in &keys {
            self.boot_with(key, mode)?;
        }
        tracing::debug!(components = keys.len(), %mode, "All components booted");
        Ok(())
    }

    /// Boot the plan's entries in order
    pub fn apply_plan(&self, plan: &BootPlan) -> BootResult<()> {
        for entry in &plan.components {
            self.boot_with(&entry.key, entry.mode)?;
        }
        Ok(())
    }

    /// Stop every resolved component, most recently resolved first.
    ///
    /// Components that were never resolved are left alone.
    pub fn shutdown(&self) -> BootResult<()> {
        for lifecycle in self.resolved_lifecycles().iter().rev() {
            lifecycle.stop()?;
        }
        Ok(())
    }

    fn resolved_lifecycles(&self) -> Vec<Arc<Lifecycle>> {
        let keys = self.resolved.lock().clone();
        let cache = self.cache.lock();
        keys.iter()
            .filter_map(|key| cache.get(key).and_then(|slot| slot.get().cloned()))
            .collect()
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> Vec<ComponentKey> {
        self.registry.read().keys().to_vec()
    }

    /// Whether a finalizer is registered under `key`
    pub fn is_registered(&self, key: impl AsRef<str>) -> bool {
        self.registry.read().contains(key.as_ref())
    }

    /// Whether the finalizer for `key` has been evaluated
    pub fn is_resolved(&self, key: impl AsRef<str>) -> bool {
        self.cache
            .lock()
            .get(key.as_ref())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Snapshot of every resolved component's completed phases
    pub fn report(&self) -> BootReport {
        let components = self
            .resolved_lifecycles()
            .into_iter()
            .map(|lifecycle| ComponentReport {
                key: lifecycle.key().clone(),
                statuses: lifecycle.entries(),
            })
            .collect();
        BootReport { components }
    }
}

impl Default for Booter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Booter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Booter")
            .field("registered", &self.keys())
            .field("resolved", &*self.resolved.lock())
            .finish()
    }
}

/// Completed phases of one resolved component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentReport {
    pub key: ComponentKey,
    pub statuses: Vec<PhaseEntry>,
}

/// Diagnostic snapshot of a booter, in resolution order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootReport {
    pub components: Vec<ComponentReport>,
}

impl BootReport {
    pub fn get(&self, key: &str) -> Option<&ComponentReport> {
        self.components.iter().find(|c| c.key.as_str() == key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
