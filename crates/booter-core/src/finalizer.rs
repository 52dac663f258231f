//! Finalizer definitions and their registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BootError, BootResult};
use crate::key::ComponentKey;
use crate::lifecycle::Lifecycle;

/// Deferred body populating a fresh [`Lifecycle`] with its target and hooks
pub type FinalizerBody = Box<dyn Fn(&mut Lifecycle) -> anyhow::Result<()> + Send + Sync>;

/// Lazily evaluated lifecycle definition of one component
pub struct FinalizerDefinition {
    key: ComponentKey,
    body: FinalizerBody,
}

impl FinalizerDefinition {
    pub fn new<F>(key: impl Into<ComponentKey>, body: F) -> Self
    where
        F: Fn(&mut Lifecycle) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            body: Box::new(body),
        }
    }

    pub fn key(&self) -> &ComponentKey {
        &self.key
    }

    /// Evaluate the body against a fresh record.
    ///
    /// Nothing is kept when the body fails.
    pub fn evaluate(&self) -> BootResult<Lifecycle> {
        let mut lifecycle = Lifecycle::new(self.key.clone());
        (self.body)(&mut lifecycle).map_err(|err| BootError::from_definition(&self.key, err))?;
        Ok(lifecycle)
    }
}

impl fmt::Debug for FinalizerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizerDefinition")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Registry of finalizer definitions, keyed by component.
///
/// Registering a key twice is rejected; definitions are never replaced.
#[derive(Debug, Default)]
pub struct FinalizerRegistry {
    definitions: HashMap<ComponentKey, Arc<FinalizerDefinition>>,
    /// Registration order
    order: Vec<ComponentKey>,
}

impl FinalizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a definition under its key
    pub fn register(&mut self, definition: FinalizerDefinition) -> BootResult<()> {
        let key = definition.key().clone();
        if self.definitions.contains_key(&key) {
            return Err(BootError::duplicate_definition(key));
        }
        self.order.push(key.clone());
        self.definitions.insert(key, Arc::new(definition));
        Ok(())
    }

    /// Definition registered under `key`
    pub fn lookup(&self, key: &str) -> BootResult<Arc<FinalizerDefinition>> {
        self.definitions
            .get(key)
            .cloned()
            .ok_or_else(|| BootError::unknown_component(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> &[ComponentKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
