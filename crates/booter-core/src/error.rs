//! Error types for the lifecycle engine

use thiserror::Error;

use crate::key::ComponentKey;
use crate::phase::Phase;

/// Result type alias for lifecycle operations
pub type BootResult<T> = Result<T, BootError>;

/// Errors raised while declaring, resolving or triggering components
#[derive(Error, Debug)]
pub enum BootError {
    /// No finalizer is registered under the key
    #[error("Unknown component: {key}")]
    UnknownComponent { key: ComponentKey },

    /// A finalizer is already registered under the key
    #[error("Duplicate finalizer definition for component: {key}")]
    DuplicateDefinition { key: ComponentKey },

    /// The finalizer body bound a target twice
    #[error("Target already set for component: {key}")]
    TargetAlreadySet { key: ComponentKey },

    /// The finalizer body assigned the same hook twice
    #[error("Hook {phase} already set for component: {key}")]
    HookAlreadySet { key: ComponentKey, phase: Phase },

    /// A phase hook failed; the phase stays pending
    #[error("Hook {phase} failed for component {key}: {source}")]
    HookExecution {
        key: ComponentKey,
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },

    /// The finalizer body itself failed
    #[error("Finalizer for component {key} failed: {source}")]
    Definition {
        key: ComponentKey,
        #[source]
        source: anyhow::Error,
    },

    /// A boot plan could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BootError {
    /// Create an unknown component error
    pub fn unknown_component(key: impl Into<ComponentKey>) -> Self {
        Self::UnknownComponent { key: key.into() }
    }

    /// Create a duplicate definition error
    pub fn duplicate_definition(key: impl Into<ComponentKey>) -> Self {
        Self::DuplicateDefinition { key: key.into() }
    }

    /// Create a hook execution error
    pub fn hook_execution(
        key: impl Into<ComponentKey>,
        phase: Phase,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::HookExecution {
            key: key.into(),
            phase,
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wrap the failure of a finalizer body.
    ///
    /// Builder misuse on the record for `key` keeps its own variant; any other
    /// failure, including errors about other components, becomes `Definition`.
    pub(crate) fn from_definition(key: &ComponentKey, source: anyhow::Error) -> Self {
        match source.downcast::<BootError>() {
            Ok(err @ (Self::TargetAlreadySet { .. } | Self::HookAlreadySet { .. }))
                if err.key() == Some(key) =>
            {
                err
            }
            Ok(err) => Self::Definition {
                key: key.clone(),
                source: err.into(),
            },
            Err(source) => Self::Definition {
                key: key.clone(),
                source,
            },
        }
    }

    /// Key of the component the error refers to, if any
    pub fn key(&self) -> Option<&ComponentKey> {
        match self {
            Self::UnknownComponent { key }
            | Self::DuplicateDefinition { key }
            | Self::TargetAlreadySet { key }
            | Self::HookAlreadySet { key, .. }
            | Self::HookExecution { key, .. }
            | Self::Definition { key, .. } => Some(key),
            Self::Config(_) => None,
        }
    }

    /// Phase the error was raised in, if any
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::HookAlreadySet { phase, .. } | Self::HookExecution { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Whether calling the same operation again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HookExecution { .. } | Self::Definition { .. })
    }
}

impl From<toml::de::Error> for BootError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BootError::unknown_component("nonexistent");
        assert_eq!(err.to_string(), "Unknown component: nonexistent");

        let err = BootError::hook_execution("db", Phase::Start, anyhow::anyhow!("refused"));
        assert_eq!(err.to_string(), "Hook start failed for component db: refused");

        let err = BootError::HookAlreadySet {
            key: "cache".into(),
            phase: Phase::Activate,
        };
        assert!(err.to_string().contains("activate"));
    }

    #[test]
    fn test_definition_keeps_builder_errors() {
        let key = ComponentKey::from("db");
        let source = anyhow::Error::new(BootError::TargetAlreadySet { key: key.clone() });
        let err = BootError::from_definition(&key, source);
        assert!(matches!(err, BootError::TargetAlreadySet { .. }));

        let other = anyhow::Error::new(BootError::TargetAlreadySet {
            key: ComponentKey::from("cache"),
        });
        let err = BootError::from_definition(&key, other);
        assert!(matches!(err, BootError::Definition { ref key, .. } if key.as_str() == "db"));

        let nested = anyhow::Error::new(BootError::unknown_component("missing"));
        let err = BootError::from_definition(&key, nested);
        assert!(matches!(err, BootError::Definition { .. }));
        assert!(err.to_string().contains("missing"));

        let err = BootError::from_definition(&key, anyhow::anyhow!("no such host"));
        assert!(matches!(err, BootError::Definition { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_error_accessors() {
        let err = BootError::hook_execution("db", Phase::Stop, anyhow::anyhow!("boom"));
        assert_eq!(err.key().map(ComponentKey::as_str), Some("db"));
        assert_eq!(err.phase(), Some(Phase::Stop));

        let err = BootError::config("bad plan");
        assert!(err.key().is_none());
        assert!(!err.is_retryable());
    }
}
