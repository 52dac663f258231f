//! Declarative boot plans
//!
//! A plan lists components to boot at application start and how far to
//! drive each one:
//!
//! ```toml
//! [[components]]
//! key = "db"
//! mode = "full"
//!
//! [[components]]
//! key = "cache"
//! mode = "start"
//! ```
//!
//! Entries are booted in file order. Plans carry no dependency information.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::booter::BootMode;
use crate::error::{BootError, BootResult};
use crate::key::ComponentKey;

/// One component to boot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub key: ComponentKey,
    #[serde(default)]
    pub mode: BootMode,
}

/// Ordered list of components to boot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootPlan {
    #[serde(default)]
    pub components: Vec<PlanEntry>,
}

impl BootPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn with(mut self, key: impl Into<ComponentKey>, mode: BootMode) -> Self {
        self.components.push(PlanEntry {
            key: key.into(),
            mode,
        });
        self
    }

    pub fn from_toml_str(content: &str) -> BootResult<Self> {
        let plan: BootPlan = toml::from_str(content)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_file(path: impl AsRef<Path>) -> BootResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BootError::config(format!("Failed to read boot plan {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject empty keys and keys listed twice
    pub fn validate(&self) -> BootResult<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.components {
            if entry.key.as_str().is_empty() {
                return Err(BootError::config("Boot plan entry has an empty key"));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(BootError::config(format!(
                    "Component {} listed twice in boot plan",
                    entry.key
                )));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_plan() {
        let plan = BootPlan::from_toml_str(
            r#"
            [[components]]
            key = "db"
            mode = "full"

            [[components]]
            key = "cache"
            mode = "start"

            [[components]]
            key = "mailer"
            "#,
        )
        .unwrap();

        let expected = BootPlan::new()
            .with("db", BootMode::Full)
            .with("cache", BootMode::Start)
            .with("mailer", BootMode::Full);
        assert_eq!(plan, expected);
    }

    #[test]
    fn test_empty_plan() {
        let plan = BootPlan::from_toml_str("").unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_invalid_plans() {
        let err = BootPlan::from_toml_str("[[components]]\nkey = \"db\"\nmode = \"eager\"\n")
            .unwrap_err();
        assert!(matches!(err, BootError::Config(_)));

        let err = BootPlan::from_toml_str(
            "[[components]]\nkey = \"db\"\n\n[[components]]\nkey = \"db\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("listed twice"));

        let err = BootPlan::from_toml_str("[[components]]\nkey = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("empty key"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[components]]\nkey = \"db\"\nmode = \"start\"").unwrap();

        let plan = BootPlan::from_file(file.path()).unwrap();
        assert_eq!(plan, BootPlan::new().with("db", BootMode::Start));

        let err = BootPlan::from_file("/nonexistent/boot.toml").unwrap_err();
        assert!(matches!(err, BootError::Config(_)));
    }
}
