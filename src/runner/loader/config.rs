//! Engine configuration file parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::runner::ds::error::ClassError;

pub const DEFAULT_ROOT_CLASS: &str = "Blend.BaseClass";
pub const DEFAULT_FRAMEWORK_NAMESPACE: &str = "Blend";
pub const DEFAULT_INIT_METHOD: &str = "init";
pub const DEFAULT_CHANGE_HOOK: &str = "onPropertyChange";

/// Engine settings. Every field has a default, so an empty file is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Implicit parent of every class defined without `extend`/`override`.
    pub root_class: String,
    /// The bare namespace name is never loaded as a dependency. Classes
    /// inside it are, like any other.
    pub framework_namespace: String,
    /// Method called with the creation config on every new instance.
    pub init_method: String,
    /// Method generated setters notify with `(member, new, old)`.
    pub change_hook: String,
    /// Further class names the dependency resolver ignores.
    pub skip_dependencies: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            root_class: DEFAULT_ROOT_CLASS.to_string(),
            framework_namespace: DEFAULT_FRAMEWORK_NAMESPACE.to_string(),
            init_method: DEFAULT_INIT_METHOD.to_string(),
            change_hook: DEFAULT_CHANGE_HOOK.to_string(),
            skip_dependencies: vec![],
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// root_class = "Blend.BaseClass"
    /// framework_namespace = "Blend"
    /// init_method = "init"
    /// change_hook = "onPropertyChange"
    /// skip_dependencies = ["Ext.Legacy"]
    /// ```
    pub fn load(path: &Path) -> Result<Self, ClassError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ClassError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ClassError> {
        toml::from_str(content)
            .map_err(|e| ClassError::Config(format!("Failed to parse config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_config() {
        let config = EngineConfig::parse("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let content = r#"
root_class = "App.Base"
skip_dependencies = ["Ext.Legacy", "Ext.Other"]
"#;
        let config = EngineConfig::parse(content).unwrap();
        assert_eq!(config.root_class, "App.Base");
        assert_eq!(config.init_method, "init");
        assert_eq!(config.change_hook, "onPropertyChange");
        assert_eq!(config.skip_dependencies, vec!["Ext.Legacy", "Ext.Other"]);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = EngineConfig::parse("root_class = [").unwrap_err();
        assert!(matches!(err, ClassError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/blend.toml")).unwrap_err();
        assert!(err.to_string().starts_with("config error: Failed to read config file"));
    }
}
