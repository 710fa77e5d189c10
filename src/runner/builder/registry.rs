//! Class registry: names, aliases, abstract/singleton flags and override
//! redirects.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::runner::ds::error::ClassError;

/// Bookkeeping for one registered class name.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRecord {
    /// Canonical name the record was registered under.
    pub name: String,
    /// Name lookups currently resolve to. Equal to `name` until overridden.
    pub implementation: String,
    pub is_abstract: bool,
    pub is_singleton: bool,
    /// Every implementation this name has been redirected to, oldest first.
    pub overrides: Vec<String>,
}

impl ClassRecord {
    fn new(name: &str) -> Self {
        ClassRecord {
            name: name.to_string(),
            implementation: name.to_string(),
            is_abstract: false,
            is_singleton: false,
            overrides: vec![],
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.implementation != self.name
    }
}

/// Registry of class names.
/// Lives inside an [`Engine`](crate::runner::api::Engine); there is no
/// process-wide instance.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Registered classes in definition order.
    classes: IndexMap<String, ClassRecord>,

    /// Alias -> canonical class name.
    aliases: HashMap<String, String>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        ClassRegistry::default()
    }

    /// Register a new class name. Fails if the name is already taken.
    pub fn define(&mut self, name: &str) -> Result<(), ClassError> {
        if self.classes.contains_key(name) {
            return Err(ClassError::Redefinition(name.to_string()));
        }
        self.classes.insert(name.to_string(), ClassRecord::new(name));
        debug!(class = name, "registered class");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn record(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.classes.keys()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The name `name` currently resolves to, following override redirects
    /// through every intermediate override.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let mut current = self.classes.get(name)?;
        // a redirect chain can never be longer than the registry itself
        for _ in 0..=self.classes.len() {
            if !current.is_overridden() {
                break;
            }
            match self.classes.get(&current.implementation) {
                Some(next) => current = next,
                None => return Some(current.implementation.to_string()),
            }
        }
        Some(current.implementation.to_string())
    }

    /// Point `name` at a new implementation.
    pub fn redirect(&mut self, name: &str, implementation: &str) -> Result<(), ClassError> {
        let record = self
            .classes
            .get_mut(name)
            .ok_or_else(|| ClassError::UndefinedOverrideTarget(name.to_string()))?;
        record.implementation = implementation.to_string();
        record.overrides.push(implementation.to_string());
        debug!(class = name, implementation, "redirected class");
        Ok(())
    }

    pub fn mark_abstract(&mut self, name: &str) -> Result<(), ClassError> {
        let record = self
            .classes
            .get_mut(name)
            .ok_or_else(|| ClassError::UnknownClass(name.to_string()))?;
        record.is_abstract = true;
        Ok(())
    }

    pub fn mark_singleton(&mut self, name: &str) -> Result<(), ClassError> {
        let record = self
            .classes
            .get_mut(name)
            .ok_or_else(|| ClassError::UnknownClass(name.to_string()))?;
        record.is_singleton = true;
        Ok(())
    }

    pub fn is_abstract(&self, name: &str) -> bool {
        self.classes
            .get(name)
            .map(|r| r.is_abstract)
            .unwrap_or(false)
    }

    pub fn is_singleton(&self, name: &str) -> bool {
        self.classes
            .get(name)
            .map(|r| r.is_singleton)
            .unwrap_or(false)
    }

    /// Register every alias in `aliases` for `name`. Later registrations of
    /// the same alias win.
    pub fn alias<S: AsRef<str>>(&mut self, aliases: &[S], name: &str) {
        for alias in aliases {
            let alias = alias.as_ref();
            debug!(alias, class = name, "registered alias");
            self.aliases.insert(alias.to_string(), name.to_string());
        }
    }

    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(|s| s.as_str())
    }

    /// Lookup by canonical name first, then through the alias table.
    pub fn find(&self, name_or_alias: &str) -> Option<String> {
        self.lookup(name_or_alias).or_else(|| {
            self.resolve_alias(name_or_alias)
                .and_then(|name| self.lookup(name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_twice_fails() {
        let mut registry = ClassRegistry::new();
        registry.define("Test.A").unwrap();
        assert_eq!(
            registry.define("Test.A"),
            Err(ClassError::Redefinition("Test.A".to_string()))
        );
    }

    #[test]
    fn test_lookup_follows_redirect_chain() {
        let mut registry = ClassRegistry::new();
        registry.define("Test.ClassX").unwrap();
        registry.define("Test.override.ClassX").unwrap();
        registry.define("Test.override.ClassX2").unwrap();
        registry
            .redirect("Test.ClassX", "Test.override.ClassX")
            .unwrap();
        assert_eq!(
            registry.lookup("Test.ClassX").as_deref(),
            Some("Test.override.ClassX")
        );
        registry
            .redirect("Test.override.ClassX", "Test.override.ClassX2")
            .unwrap();
        assert_eq!(
            registry.lookup("Test.ClassX").as_deref(),
            Some("Test.override.ClassX2")
        );
        assert_eq!(registry.record("Test.ClassX").unwrap().overrides.len(), 1);
    }

    #[test]
    fn test_redirect_requires_registration() {
        let mut registry = ClassRegistry::new();
        assert_eq!(
            registry.redirect("Nope", "Other"),
            Err(ClassError::UndefinedOverrideTarget("Nope".to_string()))
        );
    }

    #[test]
    fn test_flags_require_registration() {
        let mut registry = ClassRegistry::new();
        assert!(registry.mark_abstract("Nope").is_err());
        assert!(registry.mark_singleton("Nope").is_err());
        registry.define("Yes").unwrap();
        registry.mark_abstract("Yes").unwrap();
        assert!(registry.is_abstract("Yes"));
        assert!(!registry.is_singleton("Yes"));
        assert!(!registry.is_abstract("Nope"));
    }

    #[test]
    fn test_alias_many_to_one() {
        let mut registry = ClassRegistry::new();
        registry.define("Test.INST1").unwrap();
        registry.alias(&["my.inst1", "inst-one"], "Test.INST1");
        assert_eq!(registry.resolve_alias("my.inst1"), Some("Test.INST1"));
        assert_eq!(registry.find("inst-one").as_deref(), Some("Test.INST1"));
        assert_eq!(registry.find("my.inst2"), None);
    }
}
