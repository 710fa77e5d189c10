//! Class definitions and their normalization into directives and members.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::{CallContext, Function};
use crate::runner::ds::operations::clone::{deep_clone, deep_clone_map};
use crate::runner::ds::value::{ObjectMap, Value};

pub const KEY_EXTEND: &str = "extend";
pub const KEY_OVERRIDE: &str = "override";
pub const KEY_SINGLETON: &str = "singleton";
pub const KEY_ABSTRACT: &str = "abstractClass";
pub const KEY_REQUIRES: &str = "requires";
pub const KEY_CONTROLLERS: &str = "controllers";
pub const KEY_MIXINS: &str = "mixins";
pub const KEY_CONFIGS: &str = "configs";
pub const KEY_STATICS: &str = "statics";
pub const KEY_ALIAS: &str = "alias";
pub const KEY_TYPE: &str = "type";

lazy_static! {
    static ref DIRECTIVES: HashSet<&'static str> = [
        KEY_EXTEND,
        KEY_OVERRIDE,
        KEY_SINGLETON,
        KEY_ABSTRACT,
        KEY_REQUIRES,
        KEY_CONTROLLERS,
        KEY_MIXINS,
        KEY_CONFIGS,
        KEY_STATICS,
        KEY_ALIAS,
        KEY_TYPE,
    ]
    .iter()
    .cloned()
    .collect();
}

/// Returns true for keys that steer the class builder instead of becoming
/// members.
pub fn is_directive(key: &str) -> bool {
    DIRECTIVES.contains(key)
}

/// A declarative class definition.
///
/// Internally a definition is the same string-keyed map a raw definition
/// object would be, so definitions built with the builder methods and
/// definitions assembled as `Value` maps normalize identically.
///
/// ```
/// use blend::runner::builder::definition::ClassDefinition;
/// use blend::runner::ds::value::Value;
///
/// let def = ClassDefinition::new()
///     .extend("Test.Person")
///     .config("nickname", Value::Null)
///     .method("greet", |ctx| {
///         let name = ctx.call_self("getNickname", vec![])?;
///         Ok(Value::from(format!("hi {}", name)))
///     });
/// assert!(def.get("extend").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClassDefinition {
    entries: ObjectMap,
}

impl ClassDefinition {
    pub fn new() -> Self {
        ClassDefinition::default()
    }

    /// Wraps a raw definition map. Directive keys keep their raw names
    /// (`extend`, `override`, `abstractClass`, `mixins`, ...).
    pub fn from_map(entries: ObjectMap) -> Self {
        ClassDefinition { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &ObjectMap {
        &self.entries
    }

    pub fn into_map(self) -> ObjectMap {
        self.entries
    }

    pub fn extend(self, parent: &str) -> Self {
        self.member(KEY_EXTEND, parent)
    }

    pub fn overrides(self, target: &str) -> Self {
        self.member(KEY_OVERRIDE, target)
    }

    pub fn singleton(self) -> Self {
        self.member(KEY_SINGLETON, true)
    }

    pub fn abstract_class(self) -> Self {
        self.member(KEY_ABSTRACT, true)
    }

    pub fn requires(self, class_name: &str) -> Self {
        self.push_to(KEY_REQUIRES, Value::from(class_name))
    }

    pub fn controllers(self, class_name: &str) -> Self {
        self.push_to(KEY_CONTROLLERS, Value::from(class_name))
    }

    pub fn alias(self, alias: &str) -> Self {
        self.push_to(KEY_ALIAS, Value::from(alias))
    }

    pub fn mixin(self, local: &str, class_name: &str) -> Self {
        self.insert_into(KEY_MIXINS, local, Value::from(class_name))
    }

    /// Declares an auto-property with a generated getter and setter.
    pub fn config<V: Into<Value>>(self, property: &str, default: V) -> Self {
        self.insert_into(KEY_CONFIGS, property, default.into())
    }

    pub fn static_member<V: Into<Value>>(self, name: &str, value: V) -> Self {
        self.insert_into(KEY_STATICS, name, value.into())
    }

    /// A data member (instance-variable default) or a prebuilt [`Function`].
    pub fn member<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.entries.insert(name.to_string(), value.into());
        self
    }

    /// A method that replaces any inherited method of the same name.
    pub fn method<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Value, ClassError> + 'static,
    {
        self.member(name, Function::new(body))
    }

    /// A method that can reach the inherited method of the same name through
    /// `call_parent`.
    pub fn chained<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Value, ClassError> + 'static,
    {
        self.member(name, Function::chained(body))
    }

    // Directive containers are copied before they change, so clones of a
    // definition never see each other's additions.
    fn push_to(mut self, key: &str, value: Value) -> Self {
        let next = match self.entries.get(key) {
            Some(Value::Array(items)) => {
                let mut items = items.borrow().clone();
                items.push(value);
                Value::array(items)
            }
            Some(Value::Undefined) | Some(Value::Null) | None => value,
            Some(existing) => Value::array(vec![existing.clone(), value]),
        };
        self.entries.insert(key.to_string(), next);
        self
    }

    fn insert_into(mut self, key: &str, name: &str, value: Value) -> Self {
        let mut map = match self.entries.get(key) {
            Some(Value::Object(map)) => map.borrow().clone(),
            _ => ObjectMap::new(),
        };
        map.insert(name.to_string(), value);
        self.entries.insert(key.to_string(), Value::from(map));
        self
    }
}

/// What `define_class` accepts as a definition: nothing, a definition, or a
/// factory that produces one (so methods can close over private state).
pub enum DefinitionSource {
    Empty,
    Definition(ClassDefinition),
    Factory(Box<dyn FnOnce() -> ClassDefinition>),
}

impl DefinitionSource {
    pub fn factory<F>(f: F) -> Self
    where
        F: FnOnce() -> ClassDefinition + 'static,
    {
        DefinitionSource::Factory(Box::new(f))
    }

    pub(crate) fn into_definition(self) -> ClassDefinition {
        match self {
            DefinitionSource::Empty => ClassDefinition::new(),
            DefinitionSource::Definition(def) => def,
            DefinitionSource::Factory(f) => f(),
        }
    }
}

impl From<ClassDefinition> for DefinitionSource {
    fn from(def: ClassDefinition) -> Self {
        DefinitionSource::Definition(def)
    }
}

impl From<ObjectMap> for DefinitionSource {
    fn from(map: ObjectMap) -> Self {
        DefinitionSource::Definition(ClassDefinition::from_map(map))
    }
}

impl From<Option<ClassDefinition>> for DefinitionSource {
    fn from(def: Option<ClassDefinition>) -> Self {
        match def {
            Some(def) => DefinitionSource::Definition(def),
            None => DefinitionSource::Empty,
        }
    }
}

/// A definition split into directives and members. Owns deep copies of
/// everything, so nothing the caller still holds is aliased by the class.
#[derive(Debug, Default)]
pub struct NormalizedDefinition {
    pub class_name: String,
    pub extend: Option<String>,
    pub override_target: Option<String>,
    pub singleton: bool,
    pub abstract_class: bool,
    pub requires: Vec<String>,
    pub controllers: Vec<String>,
    /// Local name -> mixin class name.
    pub mixins: IndexMap<String, String>,
    pub configs: ObjectMap,
    pub statics: ObjectMap,
    pub aliases: Vec<String>,
    pub methods: IndexMap<String, Function>,
    /// Instance-variable defaults.
    pub data: ObjectMap,
}

impl NormalizedDefinition {
    /// Every class name this definition refers to, in directive order:
    /// extend, requires, mixins, controllers, override.
    pub fn dependencies(&self) -> Vec<String> {
        let mut names = vec![];
        names.extend(self.extend.iter().cloned());
        names.extend(self.requires.iter().cloned());
        names.extend(self.mixins.values().cloned());
        names.extend(self.controllers.iter().cloned());
        names.extend(self.override_target.iter().cloned());
        names
    }
}

pub fn normalize(
    class_name: &str,
    definition: &ClassDefinition,
) -> Result<NormalizedDefinition, ClassError> {
    let entries = deep_clone_map(definition.entries());
    let mut def = NormalizedDefinition {
        class_name: class_name.to_string(),
        ..NormalizedDefinition::default()
    };
    for (key, value) in entries {
        match key.as_str() {
            KEY_EXTEND => def.extend = class_target(KEY_EXTEND, &value)?,
            KEY_OVERRIDE => def.override_target = class_target(KEY_OVERRIDE, &value)?,
            KEY_SINGLETON => def.singleton = value.is_truthy(),
            KEY_ABSTRACT => def.abstract_class = value.is_truthy(),
            KEY_REQUIRES => def.requires = class_list(KEY_REQUIRES, &value)?,
            KEY_CONTROLLERS => def.controllers = class_list(KEY_CONTROLLERS, &value)?,
            KEY_ALIAS | KEY_TYPE => def.aliases.extend(string_list(&key, &value)?),
            KEY_MIXINS => {
                for (local, target) in object_entries(KEY_MIXINS, &value)? {
                    match class_target(KEY_MIXINS, &target)? {
                        Some(name) => {
                            def.mixins.insert(local, name);
                        }
                        None => {
                            return Err(ClassError::InvalidDefinition(format!(
                                "mixin {} of {} has no class",
                                local, class_name
                            )))
                        }
                    }
                }
            }
            KEY_CONFIGS => def.configs = object_entries(KEY_CONFIGS, &value)?,
            KEY_STATICS => def.statics = object_entries(KEY_STATICS, &value)?,
            _ => match value {
                Value::Function(f) => {
                    def.methods.insert(key, f);
                }
                other => {
                    def.data.insert(key, other);
                }
            },
        }
    }
    Ok(def)
}

fn class_target(directive: &str, value: &Value) -> Result<Option<String>, ClassError> {
    match value {
        Value::Undefined | Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        Value::Class(c) => Ok(Some(c.name().to_string())),
        Value::Boolean(false) => Ok(None),
        other => Err(ClassError::InvalidDefinition(format!(
            "{} must name a class, got {}",
            directive, other
        ))),
    }
}

fn class_list(directive: &str, value: &Value) -> Result<Vec<String>, ClassError> {
    match value {
        Value::Array(items) => {
            let mut names = vec![];
            for item in items.borrow().iter() {
                names.extend(class_target(directive, item)?);
            }
            Ok(names)
        }
        single => Ok(class_target(directive, single)?.into_iter().collect()),
    }
}

fn string_list(directive: &str, value: &Value) -> Result<Vec<String>, ClassError> {
    match value {
        Value::Undefined | Value::Null => Ok(vec![]),
        Value::String(s) if s.is_empty() => Ok(vec![]),
        Value::String(s) => Ok(vec![s.to_string()]),
        Value::Array(items) => items
            .borrow()
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.to_string()),
                other => Err(ClassError::InvalidDefinition(format!(
                    "{} entries must be strings, got {}",
                    directive, other
                ))),
            })
            .collect(),
        other => Err(ClassError::InvalidDefinition(format!(
            "{} must be a string or a list of strings, got {}",
            directive, other
        ))),
    }
}

fn object_entries(directive: &str, value: &Value) -> Result<ObjectMap, ClassError> {
    match value {
        Value::Undefined | Value::Null => Ok(ObjectMap::new()),
        Value::Object(map) => Ok(map
            .borrow()
            .iter()
            .map(|(k, v)| (k.to_string(), deep_clone(v)))
            .collect()),
        other => Err(ClassError::InvalidDefinition(format!(
            "{} must be an object, got {}",
            directive, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_directives_are_separated_from_members() {
        let def = ClassDefinition::new()
            .extend("Test.Base")
            .requires("Test.Dep")
            .mixin("mx", "Test.Mixin")
            .config("firstname", "john")
            .static_member("UP", 1)
            .alias("my.thing")
            .member("ivar", Value::array(vec![]))
            .method("fn", |_| Ok(Value::Undefined));
        let n = normalize("Test.Thing", &def).unwrap();
        assert_eq!(n.class_name, "Test.Thing");
        assert_eq!(n.extend.as_deref(), Some("Test.Base"));
        assert_eq!(n.requires, vec!["Test.Dep"]);
        assert_eq!(n.mixins.get("mx").map(|s| s.as_str()), Some("Test.Mixin"));
        assert_eq!(n.configs.get("firstname"), Some(&Value::from("john")));
        assert_eq!(n.statics.get("UP"), Some(&Value::from(1)));
        assert_eq!(n.aliases, vec!["my.thing"]);
        assert!(n.methods.contains_key("fn"));
        assert_eq!(n.data.keys().collect::<Vec<_>>(), vec!["ivar"]);
        assert_eq!(
            n.dependencies(),
            vec!["Test.Base", "Test.Dep", "Test.Mixin"]
        );
    }

    #[test]
    fn test_raw_map_with_type_synonym_and_alias_list() {
        let mut raw = ObjectMap::new();
        raw.insert("type".to_string(), Value::from("a.one"));
        raw.insert(
            "alias".to_string(),
            Value::array(vec![Value::from("a.two"), Value::from("a.three")]),
        );
        raw.insert("singleton".to_string(), Value::from(1));
        let n = normalize("A", &ClassDefinition::from_map(raw)).unwrap();
        assert_eq!(n.aliases, vec!["a.one", "a.two", "a.three"]);
        assert!(n.singleton);
        assert!(!n.abstract_class);
    }

    #[test]
    fn test_normalized_data_is_a_copy() {
        let list = Value::array(vec![Value::from(1)]);
        let def = ClassDefinition::new().member("list", list.clone());
        let n = normalize("A", &def).unwrap();
        list.as_array().unwrap().borrow_mut().push(Value::from(2));
        assert_eq!(n.data.get("list").and_then(|v| v.len()), Some(1));
    }

    #[test]
    fn test_bad_directive_values_are_rejected() {
        let def = ClassDefinition::new().member("extend", 12);
        assert!(matches!(
            normalize("A", &def),
            Err(ClassError::InvalidDefinition(_))
        ));
        let def = ClassDefinition::new().member("configs", "nope");
        assert!(normalize("A", &def).is_err());
    }

    #[test]
    fn test_clone_can_be_extended_independently() {
        let base = ClassDefinition::new()
            .config("a", 1)
            .requires("Test.Dep")
            .mixin("m1", "Test.M1")
            .alias("x.base");
        let derived = base
            .clone()
            .config("b", 2)
            .requires("Test.Other")
            .mixin("m2", "Test.M2")
            .alias("x.derived")
            .static_member("S", 1);

        let b = normalize("Test.Base", &base).unwrap();
        assert_eq!(b.configs.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(b.requires, vec!["Test.Dep"]);
        assert_eq!(b.mixins.keys().collect::<Vec<_>>(), vec!["m1"]);
        assert_eq!(b.aliases, vec!["x.base"]);
        assert!(b.statics.is_empty());

        let d = normalize("Test.Derived", &derived).unwrap();
        assert_eq!(d.configs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(d.requires, vec!["Test.Dep", "Test.Other"]);
        assert_eq!(d.aliases, vec!["x.base", "x.derived"]);
    }

    #[test]
    fn test_factory_source_runs_once() {
        let source = DefinitionSource::factory(|| ClassDefinition::new().member("x", 1));
        let def = source.into_definition();
        assert_eq!(def.get("x"), Some(&Value::from(1)));
    }
}
