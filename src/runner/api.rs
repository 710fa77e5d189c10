//! The engine façade: owns the registry, the namespace tree, the built
//! classes and the resolvers, and exposes definition, creation, invocation
//! and query operations.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::debug;

use crate::parser::QualifiedName;
use crate::runner::builder::constructor::apply_config;
use crate::runner::builder::definition::DefinitionSource;
use crate::runner::builder::factory;
use crate::runner::builder::overrides::{self, PostProcess};
use crate::runner::builder::registry::ClassRegistry;
use crate::runner::ds::class_object::{Class, ClassRef};
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::{Function, MethodSlot};
use crate::runner::ds::identity::ClassId;
use crate::runner::ds::namespace::Namespace;
use crate::runner::ds::object::InstanceRef;
use crate::runner::ds::value::Value;
use crate::runner::loader::config::EngineConfig;
use crate::runner::loader::resolver::ClassResolver;

/// A self-contained class system.
///
/// Every engine starts with the root class (by default `Blend.BaseClass`)
/// whose `init(config)` copies the config object onto the new instance.
/// Engines share nothing, so independent engines never see each other's
/// classes.
pub struct Engine {
    config: EngineConfig,
    pub(crate) registry: ClassRegistry,
    pub(crate) namespace: Namespace,
    /// Canonical class name -> the class built for it. Unaffected by
    /// override redirects.
    pub(crate) constructors: HashMap<String, ClassRef>,
    pub(crate) resolvers: Vec<Rc<dyn ClassResolver>>,
    /// Dependencies currently being loaded.
    pub(crate) loading: HashSet<String>,
    root: ClassRef,
    last_class_id: ClassId,
}

impl Engine {
    /// An engine with the default configuration.
    pub fn new() -> Self {
        Engine::build(EngineConfig::default())
    }

    /// An engine with a custom configuration. The root class name must be a
    /// valid qualified name.
    pub fn with_config(config: EngineConfig) -> Result<Self, ClassError> {
        QualifiedName::parse(&config.root_class)?;
        Ok(Engine::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let root = Rc::new(root_class(&config));
        let mut engine = Engine {
            config,
            registry: ClassRegistry::new(),
            namespace: Namespace::new(),
            constructors: HashMap::new(),
            resolvers: vec![],
            loading: HashSet::new(),
            root: root.clone(),
            last_class_id: ClassId::ROOT,
        };
        let root_name = engine.config.root_class.to_string();
        if let Ok(qualified) = QualifiedName::parse(&root_name) {
            engine.namespace.publish(&qualified, Value::Class(root.clone()));
        }
        engine.constructors.insert(root_name, root);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn root_class(&self) -> &ClassRef {
        &self.root
    }

    pub(crate) fn next_class_id(&mut self) -> ClassId {
        self.last_class_id = self.last_class_id.next();
        self.last_class_id
    }

    /// Add a resolver. Resolvers are queried in the order they were added.
    pub fn add_resolver<R: ClassResolver + 'static>(&mut self, resolver: R) {
        debug!(resolver = resolver.name(), "added class resolver");
        self.resolvers.push(Rc::new(resolver));
    }

    // ── Definition ──────────────────────────────────────────────

    /// Define a class.
    ///
    /// `source` is a [`ClassDefinition`](crate::runner::builder::definition::ClassDefinition),
    /// a [`DefinitionSource`] (possibly a factory closure) or a raw map. The
    /// optional `post_process` callback receives the value published under
    /// the class name (the class, or the instance for a singleton); it fires
    /// only for classes defined with `extend` or no directive at all.
    pub fn define_class<S: Into<DefinitionSource>>(
        &mut self,
        name: &str,
        source: S,
        post_process: Option<PostProcess<'_>>,
    ) -> Result<(), ClassError> {
        overrides::define_class(self, name, source.into(), post_process)
    }

    // ── Creation ────────────────────────────────────────────────

    /// `create("Name", config)`: by canonical name or full alias. A config
    /// that is neither a plain object nor an instance is ignored.
    pub fn create<V: Into<Value>>(&self, name: &str, config: V) -> Result<InstanceRef, ClassError> {
        factory::create_one(self, &Value::from(name), &config.into())
    }

    /// `create("alias", "category")`: tries `name`, then `category.name`.
    pub fn create_in(&self, name: &str, category: &str) -> Result<InstanceRef, ClassError> {
        factory::create_one(self, &Value::from(name), &Value::from(category))
    }

    /// `create({type|alias, ..config}, category)`: the spec object is the
    /// config; `type` or `alias` names the class.
    pub fn create_from_spec(
        &self,
        spec: &Value,
        category: Option<&str>,
    ) -> Result<InstanceRef, ClassError> {
        factory::create_one(self, spec, &Value::from(category))
    }

    /// Creates one instance per item (names or spec objects), in order.
    pub fn create_all(
        &self,
        items: &[Value],
        category: Option<&str>,
    ) -> Result<Vec<InstanceRef>, ClassError> {
        let category = Value::from(category);
        items
            .iter()
            .map(|item| factory::create_one(self, item, &category))
            .collect()
    }

    /// The fully dynamic form, accepting every call shape including arrays.
    pub fn create_value(&self, arg1: &Value, arg2: &Value) -> Result<Value, ClassError> {
        factory::create_value(self, arg1, arg2)
    }

    // ── Invocation ──────────────────────────────────────────────

    /// Call `method` on `instance`, dispatching from the instance's class.
    pub fn call(
        &self,
        instance: &InstanceRef,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, ClassError> {
        let class = instance.borrow().class().clone();
        let slot = class
            .method(method)
            .cloned()
            .ok_or_else(|| ClassError::MethodNotFound {
                class: class.name().to_string(),
                method: method.to_string(),
            })?;
        slot.invoke(self, Some(instance.clone()), args)
    }

    /// Call a static function member of the class registered as `class_name`.
    pub fn call_static(
        &self,
        class_name: &str,
        member: &str,
        args: Vec<Value>,
    ) -> Result<Value, ClassError> {
        let class = self
            .class(class_name)
            .ok_or_else(|| ClassError::UnknownClass(class_name.to_string()))?;
        match class.static_member(member) {
            Some(Value::Function(function)) => {
                let slot = Rc::new(MethodSlot::new(member, class.name(), function.clone()));
                slot.invoke(self, None, args)
            }
            _ => Err(ClassError::MethodNotFound {
                class: class.name().to_string(),
                method: member.to_string(),
            }),
        }
    }

    pub fn static_member(&self, class_name: &str, member: &str) -> Option<Value> {
        self.class(class_name)
            .and_then(|class| class.static_member(member).cloned())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn is_class_defined(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn is_abstract(&self, name: &str) -> bool {
        self.registry.is_abstract(name)
    }

    /// True when `instance` is an instance of the class built for `name`
    /// (a canonical name or alias), through inheritance or a mixin.
    pub fn is_instance_of(&self, instance: &InstanceRef, name: &str) -> bool {
        let class = self.class(name).or_else(|| {
            self.registry
                .resolve_alias(name)
                .and_then(|canonical| self.class(canonical))
        });
        match class {
            Some(class) => instance.borrow().is_a(class.id()),
            None => false,
        }
    }

    /// The class built for exactly `name`, ignoring overrides.
    pub fn class(&self, name: &str) -> Option<ClassRef> {
        self.constructors.get(name.trim()).cloned()
    }

    /// The class `name` currently resolves to, following overrides.
    pub fn resolve_class(&self, name: &str) -> Option<ClassRef> {
        let name = name.trim();
        let target = self
            .registry
            .lookup(name)
            .unwrap_or_else(|| name.to_string());
        self.constructors.get(&target).cloned()
    }

    /// Whatever is published at a dotted path: a class or a singleton.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let qualified = QualifiedName::parse(path).ok()?;
        self.namespace.lookup(&qualified)
    }

    /// Ensures the namespace path exists and lists the names under it.
    pub fn namespace(&mut self, path: &str) -> Result<Vec<String>, ClassError> {
        if path.trim().is_empty() {
            return Ok(self.namespace.ensure(&[]).child_names());
        }
        let qualified = QualifiedName::parse(path)?;
        Ok(self.namespace.ensure(qualified.segments()).child_names())
    }

    /// The instance published for a singleton class.
    pub fn singleton(&self, name: &str) -> Option<InstanceRef> {
        match self.lookup(name) {
            Some(Value::Instance(instance)) => Some(instance),
            _ => None,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

fn root_class(config: &EngineConfig) -> Class {
    let mut root = Class::new(ClassId::ROOT, &config.root_class);
    let init = Function::new(|ctx| {
        let this = ctx.this()?;
        apply_config(&this, &ctx.arg(0));
        Ok(Value::Undefined)
    });
    root.methods.insert(
        config.init_method.to_string(),
        Rc::new(MethodSlot::new(&config.init_method, &config.root_class, init)),
    );
    root
}
