use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::runner::ds::function_object::MethodSlot;
use crate::runner::ds::identity::ClassId;
use crate::runner::ds::object::InstanceRef;
use crate::runner::ds::value::{ObjectMap, Value};

pub type ClassRef = Rc<Class>;

/// A mixin as composed into a class: the mixin's class and the
/// composition-only instance `CallContext::mixin` hands out.
#[derive(Clone)]
pub struct MixinEntry {
    class: ClassRef,
    instance: InstanceRef,
}

impl MixinEntry {
    pub fn new(class: ClassRef, instance: InstanceRef) -> Self {
        MixinEntry { class, instance }
    }

    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    pub fn instance(&self) -> &InstanceRef {
        &self.instance
    }
}

/// A built class: the constructor and its prototype in one record.
///
/// A `Class` is assembled by the builder pipeline and frozen behind an `Rc`
/// once registered; overrides never mutate it, they register a new class and
/// redirect the name.
pub struct Class {
    pub(crate) id: ClassId,
    pub(crate) name: String,
    pub(crate) parent: Option<ClassRef>,
    /// Own id first, then every ancestor up to the root.
    pub(crate) lineage: Vec<ClassId>,
    /// Lineage plus the capabilities of every composed mixin.
    pub(crate) capabilities: HashSet<ClassId>,
    pub(crate) methods: IndexMap<String, Rc<MethodSlot>>,
    pub(crate) defaults: ObjectMap,
    pub(crate) accessors: Vec<String>,
    pub(crate) mixins: IndexMap<String, MixinEntry>,
    pub(crate) statics: ObjectMap,
}

impl Class {
    pub(crate) fn new(id: ClassId, name: &str) -> Self {
        let mut capabilities = HashSet::new();
        capabilities.insert(id);
        Class {
            id,
            name: name.to_string(),
            parent: None,
            lineage: vec![id],
            capabilities,
            methods: IndexMap::new(),
            defaults: ObjectMap::new(),
            accessors: vec![],
            mixins: IndexMap::new(),
            statics: ObjectMap::new(),
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&ClassRef> {
        self.parent.as_ref()
    }

    pub fn lineage(&self) -> &[ClassId] {
        &self.lineage
    }

    /// True when instances of this class pass an is-a check against `id`,
    /// either through inheritance or through a composed mixin.
    pub fn has_capability(&self, id: ClassId) -> bool {
        self.capabilities.contains(&id)
    }

    pub fn extends(&self, id: ClassId) -> bool {
        self.lineage.contains(&id)
    }

    pub fn method(&self, name: &str) -> Option<&Rc<MethodSlot>> {
        self.methods.get(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &String> {
        self.methods.keys()
    }

    /// Instance-variable defaults, in declaration order.
    pub fn defaults(&self) -> &ObjectMap {
        &self.defaults
    }

    /// Properties that received a generated getter/setter pair.
    pub fn accessors(&self) -> &[String] {
        &self.accessors
    }

    pub fn mixin(&self, local: &str) -> Option<&MixinEntry> {
        self.mixins.get(local)
    }

    pub fn mixin_names(&self) -> impl Iterator<Item = &String> {
        self.mixins.keys()
    }

    pub fn static_member(&self, name: &str) -> Option<&Value> {
        self.statics.get(name)
    }

    pub fn statics(&self) -> &ObjectMap {
        &self.statics
    }
}
