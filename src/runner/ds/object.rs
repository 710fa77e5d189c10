use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::class_object::ClassRef;
use crate::runner::ds::identity::{ClassId, InstanceId};
use crate::runner::ds::value::{ObjectMap, Value};

pub type InstanceRef = Rc<RefCell<Instance>>;

/// A live object: its class and its own copy of every field.
pub struct Instance {
    id: InstanceId,
    class: ClassRef,
    fields: ObjectMap,
    bare: bool,
}

impl Instance {
    pub(crate) fn new_ref(class: ClassRef, bare: bool) -> InstanceRef {
        Rc::new(RefCell::new(Instance {
            id: InstanceId::new(),
            class,
            fields: ObjectMap::new(),
            bare,
        }))
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// Fully-qualified name of the class that constructed this instance.
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Composition-only instances skip defaults and initialization.
    pub fn is_bare(&self) -> bool {
        self.bare
    }

    pub fn get(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or(Value::Undefined)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Assigns `field` and returns what it held before (`undefined` if unset).
    pub fn set(&mut self, field: &str, value: Value) -> Value {
        self.fields
            .insert(field.to_string(), value)
            .unwrap_or(Value::Undefined)
    }

    pub fn fields(&self) -> &ObjectMap {
        &self.fields
    }

    pub fn is_a(&self, id: ClassId) -> bool {
        self.class.has_capability(id)
    }
}
