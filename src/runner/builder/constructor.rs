//! Instantiation.

use tracing::trace;

use crate::runner::api::Engine;
use crate::runner::builder::accessors::setter_name;
use crate::runner::ds::class_object::ClassRef;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::{Instance, InstanceRef};
use crate::runner::ds::operations::clone::deep_clone;
use crate::runner::ds::value::Value;

/// A composition-only instance: no defaults, no initializer.
pub fn bare_instance(class: &ClassRef) -> InstanceRef {
    Instance::new_ref(class.clone(), true)
}

/// Builds a live instance of `class`.
///
/// Every default is deep-cloned and assigned through its setter when the
/// class has one (so change hooks fire for initial values), otherwise
/// directly. Then the initializer runs with `config`; a class without one
/// gets `config` copied onto its fields.
pub fn instantiate(
    engine: &Engine,
    class: &ClassRef,
    config: Value,
) -> Result<InstanceRef, ClassError> {
    trace!(class = class.name(), "instantiating");
    let instance = Instance::new_ref(class.clone(), false);
    for (field, default) in class.defaults().iter() {
        let value = deep_clone(default);
        match class.method(&setter_name(field)) {
            Some(setter) => {
                setter.invoke(engine, Some(instance.clone()), vec![value])?;
            }
            None => {
                instance.borrow_mut().set(field, value);
            }
        }
    }
    match class.method(&engine.config().init_method) {
        Some(init) => {
            init.invoke(engine, Some(instance.clone()), vec![config])?;
        }
        None => apply_config(&instance, &config),
    }
    Ok(instance)
}

/// Assigns every entry of a plain-object `config`, or every field of an
/// instance used as one, onto the instance. Anything else is ignored.
pub fn apply_config(instance: &InstanceRef, config: &Value) {
    let entries = match config {
        Value::Object(map) => map.borrow().clone(),
        Value::Instance(other) => other.borrow().fields().clone(),
        _ => return,
    };
    let mut target = instance.borrow_mut();
    for (key, value) in entries {
        target.set(&key, value);
    }
}
