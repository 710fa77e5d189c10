//! Generated getters and setters for `configs` properties.

use std::rc::Rc;

use crate::runner::ds::class_object::Class;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::function_object::{Function, MethodSlot};
use crate::runner::ds::operations::test_and_comparison::is_scalar;
use crate::runner::ds::operations::type_conversion::camel_case;
use crate::runner::ds::value::{ObjectMap, Value};

pub fn getter_name(property: &str) -> String {
    format!("get{}", camel_case(property))
}

pub fn setter_name(property: &str) -> String {
    format!("set{}", camel_case(property))
}

/// For every property: record its default and add `getX`/`setX` unless the
/// class already has a method by that name. Defaults that are objects,
/// arrays or functions are rejected.
pub(crate) fn generate_accessors(class: &mut Class, configs: &ObjectMap) -> Result<(), ClassError> {
    for (property, default) in configs {
        if !is_scalar(default) {
            return Err(ClassError::InvalidAutoProperty(property.to_string()));
        }
        class.defaults.insert(property.to_string(), default.clone());

        let getter = getter_name(property);
        if !class.methods.contains_key(&getter) {
            let slot = MethodSlot::new(&getter, &class.name, make_getter(property));
            class.methods.insert(getter, Rc::new(slot));
        }
        let setter = setter_name(property);
        if !class.methods.contains_key(&setter) {
            let slot = MethodSlot::new(&setter, &class.name, make_setter(property));
            class.methods.insert(setter, Rc::new(slot));
        }
        if !class.accessors.contains(property) {
            class.accessors.push(property.to_string());
        }
    }
    Ok(())
}

fn make_getter(property: &str) -> Function {
    let member = property.to_string();
    Function::new(move |ctx| ctx.get(&member))
}

/// The setter stores the value, then calls the change hook with
/// `(member, new, old)` when the receiver's class defines one. Returns the
/// receiver.
fn make_setter(property: &str) -> Function {
    let member = property.to_string();
    Function::new(move |ctx| {
        let value = ctx.arg(0);
        let old = ctx.set(&member, value.clone())?;
        let this = ctx.this()?;
        let hook = &ctx.engine().config().change_hook;
        let has_hook = this.borrow().class().has_method(hook);
        if has_hook {
            ctx.call_self(hook, vec![Value::from(member.as_str()), value, old])?;
        }
        Ok(Value::Instance(this))
    })
}
