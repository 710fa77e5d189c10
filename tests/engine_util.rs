#![allow(dead_code)]

extern crate blend;

use blend::runner::api::Engine;
use blend::runner::builder::definition::ClassDefinition;
use blend::runner::ds::error::ClassError;
use blend::runner::ds::object::InstanceRef;
use blend::runner::ds::value::Value;

/// Define a class without a post-process callback, panicking on failure.
pub fn define(engine: &mut Engine, name: &str, def: ClassDefinition) {
    engine
        .define_class(name, def, None)
        .unwrap_or_else(|e| panic!("defining {} failed: {}", name, e));
}

/// Call a method and unwrap the result.
pub fn call(engine: &Engine, inst: &InstanceRef, method: &str, args: Vec<Value>) -> Value {
    engine
        .call(inst, method, args)
        .unwrap_or_else(|e| panic!("calling {} failed: {}", method, e))
}

pub fn field(inst: &InstanceRef, name: &str) -> Value {
    inst.borrow().get(name)
}

pub fn error_message<T>(result: Result<T, ClassError>) -> String {
    match result {
        Ok(_) => panic!("expected an error"),
        Err(e) => e.to_string(),
    }
}

/// The message `create` reports when nothing matches.
pub fn unresolvable(repr: &str) -> String {
    format!(
        "Unable to instantiate from [{}] Have you defined the class or included in the requires:[] property?",
        repr
    )
}

pub fn upper(v: Value) -> String {
    v.to_string().to_uppercase()
}
