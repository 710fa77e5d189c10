//! Instance creation from names, aliases, spec objects and lists of either.

use crate::runner::api::Engine;
use crate::runner::builder::constructor::instantiate;
use crate::runner::builder::definition::{KEY_ALIAS, KEY_TYPE};
use crate::runner::ds::class_object::ClassRef;
use crate::runner::ds::error::ClassError;
use crate::runner::ds::object::InstanceRef;
use crate::runner::ds::operations::type_conversion::{
    to_display_string, FUNCTION_DISPLAY, OBJECT_DISPLAY,
};
use crate::runner::ds::value::Value;

/// Resolves a canonical name or alias to the constructor it currently
/// points at. Abstract classes are an error, unknown names are `None`.
pub(crate) fn find_class(engine: &Engine, name: &str) -> Result<Option<ClassRef>, ClassError> {
    let resolved = match engine.registry.find(name) {
        Some(resolved) => resolved,
        None => return Ok(None),
    };
    if engine.registry.is_abstract(&resolved) {
        return Err(ClassError::AbstractInstantiation(resolved));
    }
    Ok(engine.constructors.get(&resolved).cloned())
}

/// Creates from any of the accepted call shapes. Arrays produce an array of
/// instances in input order, everything else a single instance.
pub(crate) fn create_value(engine: &Engine, arg1: &Value, arg2: &Value) -> Result<Value, ClassError> {
    match arg1 {
        Value::Array(items) => {
            let items = items.borrow().clone();
            let mut created = Vec::with_capacity(items.len());
            for item in items.iter() {
                created.push(create_value(engine, item, arg2)?);
            }
            Ok(Value::array(created))
        }
        _ => create_one(engine, arg1, arg2).map(Value::Instance),
    }
}

pub(crate) fn create_one(
    engine: &Engine,
    arg1: &Value,
    arg2: &Value,
) -> Result<InstanceRef, ClassError> {
    let (class, config) = match arg1 {
        Value::String(name) => match arg2 {
            Value::Object(_) | Value::Instance(_) => (find_class(engine, name)?, arg2.clone()),
            Value::String(category) => {
                let class = match find_class(engine, name)? {
                    Some(class) => Some(class),
                    None => find_class(engine, &format!("{}.{}", category, name))?,
                };
                (class, Value::object())
            }
            _ => (find_class(engine, name)?, Value::object()),
        },
        Value::Object(_) | Value::Instance(_) => {
            (find_from_spec(engine, arg1, arg2)?, arg1.clone())
        }
        _ => (None, Value::Undefined),
    };
    match class {
        Some(class) => instantiate(engine, &class, config),
        None => Err(ClassError::UnresolvableReference(describe(arg1))),
    }
}

/// A spec names its class with `alias` or `type`. Without a dot in it, an
/// implied category given as the second argument is prepended.
fn find_from_spec(engine: &Engine, spec: &Value, category: &Value) -> Result<Option<ClassRef>, ClassError> {
    let alias = spec_name(spec, KEY_ALIAS, KEY_TYPE);
    if let Some(alias) = &alias {
        if let Some(class) = find_class(engine, alias)? {
            return Ok(Some(class));
        }
    }
    if let Value::String(category) = category {
        if let Some(name) = spec_name(spec, KEY_TYPE, KEY_ALIAS) {
            let implied = if name.contains('.') {
                name
            } else {
                format!("{}.{}", category, name)
            };
            return find_class(engine, &implied);
        }
    }
    Ok(None)
}

fn spec_name(spec: &Value, first: &str, second: &str) -> Option<String> {
    [first, second].iter().find_map(|key| match spec.get(key) {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// How the failing argument is shown in an unresolvable-reference error.
fn describe(arg: &Value) -> String {
    match arg {
        Value::Object(_) | Value::Instance(_) => {
            for key in [KEY_TYPE, KEY_ALIAS].iter() {
                let named = arg.get(key);
                if named.is_truthy() {
                    return to_display_string(&named);
                }
            }
            OBJECT_DISPLAY.to_string()
        }
        Value::Function(_) | Value::Class(_) => FUNCTION_DISPLAY.to_string(),
        other => to_display_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_matches_error_contract() {
        assert_eq!(describe(&Value::Undefined), "undefined");
        assert_eq!(describe(&Value::from("")), "");
        assert_eq!(describe(&Value::from(1)), "1");
        assert_eq!(describe(&Value::object()), "[object Object]");
        assert_eq!(
            describe(&Value::object_from(vec![("alias", "x.y")])),
            "x.y"
        );
        assert_eq!(
            describe(&Value::object_from(vec![("alias", "x.y"), ("type", "t")])),
            "t"
        );
    }

    #[test]
    fn test_describe_reads_instance_fields() {
        let engine = Engine::new();
        let inst = instantiate(&engine, engine.root_class(), Value::Undefined).unwrap();
        assert_eq!(describe(&Value::Instance(inst.clone())), "[object Object]");
        inst.borrow_mut().set("alias", Value::from("x.y"));
        assert_eq!(describe(&Value::Instance(inst)), "x.y");
    }
}
