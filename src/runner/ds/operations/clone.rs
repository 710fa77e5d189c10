use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::value::{ObjectMap, Value};

/// Copies plain arrays and objects recursively so the result shares no
/// mutable data with the source. Functions, classes, instances and opaque
/// values keep their identity.
pub fn deep_clone(v: &Value) -> Value {
    match v {
        Value::Array(a) => {
            let items = a.borrow().iter().map(deep_clone).collect::<Vec<_>>();
            Value::Array(Rc::new(RefCell::new(items)))
        }
        Value::Object(o) => Value::Object(Rc::new(RefCell::new(deep_clone_map(&o.borrow())))),
        other => other.clone(),
    }
}

pub fn deep_clone_map(map: &ObjectMap) -> ObjectMap {
    map.iter()
        .map(|(k, v)| (k.to_string(), deep_clone(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_nested_data_is_not_shared() {
        let inner = Value::array(vec![Value::from(1), Value::from(2)]);
        let outer = Value::object_from(vec![("list", inner.clone())]);
        let copy = deep_clone(&outer);
        assert_eq!(copy, outer);

        let copied_list = copy.get("list");
        let (a, b) = (inner.as_array().unwrap(), copied_list.as_array().unwrap());
        assert!(!Rc::ptr_eq(a, b));
        b.borrow_mut().push(Value::from(3));
        assert_eq!(a.borrow().len(), 2);
    }
}
