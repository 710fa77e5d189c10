use crate::runner::ds::value::Value;

/// `null` or `undefined`.
pub fn is_null(v: &Value) -> bool {
    matches!(v, Value::Null | Value::Undefined)
}

pub fn is_string(v: &Value) -> bool {
    matches!(v, Value::String(_))
}

pub fn is_array(v: &Value) -> bool {
    matches!(v, Value::Array(_))
}

/// Anything object-like that is not an array or callable: plain objects,
/// instances and opaque host values.
pub fn is_object(v: &Value) -> bool {
    matches!(v, Value::Object(_) | Value::Instance(_) | Value::Opaque(_))
}

/// Behavior members and class handles.
pub fn is_function(v: &Value) -> bool {
    matches!(v, Value::Function(_) | Value::Class(_))
}

/// Values that can back a generated getter/setter pair.
pub fn is_scalar(v: &Value) -> bool {
    !(is_object(v) || is_array(v) || is_function(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_classification() {
        assert!(is_scalar(&Value::Null));
        assert!(is_scalar(&Value::from(3)));
        assert!(is_scalar(&Value::from("x")));
        assert!(!is_scalar(&Value::object()));
        assert!(!is_scalar(&Value::array(vec![])));
        assert!(!is_scalar(&Value::opaque(12u8)));
    }

    #[test]
    fn test_object_is_not_array() {
        assert!(is_object(&Value::object()));
        assert!(!is_object(&Value::array(vec![])));
        assert!(!is_object(&Value::Null));
        assert!(is_array(&Value::array(vec![Value::from(1)])));
    }

    #[test]
    fn test_null_covers_undefined() {
        assert!(is_null(&Value::Null));
        assert!(is_null(&Value::Undefined));
        assert!(!is_null(&Value::from("")));
    }
}
