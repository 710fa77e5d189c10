use crate::runner::ds::value::Value;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub const OBJECT_DISPLAY: &str = "[object Object]";
pub const FUNCTION_DISPLAY: &str = "function(){}";

pub fn get_type(v: &Value) -> &'static str {
    match v {
        Value::Undefined => TYPE_STR_UNDEFINED,
        Value::Null => TYPE_STR_NULL,
        Value::Boolean(_) => TYPE_STR_BOOLEAN,
        Value::String(_) => TYPE_STR_STRING,
        Value::Number(_) => TYPE_STR_NUMBER,
        Value::Function(_) | Value::Class(_) => TYPE_STR_FUNCTION,
        Value::Array(_) | Value::Object(_) | Value::Instance(_) | Value::Opaque(_) => {
            TYPE_STR_OBJECT
        }
    }
}

/// The string a value turns into when it is concatenated into a message.
pub fn to_display_string(v: &Value) -> String {
    match v {
        Value::Undefined => TYPE_STR_UNDEFINED.to_string(),
        Value::Null => TYPE_STR_NULL.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.to_string(),
        Value::Array(a) => a
            .borrow()
            .iter()
            .map(|item| match item {
                Value::Undefined | Value::Null => String::new(),
                other => to_display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Function(_) | Value::Class(_) => FUNCTION_DISPLAY.to_string(),
        Value::Object(_) | Value::Instance(_) | Value::Opaque(_) => OBJECT_DISPLAY.to_string(),
    }
}

/// Splits on `-` and `_` and upper-cases the first character of every part:
/// `date_of_birth` -> `DateOfBirth`.
pub fn camel_case(s: &str) -> String {
    s.split(|c| c == '-' || c == '_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("name"), "Name");
        assert_eq!(camel_case("x"), "X");
        assert_eq!(camel_case("date_of_birth"), "DateOfBirth");
        assert_eq!(camel_case("first-name"), "FirstName");
        assert_eq!(camel_case("Already"), "Already");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(to_display_string(&Value::Undefined), "undefined");
        assert_eq!(to_display_string(&Value::from("")), "");
        assert_eq!(to_display_string(&Value::from(1)), "1");
        assert_eq!(to_display_string(&Value::object()), "[object Object]");
        assert_eq!(
            to_display_string(&Value::array(vec![Value::from(1), Value::Null, Value::from("a")])),
            "1,,a"
        );
    }
}
