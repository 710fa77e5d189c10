use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::runner::ds::class_object::ClassRef;
use crate::runner::ds::function_object::Function;
use crate::runner::ds::object::InstanceRef;
use crate::runner::ds::operations::clone::deep_clone;
use crate::runner::ds::operations::type_conversion::{to_display_string, TYPE_STR_OBJECT};

/// Insertion-ordered string-keyed map used for plain data objects,
/// definitions and instance fields.
pub type ObjectMap = IndexMap<String, Value>;
pub type ObjectRef = Rc<RefCell<ObjectMap>>;
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Every member, field, argument and configuration entry the engine handles.
///
/// `Array` and `Object` are shared plain data and are the only variants deep
/// cloning recurses into. `Function`, `Class`, `Instance` and `Opaque` are
/// always copied by reference.
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(NumberType),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    Function(Function),
    Class(ClassRef),
    Instance(InstanceRef),
    Opaque(Rc<dyn Any>),
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Undefined => Value::Undefined,
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Number(n) => Value::Number(n.clone()),
            Value::String(s) => Value::String(s.to_string()),
            Value::Array(a) => Value::Array(a.clone()),
            Value::Object(o) => Value::Object(o.clone()),
            Value::Function(f) => Value::Function(f.clone()),
            Value::Class(c) => Value::Class(c.clone()),
            Value::Instance(i) => Value::Instance(i.clone()),
            Value::Opaque(o) => Value::Opaque(o.clone()),
        }
    }
}

impl Value {
    /// A fresh empty plain object.
    pub fn object() -> Self {
        Value::Object(Rc::new(RefCell::new(ObjectMap::new())))
    }

    /// A plain object built from key/value pairs, preserving their order.
    pub fn object_from<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map: ObjectMap = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn opaque<T: Any>(value: T) -> Self {
        Value::Opaque(Rc::new(value))
    }

    pub fn deep_clone(&self) -> Value {
        deep_clone(self)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Truthiness as the definition directives read it (`singleton: true`,
    /// `abstractClass: 1`, an empty string meaning "not set").
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(NumberType::Integer(i)) => *i != 0,
            Value::Number(NumberType::Float(f)) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(NumberType::Integer(i)) => Some(*i),
            Value::Number(NumberType::Float(f)) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(NumberType::Integer(i)) => Some(*i as f64),
            Value::Number(NumberType::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassRef> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&InstanceRef> {
        match self {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Length of an array value, `None` for anything else.
    pub fn len(&self) -> Option<usize> {
        self.as_array().map(|a| a.borrow().len())
    }

    /// Read a key of a plain object or a field of an instance.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(o) => o.borrow().get(key).cloned().unwrap_or(Value::Undefined),
            Value::Instance(i) => i.borrow().get(key),
            _ => Value::Undefined,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_display_string(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Value::Undefined"),
            Value::Null => write!(f, "Value::Null"),
            Value::Boolean(b) => write!(f, "Value::Boolean({})", b),
            Value::Number(n) => write!(f, "Value::Number({:?})", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Array(a) => write!(f, "Value::Array({:?})", a.borrow()),
            Value::Object(o) => write!(f, "Value::Object({:?})", o.borrow()),
            Value::Function(func) => {
                write!(f, "Value::Function(chains_parent: {})", func.chains_parent())
            }
            Value::Class(c) => write!(f, "Value::Class({})", c.name()),
            Value::Instance(i) => match i.try_borrow() {
                Ok(inst) => write!(f, "Value::Instance({} {})", inst.class_name(), inst.id()),
                Err(_) => write!(f, "Value::Instance(<borrowed>)"),
            },
            Value::Opaque(_) => write!(f, "Value::Opaque({})", TYPE_STR_OBJECT),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => a.same_body(b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NumberType {
    Integer(i64),
    Float(f64),
}

impl PartialEq for NumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberType::Integer(a), NumberType::Integer(b)) => a == b,
            (NumberType::Integer(a), NumberType::Float(b)) => (*a as f64) == *b,
            (NumberType::Float(a), NumberType::Integer(b)) => *a == (*b as f64),
            (NumberType::Float(a), NumberType::Float(b)) => a == b,
        }
    }
}

impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Integer(i) => write!(f, "{}", i),
            NumberType::Float(nf) if nf.is_nan() => write!(f, "NaN"),
            NumberType::Float(nf) if nf.is_infinite() => {
                write!(f, "{}", if *nf > 0.0 { "Infinity" } else { "-Infinity" })
            }
            NumberType::Float(nf) => write!(f, "{}", nf),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(NumberType::Integer(i as i64))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(NumberType::Integer(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Number(NumberType::Integer(i as i64))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(NumberType::Float(f))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<ObjectMap> for Value {
    fn from(map: ObjectMap) -> Self {
        Value::Object(Rc::new(RefCell::new(map)))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<ClassRef> for Value {
    fn from(c: ClassRef) -> Self {
        Value::Class(c)
    }
}

impl From<InstanceRef> for Value {
    fn from(i: InstanceRef) -> Self {
        Value::Instance(i)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
