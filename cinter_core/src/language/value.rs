use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::rc::Rc;
use derive_more::Debug;
use serde::ser::{Serialize, SerializeMap, Serializer};
use crate::language::environment::Environment;
use crate::language::error::Result;

/// Host callable. Receives the evaluated arguments and the calling environment.
pub type NativeFn = Rc<dyn Fn(Vec<Value>, &mut Environment) -> Result<Value>>;

pub type Properties = BTreeMap<String, Value>;

/// Objects are handles: every copy of the value refers to the same mapping.
pub type ObjectRef = Rc<RefCell<Properties>>;

// Nested objects deeper than this render as `{...}`, which also stops self-referencing objects.
const MAX_RENDER_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct NativeFunction {
    pub name: String,
    #[debug(skip)]
    callable: NativeFn,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(Vec<Value>, &mut Environment) -> Result<Value> + 'static,
    {
        NativeFunction {
            name: name.into(),
            callable: Rc::new(callable),
        }
    }

    pub fn call(&self, args: Vec<Value>, env: &mut Environment) -> Result<Value> {
        (self.callable)(args, env)
    }
}

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Object(ObjectRef),
    NativeFunction(NativeFunction),
}

impl Value {
    pub fn object(properties: Properties) -> Self {
        Value::Object(Rc::new(RefCell::new(properties)))
    }

    pub fn empty_object() -> Self {
        Value::object(Properties::new())
    }

    pub fn native<F>(name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(Vec<Value>, &mut Environment) -> Result<Value> + 'static,
    {
        Value::NativeFunction(NativeFunction::new(name, callable))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Object(_) => "object",
            Value::NativeFunction(_) => "native function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Reads one property of an object value. `None` for non-objects and missing keys.
    pub fn get_property(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(properties) => properties.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// True when `target` is this object or is reachable through its properties.
    pub fn reaches(&self, target: &ObjectRef) -> bool {
        let mut visited = HashSet::new();
        self.reaches_from(target, &mut visited)
    }

    fn reaches_from(&self, target: &ObjectRef, visited: &mut HashSet<*const RefCell<Properties>>) -> bool {
        let Value::Object(properties) = self else {
            return false;
        };
        if Rc::ptr_eq(properties, target) {
            return true;
        }
        if !visited.insert(Rc::as_ptr(properties)) {
            return false;
        }
        properties.borrow().values().any(|value| value.reaches_from(target, visited))
    }

    // Pairs already under comparison count as equal, so cyclic objects terminate.
    fn equals(&self, other: &Value, in_progress: &mut HashSet<(*const RefCell<Properties>, *const RefCell<Properties>)>) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) || !in_progress.insert((Rc::as_ptr(a), Rc::as_ptr(b))) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.get(key).is_some_and(|other| value.equals(other, in_progress))
                    })
            }
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Rc::ptr_eq(&a.callable, &b.callable),
            _ => false,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::NativeFunction(function) => write!(f, "<native fn {}>", function.name),
            Value::Object(properties) => {
                let properties = properties.borrow();
                if properties.is_empty() {
                    return write!(f, "{{}}");
                }
                if depth >= MAX_RENDER_DEPTH {
                    return write!(f, "{{...}}");
                }
                write!(f, "{{ ")?;
                for (i, (key, value)) in properties.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", key)?;
                    value.render(f, depth + 1)?;
                }
                write!(f, " }}")
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, &mut HashSet::new())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

// Carries the nesting depth through serde so deep or cyclic objects stop at `{...}`.
struct Nested<'a> {
    value: &'a Value,
    depth: usize,
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            // JSON has no inf/NaN
            Value::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::NativeFunction(function) => {
                serializer.serialize_str(&format!("<native fn {}>", function.name))
            }
            Value::Object(properties) => {
                let properties = properties.borrow();
                if !properties.is_empty() && self.depth >= MAX_RENDER_DEPTH {
                    return serializer.serialize_str("{...}");
                }
                let mut map = serializer.serialize_map(Some(properties.len()))?;
                for (key, value) in properties.iter() {
                    map.serialize_entry(key, &Nested { value, depth: self.depth + 1 })?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Nested { value: self, depth: 0 }.serialize(serializer)
    }
}
