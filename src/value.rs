use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};

use crate::error::HostError;

/// A value produced by evaluating an options record, or supplied by the
/// host through a scope.
///
/// # Examples
///
/// ```
/// use options_record::{Object, Value};
///
/// let mut options = Object::new();
/// options.insert("title", Value::from("Inbox"));
/// options.insert("pageSize", Value::from(20.0));
///
/// // [1, , 3]
/// let sparse = Value::Array(vec![Some(Value::from(1.0)), None, Some(Value::from(3.0))]);
/// # let _ = (options, sparse);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Result of resolving a name no scope binds
    #[default]
    Undefined,

    Null,

    Boolean(bool),

    Number(f64),

    String(String),

    /// Array whose `None` positions are holes
    Array(Vec<Option<Value>>),

    /// Object preserving insertion order
    Object(Object),

    /// Host function; must be approved before it can be a result
    Function(NativeFunction),

    /// The host's global object; must be approved before it can be a result
    Global(GlobalObject),
}

impl Value {
    /// Returns a human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Global(_) => "global object",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Whether the security gate must approve this value
    pub fn is_capability(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Global(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Option<Value>]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Property of an object value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
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

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values.into_iter().map(Some).collect())
    }
}

impl From<NativeFunction> for Value {
    fn from(f: NativeFunction) -> Self {
        Value::Function(f)
    }
}

impl From<GlobalObject> for Value {
    fn from(g: GlobalObject) -> Self {
        Value::Global(g)
    }
}

/// String-keyed map that keeps keys in insertion order.
///
/// Inserting an existing key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

type HostFn = dyn Fn(&str) -> Result<Value, HostError> + Send + Sync;

/// A host function taking one string argument.
///
/// Clones share identity: approving one clone approves them all.
#[derive(Clone)]
pub struct NativeFunction(Arc<HostFn>);

impl NativeFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        NativeFunction(Arc::new(f))
    }

    pub fn call(&self, arg: &str) -> Result<Value, HostError> {
        (self.0)(arg)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({:#x})", self.identity())
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

/// The host's ambient global object.
///
/// Property reads go to the wrapped scope. The object itself may only end
/// up in a result once approved.
#[derive(Clone)]
pub struct GlobalObject(Arc<dyn Scope + Send + Sync>);

impl GlobalObject {
    pub fn new<S>(scope: S) -> Self
    where
        S: Scope + Send + Sync + 'static,
    {
        GlobalObject(Arc::new(scope))
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for GlobalObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalObject({:#x})", self.identity())
    }
}

impl PartialEq for GlobalObject {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

/// Named lookup surface for identifiers.
pub trait Scope {
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl<S: Scope + ?Sized> Scope for &S {
    fn lookup(&self, name: &str) -> Option<Value> {
        (**self).lookup(name)
    }
}

impl Scope for HashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Scope for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Scope for Object {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Scope for GlobalObject {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.0.lookup(name)
    }
}

/// Lookup surface for the heads of call expressions.
pub trait FunctionScope {
    fn function(&self, name: &str) -> Option<NativeFunction>;
}

impl<S: FunctionScope + ?Sized> FunctionScope for &S {
    fn function(&self, name: &str) -> Option<NativeFunction> {
        (**self).function(name)
    }
}

impl FunctionScope for HashMap<String, NativeFunction> {
    fn function(&self, name: &str) -> Option<NativeFunction> {
        self.get(name).cloned()
    }
}

impl FunctionScope for BTreeMap<String, NativeFunction> {
    fn function(&self, name: &str) -> Option<NativeFunction> {
        self.get(name).cloned()
    }
}

#[test]
fn test_object_last_write_wins_in_place() {
    let mut obj = Object::new();
    obj.insert("a", Value::from(1.0));
    obj.insert("b", Value::from(2.0));
    assert_eq!(obj.insert("a", Value::from(3.0)), Some(Value::from(1.0)));
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(obj.get("a"), Some(&Value::from(3.0)));
}

#[test]
fn test_function_identity() {
    let f = NativeFunction::new(|s| Ok(Value::from(s)));
    let g = NativeFunction::new(|s| Ok(Value::from(s)));
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
}
