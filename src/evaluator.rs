use crate::{
    ast::{AccessExpression, AccessHead, Accessor, Expr},
    error::{Error, PropertyAccessError},
    security::require_supported_at,
    value::{FunctionScope, Object, Scope, Value},
};

/// The lookup surfaces an evaluation resolves names against.
///
/// All three are optional and only borrowed for the duration of one call.
///
/// # Examples
///
/// ```
/// use options_record::{Scopes, Value};
/// use std::collections::HashMap;
///
/// let mut local = HashMap::new();
/// local.insert("pageSize".to_string(), Value::from(20.0));
///
/// let scopes = Scopes::new().with_local(&local);
/// let value = options_record::parse("{ size: pageSize }", &scopes).unwrap();
/// assert_eq!(value.get("size"), Some(&Value::from(20.0)));
/// ```
#[derive(Clone, Copy, Default)]
pub struct Scopes<'a> {
    /// Checked first for the head of an access chain
    pub local: Option<&'a dyn Scope>,
    /// Fallback when the local context does not bind a name
    pub global: Option<&'a dyn Scope>,
    /// Consulted only for call expression targets
    pub functions: Option<&'a dyn FunctionScope>,
}

impl<'a> Scopes<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local(mut self, scope: &'a dyn Scope) -> Self {
        self.local = Some(scope);
        self
    }

    pub fn with_global(mut self, scope: &'a dyn Scope) -> Self {
        self.global = Some(scope);
        self
    }

    pub fn with_functions(mut self, functions: &'a dyn FunctionScope) -> Self {
        self.functions = Some(functions);
        self
    }
}

/// Folds a parsed options record into a [`Value`].
///
/// Literals are copied, holes and key order preserved, and every access
/// expression is resolved against the scopes. A chain that ends on a
/// function or on the global object must pass the security gate.
///
/// Recursion follows the nesting of the tree, which [`Parser`] caps at
/// [`MAX_DEPTH`].
///
/// [`Parser`]: crate::parser::Parser
/// [`MAX_DEPTH`]: crate::parser::MAX_DEPTH
pub struct Evaluator<'a> {
    scopes: Scopes<'a>,
}

impl<'a> Evaluator<'a> {
    pub fn new(scopes: Scopes<'a>) -> Self {
        Evaluator { scopes }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, Error> {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Array(elements) => {
                let mut result = Vec::with_capacity(elements.len());
                for element in elements {
                    result.push(match element {
                        Some(e) => Some(self.evaluate(e)?),
                        None => None,
                    });
                }
                Ok(Value::Array(result))
            }
            Expr::Object(pairs) => {
                let mut obj = Object::new();
                for (key, value) in pairs {
                    obj.insert(key.clone(), self.evaluate(value)?);
                }
                Ok(Value::Object(obj))
            }
            Expr::Access(access) => self.eval_access(access),
        }
    }

    fn eval_access(&self, access: &AccessExpression) -> Result<Value, Error> {
        let mut current = match &access.head {
            AccessHead::Identifier(name) => self.resolve(name),
            AccessHead::Call { target, arg0 } => self.call(target, arg0)?,
        };

        for (i, accessor) in access.tail.iter().enumerate() {
            current = read_property(&current, accessor).map_err(|receiver| PropertyAccessError {
                property: accessor.to_key(),
                receiver,
                path: AccessExpression {
                    head: access.head.clone(),
                    tail: access.tail[..i].to_vec(),
                }
                .path(),
            })?;
        }

        if current.is_capability() {
            return Ok(require_supported_at(current, &access.path())?);
        }
        Ok(current)
    }

    fn resolve(&self, name: &str) -> Value {
        let found = self
            .scopes
            .local
            .and_then(|scope| scope.lookup(name))
            .or_else(|| self.scopes.global.and_then(|scope| scope.lookup(name)));

        match found {
            Some(value) => value,
            None => {
                log::trace!("'{}' is not bound in any scope", name);
                Value::Undefined
            }
        }
    }

    fn call(&self, target: &str, arg: &str) -> Result<Value, Error> {
        match self.scopes.functions.and_then(|functions| functions.function(target)) {
            Some(function) => {
                log::trace!("calling {}('{}')", target, arg);
                function.call(arg).map_err(Error::Host)
            }
            None => {
                log::trace!("'{}' is not in the function context", target);
                Ok(Value::Undefined)
            }
        }
    }
}

/// Canonical array index, e.g. `"3"` but not `"03"` or `"1.5"`.
fn array_index(key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|i| i.to_string() == key)
}

/// Reads one property. Fails with the receiver's type name when the
/// receiver is `undefined` or `null`.
fn read_property(object: &Value, accessor: &Accessor) -> Result<Value, &'static str> {
    let key = accessor.to_key();

    match object {
        Value::Undefined => Err("undefined"),
        Value::Null => Err("null"),
        Value::Object(obj) => Ok(obj.get(&key).cloned().unwrap_or_default()),
        Value::Global(global) => Ok(global.lookup(&key).unwrap_or_default()),
        Value::Array(arr) if key == "length" => Ok(Value::Number(arr.len() as f64)),
        Value::Array(arr) => Ok(array_index(&key)
            .and_then(|i| arr.get(i).cloned().flatten())
            .unwrap_or_default()),
        Value::String(s) if key == "length" => Ok(Value::Number(s.encode_utf16().count() as f64)),
        // Indexes count UTF-16 units, like `length`; half a surrogate pair
        // reads as U+FFFD
        Value::String(s) => Ok(array_index(&key)
            .and_then(|i| s.encode_utf16().nth(i))
            .map(|unit| Value::String(String::from_utf16_lossy(&[unit])))
            .unwrap_or_default()),
        Value::Boolean(_) | Value::Number(_) | Value::Function(_) => Ok(Value::Undefined),
    }
}

#[test]
fn test_array_index() {
    assert_eq!(array_index("0"), Some(0));
    assert_eq!(array_index("12"), Some(12));
    assert_eq!(array_index("01"), None);
    assert_eq!(array_index("1.5"), None);
    assert_eq!(array_index("-1"), None);
}

#[test]
fn test_read_hole_is_undefined() {
    let arr = Value::Array(vec![None, Some(Value::from(1.0))]);
    let first = read_property(&arr, &Accessor::Index(crate::ast::IndexKey::Number(0.0)));
    assert_eq!(first, Ok(Value::Undefined));
    let len = read_property(&arr, &Accessor::Name("length".to_string()));
    assert_eq!(len, Ok(Value::Number(2.0)));
}
