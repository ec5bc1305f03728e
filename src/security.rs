//! Whitelist of functions and global objects that option records may bind.
//!
//! Option records come from markup, which is less trusted than the code
//! hosting it. A name that resolves to a host function or to the global
//! object is only released into a result once the host has approved that
//! exact value with [`mark_supported`].
//!
//! Approval is by identity and lasts for the life of the process. The
//! registry keeps a clone of every approved value, so an identity can never
//! be reused by a different allocation.
//!
//! ```
//! use options_record::{NativeFunction, Value, security};
//!
//! let f = Value::Function(NativeFunction::new(|s| Ok(Value::from(s))));
//! assert!(security::require_supported(f.clone()).is_err());
//!
//! security::mark_supported(&f);
//! assert!(security::require_supported(f).is_ok());
//! ```

use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex, MutexGuard, PoisonError},
};

use crate::{
    error::{HostError, SecurityViolation},
    value::{NativeFunction, Value},
};

static SUPPORTED: LazyLock<Mutex<HashMap<usize, Value>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn registry() -> MutexGuard<'static, HashMap<usize, Value>> {
    // Entries are only ever added, so a poisoned map is still consistent
    SUPPORTED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn identity(value: &Value) -> Option<usize> {
    match value {
        Value::Function(f) => Some(f.identity()),
        Value::Global(g) => Some(g.identity()),
        _ => None,
    }
}

/// Approves a function or global object. Marking twice has no further
/// effect; data values need no approval and are ignored.
pub fn mark_supported(value: &Value) {
    if let Some(id) = identity(value) {
        if registry().insert(id, value.clone()).is_none() {
            log::debug!("marked {} {:#x} as supported for processing", value.type_name(), id);
        }
    }
}

/// Whether `value` may appear in a result.
pub fn is_supported(value: &Value) -> bool {
    match identity(value) {
        Some(id) => registry().contains_key(&id),
        None => true,
    }
}

/// Returns `value` unchanged if it may appear in a result.
pub fn require_supported(value: Value) -> Result<Value, SecurityViolation> {
    let path = value.type_name().to_string();
    require_supported_at(value, &path)
}

/// Same as [`require_supported`], naming the chain that produced `value`
/// in the violation.
pub fn require_supported_at(value: Value, path: &str) -> Result<Value, SecurityViolation> {
    if is_supported(&value) {
        return Ok(value);
    }

    log::warn!("rejected unapproved {} bound by '{}'", value.type_name(), path);
    Err(SecurityViolation {
        path: path.to_string(),
        kind: value.type_name(),
    })
}

/// Wraps `f` as a [`NativeFunction`] and approves it in one step.
pub fn supported_for_processing<F>(f: F) -> NativeFunction
where
    F: Fn(&str) -> Result<Value, HostError> + Send + Sync + 'static,
{
    let function = NativeFunction::new(f);
    mark_supported(&Value::Function(function.clone()));
    function
}

#[test]
fn test_mark_is_idempotent() {
    let f = Value::Function(NativeFunction::new(|_| Ok(Value::Null)));
    mark_supported(&f);
    mark_supported(&f);
    assert!(require_supported(f).is_ok());
}

#[test]
fn test_data_values_always_pass() {
    assert!(is_supported(&Value::from("text")));
    assert_eq!(require_supported(Value::Null).unwrap(), Value::Null);
}
