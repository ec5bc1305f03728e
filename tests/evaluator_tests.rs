// tests/evaluator_tests.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use options_record::{
    Error, GlobalObject, NativeFunction, Object, Scopes, Value, evaluate, mark_supported, parse,
    parse_structural,
};

fn scope(entries: Vec<(&str, Value)>) -> HashMap<String, Value> {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn object(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(entries.into_iter().collect::<Object>())
}

fn eval(input: &str) -> Value {
    parse(input, &Scopes::new()).unwrap()
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_simple_object() {
    assert_eq!(eval("{ a: 1 }"), object(vec![("a", Value::from(1.0))]));
}

#[test]
fn test_literal_values() {
    let value = eval("{ n: -34.54, h: 0x10, s: 'x', t: true, f: false, z: null, arr: [1, 'a'] }");
    assert_eq!(value.get("n"), Some(&Value::from(-34.54)));
    assert_eq!(value.get("h"), Some(&Value::from(16.0)));
    assert_eq!(value.get("s"), Some(&Value::from("x")));
    assert_eq!(value.get("t"), Some(&Value::from(true)));
    assert_eq!(value.get("f"), Some(&Value::from(false)));
    assert_eq!(value.get("z"), Some(&Value::Null));
    assert_eq!(
        value.get("arr"),
        Some(&Value::from(vec![Value::from(1.0), Value::from("a")]))
    );
}

#[test]
fn test_top_level_need_not_be_object() {
    assert_eq!(eval("42"), Value::from(42.0));
    assert_eq!(eval("[]"), Value::Array(vec![]));
}

#[test]
fn test_key_order_preserved() {
    let value = eval("{ z: 1, a: 2, m: 3 }");
    let keys: Vec<&str> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_duplicate_keys_last_wins() {
    let value = eval("{ a: 1, b: 2, a: 3 }");
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj.get("a"), Some(&Value::from(3.0)));
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_holes_survive_evaluation() {
    let value = eval("[,,, 1, 2, 3]");
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 6);
    assert!(arr[..3].iter().all(Option::is_none));
    assert_eq!(arr[3], Some(Value::from(1.0)));

    assert_eq!(eval("[1, 2, 3, ]").as_array().unwrap().len(), 3);
}

// ============================================================================
// Identifier resolution
// ============================================================================

#[test]
fn test_nested_access() {
    let local = scope(vec![(
        "a",
        object(vec![("b", object(vec![("c", Value::from(56.0))]))]),
    )]);
    let value = parse("{ a: a.b.c }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value, object(vec![("a", Value::from(56.0))]));
}

#[test]
fn test_access_through_undefined_fails() {
    let local = scope(vec![("a", object(vec![]))]);
    let err = parse("{ a: a.b.c }", &Scopes::new().with_local(&local)).unwrap_err();

    match &err {
        Error::PropertyAccess(e) => {
            assert_eq!(e.property, "c");
            assert_eq!(e.receiver, "undefined");
            assert_eq!(e.path, "a.b");
        }
        other => panic!("Expected property access error, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Unable to read property 'c' of undefined value 'a.b'."
    );
}

#[test]
fn test_access_through_null_fails() {
    let local = scope(vec![("a", Value::Null)]);
    let err = parse("{ x: a['k'] }", &Scopes::new().with_local(&local)).unwrap_err();
    match err {
        Error::PropertyAccess(e) => {
            assert_eq!(e.property, "k");
            assert_eq!(e.receiver, "null");
            assert_eq!(e.path, "a");
        }
        other => panic!("Expected property access error, got {:?}", other),
    }
}

#[test]
fn test_unbound_identifier_is_undefined() {
    let value = eval("{ a: missing }");
    assert_eq!(value.get("a"), Some(&Value::Undefined));

    let err = parse("{ a: missing.x }", &Scopes::new()).unwrap_err();
    assert!(matches!(err, Error::PropertyAccess(_)));
}

#[test]
fn test_missing_property_is_undefined() {
    let local = scope(vec![("a", object(vec![]))]);
    let value = parse("{ v: a.nope }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("v"), Some(&Value::Undefined));
}

#[test]
fn test_global_fallback() {
    let local = scope(vec![("shared", Value::from("local"))]);
    let global = scope(vec![
        ("shared", Value::from("global")),
        ("only", Value::from("global only")),
    ]);
    let scopes = Scopes::new().with_local(&local).with_global(&global);

    let value = parse("{ a: shared, b: only }", &scopes).unwrap();
    assert_eq!(value.get("a"), Some(&Value::from("local")));
    assert_eq!(value.get("b"), Some(&Value::from("global only")));
}

#[test]
fn test_bracket_and_numeric_access() {
    let local = scope(vec![(
        "items",
        Value::Array(vec![
            Some(object(vec![("dash-key", Value::from("first"))])),
            None,
        ]),
    )]);
    let scopes = Scopes::new().with_local(&local);

    let value = parse(
        "{ a: items[0]['dash-key'], b: items[1], c: items.length, d: items['0']['dash-key'] }",
        &scopes,
    )
    .unwrap();
    assert_eq!(value.get("a"), Some(&Value::from("first")));
    assert_eq!(value.get("b"), Some(&Value::Undefined));
    assert_eq!(value.get("c"), Some(&Value::from(2.0)));
    assert_eq!(value.get("d"), Some(&Value::from("first")));
}

#[test]
fn test_string_properties() {
    let local = scope(vec![("name", Value::from("abc"))]);
    let value = parse("{ len: name.length, first: name[0] }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("len"), Some(&Value::from(3.0)));
    assert_eq!(value.get("first"), Some(&Value::from("a")));
}

#[test]
fn test_reserved_word_property_access() {
    let local = scope(vec![("opts", object(vec![("default", Value::from(7.0))]))]);
    let value = parse("{ a: opts.default }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("a"), Some(&Value::from(7.0)));
}

#[test]
fn test_global_object_properties_are_readable() {
    let window = GlobalObject::new(scope(vec![("title", Value::from("Inbox"))]));
    let local = scope(vec![("window", Value::Global(window))]);
    let value = parse("{ t: window.title }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("t"), Some(&Value::from("Inbox")));
}

// ============================================================================
// Function calls
// ============================================================================

#[test]
fn test_call_invokes_host_function_once() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let select = NativeFunction::new(move |selector| {
        recorded.lock().unwrap().push(selector.to_string());
        Ok(Value::from(format!("element{}", selector)))
    });

    let mut functions = HashMap::new();
    functions.insert("select".to_string(), select);

    let value = parse(
        "{ a: select('.some-class') }",
        &Scopes::new().with_functions(&functions),
    )
    .unwrap();

    assert_eq!(value.get("a"), Some(&Value::from("element.some-class")));
    assert_eq!(*calls.lock().unwrap(), vec![".some-class".to_string()]);
}

#[test]
fn test_call_result_is_accessed() {
    let select = NativeFunction::new(|_| {
        Ok(object(vec![("y", object(vec![("z", Value::from(5.0))]))]))
    });
    let mut functions = HashMap::new();
    functions.insert("select".to_string(), select);

    let value = parse(
        "{ a: select('.x').y.z }",
        &Scopes::new().with_functions(&functions),
    )
    .unwrap();
    assert_eq!(value.get("a"), Some(&Value::from(5.0)));
}

#[test]
fn test_call_target_only_from_function_context() {
    // A function bound in the local scope is not callable
    let local = scope(vec![(
        "select",
        Value::Function(NativeFunction::new(|_| Ok(Value::from(1.0)))),
    )]);
    let value = parse("{ a: select('.x') }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("a"), Some(&Value::Undefined));
}

#[test]
fn test_absent_function_is_undefined() {
    let functions: HashMap<String, NativeFunction> = HashMap::new();
    let value = parse("{ a: select('.x') }", &Scopes::new().with_functions(&functions)).unwrap();
    assert_eq!(value.get("a"), Some(&Value::Undefined));
}

#[test]
fn test_host_error_propagates() {
    let mut functions = HashMap::new();
    functions.insert(
        "select".to_string(),
        NativeFunction::new(|selector| Err(format!("no element matches '{}'", selector).into())),
    );

    let err = parse("{ a: select('#none') }", &Scopes::new().with_functions(&functions)).unwrap_err();
    assert!(matches!(err, Error::Host(_)));
    assert_eq!(err.to_string(), "no element matches '#none'");
}

#[test]
fn test_evaluation_stops_at_first_error() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let mut functions = HashMap::new();
    functions.insert(
        "f".to_string(),
        NativeFunction::new(move |_| {
            *counter.lock().unwrap() += 1;
            Ok(Value::Null)
        }),
    );

    let result = parse("{ a: missing.x, b: f('y') }", &Scopes::new().with_functions(&functions));
    assert!(result.is_err());
    assert_eq!(*calls.lock().unwrap(), 0);
}

// ============================================================================
// Structural mode
// ============================================================================

#[test]
fn test_structural_then_evaluate_matches_eager() {
    let local = scope(vec![("a", object(vec![("b", Value::from(1.0))]))]);
    let scopes = Scopes::new().with_local(&local);
    let text = "{ x: a.b, y: [, a.b], z: 'lit' }";

    let expr = parse_structural(text).unwrap();
    assert_eq!(evaluate(&expr, &scopes).unwrap(), parse(text, &scopes).unwrap());
}

#[test]
fn test_structural_mode_does_not_resolve() {
    // Would fail eagerly: no scope binds `missing`
    assert!(parse_structural("{ a: missing.x.y, b: select('.q') }").is_ok());
}

#[test]
fn test_marked_function_passes_through() {
    let f = NativeFunction::new(|_| Ok(Value::Null));
    mark_supported(&Value::Function(f.clone()));
    let local = scope(vec![("handler", Value::Function(f.clone()))]);

    let value = parse("{ onClick: handler }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("onClick"), Some(&Value::Function(f)));
}

#[test]
fn test_deeply_nested_record_is_rejected() {
    let text = "[".repeat(50_000) + &"]".repeat(50_000);
    assert!(matches!(parse(&text, &Scopes::new()), Err(Error::Syntax(_))));
}

#[test]
fn test_string_index_counts_utf16_units() {
    let local = scope(vec![("s", Value::from("😀x"))]);
    let value = parse(
        "{ len: s.length, high: s[0], low: s[1], x: s[2], past: s[3] }",
        &Scopes::new().with_local(&local),
    )
    .unwrap();
    assert_eq!(value.get("len"), Some(&Value::from(3.0)));
    assert_eq!(value.get("high"), Some(&Value::from("\u{fffd}")));
    assert_eq!(value.get("low"), Some(&Value::from("\u{fffd}")));
    assert_eq!(value.get("x"), Some(&Value::from("x")));
    assert_eq!(value.get("past"), Some(&Value::Undefined));
}

#[test]
fn test_numeric_index_matches_exponent_key() {
    let local = scope(vec![("a", object(vec![("1e-7", Value::from("tiny"))]))]);
    let value = parse("{ v: a[1e-7], w: a[0.0000001] }", &Scopes::new().with_local(&local)).unwrap();
    assert_eq!(value.get("v"), Some(&Value::from("tiny")));
    assert_eq!(value.get("w"), Some(&Value::from("tiny")));
}
