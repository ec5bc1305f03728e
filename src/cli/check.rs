//! Check and evaluate option records

use std::{collections::HashMap, env};

use super::{CliError, scope_from_json};
use crate::{NativeFunction, Scope, Scopes, TokenKind, Value, tokenize};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The options record to check
    pub record: String,
    /// JSON object used as the local context
    pub scope: Option<String>,
    /// JSON object used as the global context
    pub global: Option<String>,
    /// Use the process environment as the global context
    pub env: bool,
    /// JSON object mapping selectors to values, exposed as `select(...)`
    pub elements: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Record evaluated successfully
    Success(Value),
}

/// Environment variables as a scope.
///
/// Every variable resolves to its string value; unset variables are
/// unbound.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvScope;

impl Scope for EnvScope {
    fn lookup(&self, name: &str) -> Option<Value> {
        env::var(name).ok().map(Value::String)
    }
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = crate::parse_structural(&options.record)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let local = options.scope.as_deref().map(scope_from_json).transpose()?;
    let global = options.global.as_deref().map(scope_from_json).transpose()?;
    let elements = options.elements.as_deref().map(scope_from_json).transpose()?;

    let mut functions = HashMap::new();
    if let Some(elements) = elements {
        let select = NativeFunction::new(move |selector| {
            Ok(elements.get(selector).cloned().unwrap_or(Value::Null))
        });
        functions.insert("select".to_string(), select);
    }

    let mut scopes = Scopes::new().with_functions(&functions);
    if let Some(local) = &local {
        scopes = scopes.with_local(local);
    }
    if let Some(global) = &global {
        scopes = scopes.with_global(global);
    } else if options.env {
        scopes = scopes.with_global(&EnvScope);
    }

    let value = crate::evaluate(&expr, &scopes)?;
    Ok(CheckResult::Success(value))
}

/// One line per token: offset, kind and text.
pub fn format_tokens(record: &str) -> String {
    tokenize(record)
        .iter()
        .map(|token| match token.kind {
            TokenKind::Eof => format!("{:>4}  {}", token.offset, token.kind),
            _ => format!("{:>4}  {:<14} {:?}", token.offset, token.kind.name(), token.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_select_reads_elements() {
    let options = CheckOptions {
        record: "{ host: select('#main').title }".to_string(),
        elements: Some(r##"{ "#main": { "title": "Inbox" } }"##.to_string()),
        ..Default::default()
    };
    match execute_check(&options).unwrap() {
        CheckResult::Success(value) => {
            assert_eq!(value.get("host"), Some(&Value::from("Inbox")));
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[test]
fn test_syntax_only_skips_scopes() {
    let options = CheckOptions {
        record: "{ a: b.c }".to_string(),
        scope: Some("not json".to_string()),
        syntax_only: true,
        ..Default::default()
    };
    assert!(matches!(execute_check(&options), Ok(CheckResult::SyntaxValid)));
}
