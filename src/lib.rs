pub mod ast;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod security;
pub mod value;

pub use ast::{AccessExpression, AccessHead, Accessor, Expr, IndexKey, PathSegment, Token, TokenKind};
pub use error::{Error, Expected, HostError, PropertyAccessError, SecurityViolation, SyntaxError};
pub use evaluator::{Evaluator, Scopes};
pub use lexer::{Lexer, tokenize};
pub use output::{to_literal, to_literal_pretty};
pub use parser::Parser;
pub use security::{is_supported, mark_supported, require_supported, supported_for_processing};
pub use value::{FunctionScope, GlobalObject, NativeFunction, Object, Scope, Value};

/// Parses an options record and resolves every access expression in it.
///
/// # Examples
///
/// ```
/// use options_record::{NativeFunction, Scopes, Value};
/// use std::collections::HashMap;
///
/// let mut functions = HashMap::new();
/// functions.insert(
///     "select".to_string(),
///     NativeFunction::new(|selector| Ok(Value::from(format!("<{}>", selector)))),
/// );
///
/// let scopes = Scopes::new().with_functions(&functions);
/// let options = options_record::parse("{ host: select('.toolbar'), size: 3 }", &scopes).unwrap();
/// assert_eq!(options.get("host"), Some(&Value::from("<.toolbar>")));
/// ```
pub fn parse(text: &str, scopes: &Scopes<'_>) -> Result<Value, Error> {
    let expr = parse_structural(text)?;
    evaluate(&expr, scopes)
}

/// Parses an options record without resolving anything.
///
/// Access expressions stay in the tree as [`AccessExpression`] nodes for the
/// caller to inspect or resolve later.
pub fn parse_structural(text: &str) -> Result<Expr, Error> {
    log::debug!("parsing options record ({} chars)", text.len());
    Parser::new(text).parse().map_err(|e| {
        log::debug!("{}", e);
        Error::Syntax(e)
    })
}

/// Resolves a parsed options record against `scopes`.
pub fn evaluate(expr: &Expr, scopes: &Scopes<'_>) -> Result<Value, Error> {
    Evaluator::new(*scopes).evaluate(expr)
}
