//! # Options Record Language - Abstract Syntax Tree
//!
//! An options record is a small literal notation used in markup to describe
//! the construction options of a control:
//!
//! ```text
//! { title: 'Inbox', pageSize: 20, host: select('.mail-host'), theme: app.themes.dark }
//! ```
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes produced by the parser
//!
//! ## Core Concepts
//!
//! ### Literals
//!
//! Objects, arrays, strings, numbers, `true`, `false` and `null` are read as
//! written. Arrays may contain holes:
//!
//! ```text
//! [,, 1, 2]   // four positions, the first two empty
//! [1, 2, ]    // trailing comma, two positions
//! ```
//!
//! ### Access Expressions
//!
//! Any other value is an identifier chain resolved against scopes supplied
//! by the caller:
//!
//! ```text
//! settings.paging['size']
//! ```
//!
//! The head of a chain may be a call with exactly one string argument. The
//! target is looked up in the caller's function context only:
//!
//! ```text
//! select('.toolbar').items
//! ```
//!
//! ### What Is Not Supported
//!
//! There are no operators, no statements and no nested calls. Keywords such
//! as `function` or `new` are valid property names but never values.
pub mod expressions;
pub mod tokens;

pub use expressions::{AccessExpression, AccessHead, Accessor, Expr, IndexKey, PathSegment};
pub use tokens::{Token, TokenKind};
