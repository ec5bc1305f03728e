use std::fmt;

use crate::ast::tokens::number_to_key;

/// Abstract Syntax Tree node for an options record.
///
/// The parser always produces this tree. Eager evaluation folds it into a
/// [`Value`](crate::Value); structural parsing hands it to the caller as is.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Number literal, sign included
    ///
    /// # Example
    /// ```text
    /// -34.54
    /// ```
    Number(f64),

    /// String literal with escapes resolved
    String(String),

    /// Array literal
    ///
    /// `None` marks a hole left by an elision.
    ///
    /// # Example
    /// ```text
    /// [,, 1]      // [None, None, Some(Number(1.0))]
    /// ```
    Array(Vec<Option<Expr>>),

    /// Object literal, properties in source order
    ///
    /// Duplicate keys are kept; the last one wins when the object is read
    /// or folded.
    ///
    /// # Example
    /// ```text
    /// { a: 1, 'b c': [2] }
    /// ```
    Object(Vec<(String, Expr)>),

    /// Identifier chain resolved against the caller's scopes
    ///
    /// # Examples
    /// ```text
    /// a.b['c'][0]
    /// select('.x').y
    /// ```
    Access(AccessExpression),
}

impl Expr {
    /// Property of an object node. Later duplicates shadow earlier ones.
    pub fn get(&self, key: &str) -> Option<&Expr> {
        match self {
            Expr::Object(pairs) => pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_access(&self) -> Option<&AccessExpression> {
        match self {
            Expr::Access(access) => Some(access),
            _ => None,
        }
    }
}

/// First segment of an access chain.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessHead {
    /// Name looked up in the local, then the global context
    Identifier(String),

    /// `target('arg0')`, looked up in the function context only
    Call { target: String, arg0: String },
}

/// Key written between brackets.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexKey {
    Name(String),
    Number(f64),
}

impl IndexKey {
    /// Property name the key reads.
    pub fn to_key(&self) -> String {
        match self {
            IndexKey::Name(name) => name.clone(),
            IndexKey::Number(n) => number_to_key(*n),
        }
    }
}

/// Segment following the head of an access chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    /// `.name`
    Name(String),
    /// `['name']` or `[0]`
    Index(IndexKey),
}

impl Accessor {
    pub fn to_key(&self) -> String {
        match self {
            Accessor::Name(name) => name.clone(),
            Accessor::Index(key) => key.to_key(),
        }
    }
}

/// An identifier followed by property reads, optionally starting with a
/// single whitelisted call.
///
/// A call can only ever be the head of the chain, so `a.b('x')` is not
/// representable.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessExpression {
    pub head: AccessHead,
    pub tail: Vec<Accessor>,
}

/// Borrowed view of one segment of an [`AccessExpression`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment<'a> {
    Call { target: &'a str, arg0: &'a str },
    Name(&'a str),
    Index(&'a IndexKey),
}

impl AccessExpression {
    pub fn identifier(name: impl Into<String>) -> Self {
        AccessExpression {
            head: AccessHead::Identifier(name.into()),
            tail: Vec::new(),
        }
    }

    pub fn call(target: impl Into<String>, arg0: impl Into<String>) -> Self {
        AccessExpression {
            head: AccessHead::Call {
                target: target.into(),
                arg0: arg0.into(),
            },
            tail: Vec::new(),
        }
    }

    /// The whole chain as a flat list of segments, head first.
    pub fn parts(&self) -> Vec<PathSegment<'_>> {
        let head = match &self.head {
            AccessHead::Identifier(name) => PathSegment::Name(name),
            AccessHead::Call { target, arg0 } => PathSegment::Call { target, arg0 },
        };

        std::iter::once(head)
            .chain(self.tail.iter().map(|accessor| match accessor {
                Accessor::Name(name) => PathSegment::Name(name),
                Accessor::Index(key) => PathSegment::Index(key),
            }))
            .collect()
    }

    /// Source-like rendering of the chain, e.g. `select('.x').y[0]`.
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AccessExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.head {
            AccessHead::Identifier(name) => f.write_str(name)?,
            AccessHead::Call { target, arg0 } => write!(f, "{}('{}')", target, arg0)?,
        }
        for accessor in &self.tail {
            match accessor {
                Accessor::Name(name) => write!(f, ".{}", name)?,
                Accessor::Index(IndexKey::Name(name)) => write!(f, "['{}']", name)?,
                Accessor::Index(IndexKey::Number(n)) => write!(f, "[{}]", number_to_key(*n))?,
            }
        }
        Ok(())
    }
}
