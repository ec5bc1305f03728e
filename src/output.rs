//! Options-record notation output for values.
//!
//! Renders a [`Value`] back into the literal syntax the parser reads, in
//! either compact or pretty-printed form. Pure data round-trips: printing a
//! value and parsing the text again yields an equal value, holes included.
//!
//! # Features
//!
//! - **Compact output** via [`to_literal()`] - one line
//! - **Pretty output** via [`to_literal_pretty()`] - 2-space indentation
//! - **Holes** - printed as empty array slots (`[, 1]`), with a trailing comma
//!   when the last slot is a hole (`[1, ,]`)
//! - **Key order** - object keys print in insertion order
//!
//! # Examples
//!
//! ```
//! use options_record::{Scopes, Value};
//! use options_record::output::to_literal;
//!
//! let value = options_record::parse("{ a: [, 1], 'b c': 'it\\'s' }", &Scopes::new()).unwrap();
//! assert_eq!(to_literal(&value), "{a: [, 1], 'b c': 'it\\'s'}");
//! ```

use crate::{ast::tokens::number_to_key, lexer::RESERVED_WORDS, value::Value};

pub struct LiteralPrinter {
    pretty: bool,
}

impl LiteralPrinter {
    pub fn new(pretty: bool) -> Self {
        LiteralPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => number_to_key(*n),
            Value::String(s) => format!("'{}'", escape_string(s)),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => {
                let entries: Vec<(&str, &Value)> = obj.iter().collect();
                self.print_object(&entries, indent)
            }
            Value::Function(_) => "<function>".to_string(),
            Value::Global(_) => "<global object>".to_string(),
        }
    }

    fn print_array(&self, arr: &[Option<Value>], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        let trailing_hole = matches!(arr.last(), Some(None));

        if self.pretty {
            let items: Vec<String> = arr
                .iter()
                .map(|v| match v {
                    Some(v) => format!("{}{}", self.indent(indent + 1), self.print_value(v, indent + 1)),
                    None => self.indent(indent + 1),
                })
                .collect();
            let mut result = "[\n".to_string();
            result.push_str(&items.join(",\n"));
            if trailing_hole {
                result.push(',');
            }
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push(']');
            result
        } else {
            let items: Vec<String> = arr
                .iter()
                .map(|v| v.as_ref().map(|v| self.print_value(v, indent)).unwrap_or_default())
                .collect();
            let comma = if trailing_hole { "," } else { "" };
            format!("[{}{}]", items.join(", "), comma)
        }
    }

    fn print_object(&self, entries: &[(&str, &Value)], indent: usize) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let items: Vec<String> = entries
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}{}: {}",
                        self.indent(indent + 1),
                        format_key(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            let mut result = "{\n".to_string();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push('}');
            result
        } else {
            let items: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", format_key(k), self.print_value(v, indent)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

/// Keys that read back as identifiers print bare, everything else quoted.
fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&key)
        && !matches!(key, "true" | "false" | "null" | "this");

    if bare {
        key.to_string()
    } else {
        format!("'{}'", escape_string(key))
    }
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '\'' => vec!['\\', '\''],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            '\u{2028}' | '\u{2029}' => format!("\\u{:04x}", c as u32).chars().collect(),
            c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
            c => vec![c],
        })
        .collect()
}

// Convenience functions

/// Converts a Value to compact options-record notation.
pub fn to_literal(value: &Value) -> String {
    LiteralPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed options-record notation.
///
/// # Examples
///
/// ```
/// use options_record::{Object, Value};
/// use options_record::output::to_literal_pretty;
///
/// let mut obj = Object::new();
/// obj.insert("name", Value::from("Alice"));
/// obj.insert("tags", Value::from(vec![Value::from(1.0)]));
///
/// assert_eq!(
///     to_literal_pretty(&Value::Object(obj)),
///     "{\n  name: 'Alice',\n  tags: [\n    1\n  ]\n}"
/// );
/// ```
pub fn to_literal_pretty(value: &Value) -> String {
    LiteralPrinter::new(true).print(value)
}
