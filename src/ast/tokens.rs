use std::fmt;

/// The kind of a lexical token.
///
/// Kinds display as their camelCase names (`leftBrace`, `reservedWord`, ...).
/// Those names are part of the error message text and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `.` when not starting a number
    Dot,
    /// `;`, never accepted by the grammar
    Semicolon,

    /// Name that is not a keyword
    ///
    /// # Examples
    /// ```text
    /// select
    /// _private
    /// $el
    /// abc     // same name as `abc`
    /// ```
    Identifier,

    /// Keyword that may only be used as a property name
    ///
    /// # Examples
    /// ```text
    /// { function: 1, class: 'x' }
    /// ```
    ReservedWord,

    /// `this`
    ThisKeyword,

    /// Single- or double-quoted string
    StringLiteral,

    /// Number, including an optional leading sign
    ///
    /// # Examples
    /// ```text
    /// 12.345e-4
    /// 0x1234
    /// -34.54
    /// +.2
    /// ```
    NumberLiteral,

    /// `true`
    TrueLiteral,
    /// `false`
    FalseLiteral,
    /// `null`
    NullLiteral,

    /// Run of whitespace or line terminators
    Separator,

    /// Character (or unterminated string) no rule matches
    Error,

    /// End of input
    Eof,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftBrace => "leftBrace",
            TokenKind::RightBrace => "rightBrace",
            TokenKind::LeftBracket => "leftBracket",
            TokenKind::RightBracket => "rightBracket",
            TokenKind::LeftParen => "leftParen",
            TokenKind::RightParen => "rightParen",
            TokenKind::Colon => "colon",
            TokenKind::Comma => "comma",
            TokenKind::Dot => "dot",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Identifier => "identifier",
            TokenKind::ReservedWord => "reservedWord",
            TokenKind::ThisKeyword => "thisKeyword",
            TokenKind::StringLiteral => "stringLiteral",
            TokenKind::NumberLiteral => "numberLiteral",
            TokenKind::TrueLiteral => "trueLiteral",
            TokenKind::FalseLiteral => "falseLiteral",
            TokenKind::NullLiteral => "nullLiteral",
            TokenKind::Separator => "separator",
            TokenKind::Error => "error",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Logical content: the decoded value of a string literal, the decoded
    /// name of an identifier, the source spelling otherwise.
    pub text: String,
    /// Zero-based UTF-16 code unit index of the first character.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Numeric value of a `numberLiteral` token.
    ///
    /// Returns `None` for any other kind.
    pub fn number_value(&self) -> Option<f64> {
        if self.kind != TokenKind::NumberLiteral {
            return None;
        }
        parse_number(&self.text)
    }
}

/// Converts number literal source text to its value.
///
/// Accepts an optional sign followed by a hex (`0x1F`) or decimal
/// (`12`, `.5`, `1.`, `3e-2`) literal.
pub fn parse_number(text: &str) -> Option<f64> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() {
            return None;
        }
        hex.chars().try_fold(0f64, |acc, c| {
            c.to_digit(16).map(|d| acc * 16.0 + f64::from(d))
        })?
    } else {
        body.parse::<f64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Canonical spelling of a number used as a property key.
///
/// Follows the browser's number-to-string rules: plain notation from `1e-6`
/// up to `1e21` (`16`, `0.000001`), exponent notation outside it (`1e-7`,
/// `1.5e+21`).
pub fn number_to_key(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    if (1e-6..1e21).contains(&n.abs()) {
        return n.to_string();
    }

    let spelled = format!("{:e}", n);
    match spelled.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => spelled,
    }
}

#[test]
fn test_parse_number_forms() {
    assert_eq!(parse_number("0"), Some(0.0));
    assert_eq!(parse_number("12.345"), Some(12.345));
    assert_eq!(parse_number("0x1234"), Some(4660.0));
    assert_eq!(parse_number("123e12"), Some(123e12));
    assert_eq!(parse_number("-34.54"), Some(-34.54));
    assert_eq!(parse_number("+.2"), Some(0.2));
    assert_eq!(parse_number("-0x10"), Some(-16.0));
    assert_eq!(parse_number("0x"), None);
}

#[test]
fn test_number_to_key() {
    assert_eq!(number_to_key(16.0), "16");
    assert_eq!(number_to_key(1.5), "1.5");
    assert_eq!(number_to_key(-0.0), "0");
    assert_eq!(number_to_key(-3.0), "-3");
    assert_eq!(number_to_key(1e20), "100000000000000000000");
    assert_eq!(number_to_key(0.000001), "0.000001");
    assert_eq!(number_to_key(1e-7), "1e-7");
    assert_eq!(number_to_key(-2.5e-8), "-2.5e-8");
    assert_eq!(number_to_key(1e21), "1e+21");
    assert_eq!(number_to_key(1.5e300), "1.5e+300");
}
