// tests/lexer_tests.rs

use options_record::ast::{Token, TokenKind};
use options_record::lexer::{Lexer, tokenize};

/// Token kinds with separators stripped
fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Separator)
        .collect()
}

/// The single non-separator token before `eof`
fn single(input: &str) -> Token {
    let tokens: Vec<Token> = tokenize(input)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Separator)
        .collect();
    assert_eq!(tokens.len(), 2, "Expected one token for input: {:?}, got {:?}", input, tokens);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
    tokens.into_iter().next().unwrap()
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("{", TokenKind::LeftBrace),
        ("}", TokenKind::RightBrace),
        ("[", TokenKind::LeftBracket),
        ("]", TokenKind::RightBracket),
        ("(", TokenKind::LeftParen),
        (")", TokenKind::RightParen),
        (":", TokenKind::Colon),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        (";", TokenKind::Semicolon),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
        assert_eq!(token.offset, 0);
    }
}

#[test]
fn test_object_literal_token_sequence() {
    assert_eq!(
        kinds("{ test: 123, a: select('.foo') }"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::NumberLiteral,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::StringLiteral,
            TokenKind::RightParen,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_always_ends_with_eof() {
    for input in ["", "   ", "{", "'open", "#"] {
        let tokens = tokenize(input);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof, "Failed for input: {:?}", input);
    }
}

// ============================================================================
// Separators
// ============================================================================

#[test]
fn test_whitespace_is_separator() {
    let tokens = tokenize(" \t\r\n\u{2028}\u{2029}x");
    assert_eq!(tokens[0].kind, TokenKind::Separator);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].offset, 6);
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn test_whitespace_does_not_change_kinds() {
    assert_eq!(kinds("{a:[1,2]}"), kinds("{ a :\n\t[ 1 ,\r\n 2 ] }"));
}

#[test]
fn test_offsets_are_token_starts() {
    let tokens: Vec<Token> = tokenize("{  a : 'x' }")
        .into_iter()
        .filter(|t| t.kind != TokenKind::Separator)
        .collect();
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 3, 5, 7, 11, 12]);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_number_literals() {
    let test_cases = vec![
        ("0", 0.0),
        ("123", 123.0),
        ("12.345", 12.345),
        ("0x1234", 4660.0),
        ("0XfF", 255.0),
        ("123e12", 123e12),
        ("12.345e-4", 12.345e-4),
        ("1E+2", 100.0),
        (".5", 0.5),
        ("5.", 5.0),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::NumberLiteral, "Failed for input: {}", input);
        assert_eq!(token.text, input);
        assert_eq!(token.number_value(), Some(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_sign_is_part_of_number() {
    let test_cases = vec![("-34.54", -34.54), ("+.2", 0.2), ("-1", -1.0), ("+7e1", 70.0)];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::NumberLiteral, "Failed for input: {}", input);
        assert_eq!(token.number_value(), Some(expected));
    }

    assert_eq!(
        kinds("[-1, +2]"),
        vec![
            TokenKind::LeftBracket,
            TokenKind::NumberLiteral,
            TokenKind::Comma,
            TokenKind::NumberLiteral,
            TokenKind::RightBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lone_sign_is_error() {
    assert_eq!(kinds("- 1"), vec![TokenKind::Error, TokenKind::NumberLiteral, TokenKind::Eof]);
    assert_eq!(kinds("+a"), vec![TokenKind::Error, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn test_exponent_needs_digits() {
    // `e` without digits is not part of the number
    assert_eq!(kinds("1e"), vec![TokenKind::NumberLiteral, TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(tokenize("1e")[0].text, "1");
}

#[test]
fn test_number_value_only_for_numbers() {
    assert_eq!(single("'12'").number_value(), None);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_quotes() {
    assert_eq!(single("'single'").text, "single");
    assert_eq!(single("\"double\"").text, "double");
    assert_eq!(single("'say \"hi\"'").text, "say \"hi\"");
    assert_eq!(single("\"it's\"").text, "it's");
    assert_eq!(single("''").text, "");
}

#[test]
fn test_string_escapes() {
    let test_cases = vec![
        (r"'\x41'", "A"),
        (r"'\u0041\u00e9'", "Aé"),
        (r"'\''", "'"),
        (r#""\"""#, "\""),
        (r"'\\'", "\\"),
        (r"'\n\t\r'", "\n\t\r"),
        (r"'\q\%'", "q%"),
        (r"'\uD83D\uDE00'", "😀"),
    ];

    for (input, expected) in test_cases {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::StringLiteral, "Failed for input: {}", input);
        assert_eq!(token.text, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_line_continuations_are_removed() {
    let test_cases = vec![
        "'ab\\\ncd'",
        "'ab\\\rcd'",
        "'ab\\\r\ncd'",
        "'ab\\\u{2028}cd'",
        "'ab\\\u{2029}cd'",
    ];

    for input in test_cases {
        assert_eq!(single(input).text, "abcd", "Failed for input: {:?}", input);
    }
}

#[test]
fn test_unterminated_string_is_error() {
    let tokens = tokenize("{ a: 'open }");
    let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
    assert_eq!(error.offset, 5);
    assert_eq!(error.text, "'open }");
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_bad_hex_escape_is_error() {
    assert_eq!(single(r"'\xZZ'").kind, TokenKind::Error);
    assert_eq!(single(r"'\u12'").kind, TokenKind::Error);
}

// ============================================================================
// Identifiers and keywords
// ============================================================================

#[test]
fn test_identifiers() {
    for input in ["a", "select", "_private", "$el", "camelCase9", "été"] {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Identifier, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_identifier_unicode_escapes_are_decoded() {
    let escaped = single(r"\u0061bc");
    assert_eq!(escaped.kind, TokenKind::Identifier);
    assert_eq!(escaped.text, "abc");
    assert_eq!(escaped, Token::new(TokenKind::Identifier, "abc", 0));

    assert_eq!(single(r"a\u0062\u0063").text, "abc");
}

#[test]
fn test_bad_identifier_escape_is_error() {
    assert_eq!(kinds(r"a\x41")[0], TokenKind::Error);
    // Escaped character must be valid in an identifier
    assert_eq!(kinds(r"a\u002e")[0], TokenKind::Error);
}

#[test]
fn test_reserved_words() {
    let words = [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "finally", "for", "function", "if", "import",
        "in", "instanceof", "new", "return", "super", "switch", "throw", "try", "typeof", "var",
        "void", "while", "with",
    ];

    for word in words {
        let token = single(word);
        assert_eq!(token.kind, TokenKind::ReservedWord, "Failed for input: {}", word);
        assert_eq!(token.text, word);
    }
}

#[test]
fn test_not_reserved() {
    // Only the fixed list is reserved
    for word in ["let", "yield", "static", "functions", "Function", "undefined"] {
        assert_eq!(single(word).kind, TokenKind::Identifier, "Failed for input: {}", word);
    }
}

#[test]
fn test_literal_keywords() {
    assert_eq!(single("true").kind, TokenKind::TrueLiteral);
    assert_eq!(single("false").kind, TokenKind::FalseLiteral);
    assert_eq!(single("null").kind, TokenKind::NullLiteral);
    assert_eq!(single("this").kind, TokenKind::ThisKeyword);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_characters_are_error_tokens() {
    for input in ["#", "=", "@", "*", "`"] {
        let token = single(input);
        assert_eq!(token.kind, TokenKind::Error, "Failed for input: {}", input);
        assert_eq!(token.text, input);
    }
}

#[test]
fn test_error_token_offset() {
    let tokens = tokenize("{ a: 1 # }");
    let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
    assert_eq!(error.offset, 7);
}

#[test]
fn test_next_token_streams() {
    let mut lexer = Lexer::new("a.b");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::Dot);
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_kind_names() {
    assert_eq!(TokenKind::LeftBrace.to_string(), "leftBrace");
    assert_eq!(TokenKind::ReservedWord.to_string(), "reservedWord");
    assert_eq!(TokenKind::ThisKeyword.to_string(), "thisKeyword");
    assert_eq!(TokenKind::NumberLiteral.to_string(), "numberLiteral");
    assert_eq!(TokenKind::Eof.to_string(), "eof");
}
