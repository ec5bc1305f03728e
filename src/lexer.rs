use crate::ast::{Token, TokenKind};

/// Words that may name a property but never appear as a value.
pub const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "return",
    "super",
    "switch",
    "throw",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
];

/// Tokenizes an options record.
///
/// The result always ends with an `eof` token. Separators are included;
/// the parser drops them.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// UTF-16 offset of `position`
    offset: usize,
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn keyword_kind(name: &str) -> TokenKind {
    match name {
        "true" => TokenKind::TrueLiteral,
        "false" => TokenKind::FalseLiteral,
        "null" => TokenKind::NullLiteral,
        "this" => TokenKind::ThisKeyword,
        _ if RESERVED_WORDS.contains(&name) => TokenKind::ReservedWord,
        _ => TokenKind::Identifier,
    }
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn peek_is_digit(&self, offset: usize) -> bool {
        self.peek_char(offset).is_some_and(|c| c.is_ascii_digit())
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            self.offset += ch.len_utf16();
        }
    }

    fn source_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let (start, offset) = (self.position, self.offset);
        self.advance();
        Token::new(kind, self.source_from(start), offset)
    }

    /// Swallows the rest of the input into one error token.
    fn error_to_end(&mut self, start: usize, offset: usize) -> Token {
        while self.current_char().is_some() {
            self.advance();
        }
        Token::new(TokenKind::Error, self.source_from(start), offset)
    }

    /// Consumes exactly `count` hex digits.
    fn read_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut code = 0;
        for i in 0..count {
            code = code * 16 + self.peek_char(i)?.to_digit(16)?;
        }
        for _ in 0..count {
            self.advance();
        }
        Some(code)
    }

    /// Reads the four digits after `\u`, combining a surrogate pair when a
    /// second `\uHHHH` follows a high surrogate.
    fn read_unicode_escape(&mut self) -> Option<char> {
        let unit = self.read_hex_digits(4)?;

        if (0xd800..0xdc00).contains(&unit)
            && self.current_char() == Some('\\')
            && self.peek_char(1) == Some('u')
        {
            let low = (2..6)
                .map(|i| self.peek_char(i).and_then(|c| c.to_digit(16)))
                .try_fold(0, |acc, d| d.map(|d| acc * 16 + d));
            if let Some(low @ 0xdc00..0xe000) = low {
                for _ in 0..6 {
                    self.advance();
                }
                let code = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                return char::from_u32(code);
            }
        }

        Some(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn read_separator(&mut self) -> Token {
        let (start, offset) = (self.position, self.offset);
        while self.current_char().is_some_and(is_separator) {
            self.advance();
        }
        Token::new(TokenKind::Separator, self.source_from(start), offset)
    }

    fn read_number(&mut self) -> Token {
        let (start, offset) = (self.position, self.offset);

        if matches!(self.current_char(), Some('+' | '-')) {
            self.advance();
        }

        if self.current_char() == Some('0')
            && matches!(self.peek_char(1), Some('x' | 'X'))
            && self.peek_char(2).is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance();
            self.advance();
            while self.current_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return Token::new(TokenKind::NumberLiteral, self.source_from(start), offset);
        }

        while self.peek_is_digit(0) {
            self.advance();
        }

        if self.current_char() == Some('.') {
            self.advance();
            while self.peek_is_digit(0) {
                self.advance();
            }
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let digits_at = if matches!(self.peek_char(1), Some('+' | '-')) { 2 } else { 1 };
            if self.peek_is_digit(digits_at) {
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.peek_is_digit(0) {
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::NumberLiteral, self.source_from(start), offset)
    }

    fn read_string(&mut self, quote: char) -> Token {
        let (start, offset) = (self.position, self.offset);
        let mut result = String::new();
        self.advance(); // Consume opening quote

        loop {
            match self.current_char() {
                None => return self.error_to_end(start, offset),
                Some(c) if c == quote => {
                    self.advance();
                    return Token::new(TokenKind::StringLiteral, result, offset);
                }
                Some('\r' | '\n') => return self.error_to_end(start, offset),
                Some('\\') => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        None => return self.error_to_end(start, offset),
                        Some('x') => {
                            self.advance();
                            match self.read_hex_digits(2).and_then(char::from_u32) {
                                Some(ch) => result.push(ch),
                                None => return self.error_to_end(start, offset),
                            }
                        }
                        Some('u') => {
                            self.advance();
                            match self.read_unicode_escape() {
                                Some(ch) => result.push(ch),
                                None => return self.error_to_end(start, offset),
                            }
                        }
                        // Line continuation
                        Some('\r') => {
                            self.advance();
                            if self.current_char() == Some('\n') {
                                self.advance();
                            }
                        }
                        Some(ch) if is_line_terminator(ch) => self.advance(),
                        Some(ch) => {
                            result.push(match ch {
                                'b' => '\u{8}',
                                'f' => '\u{c}',
                                'n' => '\n',
                                'r' => '\r',
                                't' => '\t',
                                'v' => '\u{b}',
                                '0' => '\0',
                                other => other,
                            });
                            self.advance();
                        }
                    }
                }
                Some(ch) => {
                    result.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn read_identifier(&mut self) -> Token {
        let (start, offset) = (self.position, self.offset);
        let mut name = String::new();

        loop {
            match self.current_char() {
                Some('\\') => {
                    self.advance();
                    if self.current_char() != Some('u') {
                        return Token::new(TokenKind::Error, self.source_from(start), offset);
                    }
                    self.advance();

                    let decoded = self.read_unicode_escape().filter(|&c| {
                        if name.is_empty() {
                            is_identifier_start(c)
                        } else {
                            is_identifier_part(c)
                        }
                    });
                    match decoded {
                        Some(ch) => name.push(ch),
                        None => return Token::new(TokenKind::Error, self.source_from(start), offset),
                    }
                }
                Some(ch) if is_identifier_part(ch) => {
                    name.push(ch);
                    self.advance();
                }
                _ => break,
            }
        }

        Token::new(keyword_kind(&name), name, offset)
    }

    pub fn next_token(&mut self) -> Token {
        match self.current_char() {
            None => Token::new(TokenKind::Eof, "", self.offset),
            Some(ch) if is_separator(ch) => self.read_separator(),
            Some('{') => self.single(TokenKind::LeftBrace),
            Some('}') => self.single(TokenKind::RightBrace),
            Some('[') => self.single(TokenKind::LeftBracket),
            Some(']') => self.single(TokenKind::RightBracket),
            Some('(') => self.single(TokenKind::LeftParen),
            Some(')') => self.single(TokenKind::RightParen),
            Some(':') => self.single(TokenKind::Colon),
            Some(',') => self.single(TokenKind::Comma),
            Some(';') => self.single(TokenKind::Semicolon),
            Some('.') => {
                if self.peek_is_digit(1) {
                    self.read_number()
                } else {
                    self.single(TokenKind::Dot)
                }
            }
            Some('+' | '-') => {
                // The sign belongs to the number; there is no unary operator
                if self.peek_is_digit(1) || (self.peek_char(1) == Some('.') && self.peek_is_digit(2)) {
                    self.read_number()
                } else {
                    self.single(TokenKind::Error)
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(quote @ ('"' | '\'')) => self.read_string(quote),
            Some(ch) if is_identifier_start(ch) || ch == '\\' => self.read_identifier(),
            Some(_) => self.single(TokenKind::Error),
        }
    }

    /// Consumes the lexer, returning every token up to and including `eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}

#[test]
fn test_keywords() {
    let kinds: Vec<TokenKind> = tokenize("true false null this function select")
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Separator)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::TrueLiteral,
            TokenKind::FalseLiteral,
            TokenKind::NullLiteral,
            TokenKind::ThisKeyword,
            TokenKind::ReservedWord,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_offsets_skip_separators() {
    let tokens = tokenize("{ a:\t1 }");
    let a = tokens.iter().find(|t| t.kind == TokenKind::Identifier).unwrap();
    assert_eq!(a.offset, 2);
    let one = tokens.iter().find(|t| t.kind == TokenKind::NumberLiteral).unwrap();
    assert_eq!(one.offset, 5);
    assert_eq!(tokens.last().unwrap().offset, 8);
}

#[test]
fn test_offsets_count_utf16_units() {
    let tokens = tokenize("'😀' x");
    let x = tokens.iter().find(|t| t.kind == TokenKind::Identifier).unwrap();
    assert_eq!(x.offset, 5);
}
