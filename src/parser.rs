use crate::{
    ast::{
        AccessExpression, AccessHead, Accessor, Expr, IndexKey, Token, TokenKind,
        tokens::number_to_key,
    },
    error::{Expected, SyntaxError},
    lexer::tokenize,
};
use std::mem;

/// Tokens that may start a value, in the order error messages list them.
pub const VALUE_START: [TokenKind; 8] = [
    TokenKind::FalseLiteral,
    TokenKind::NullLiteral,
    TokenKind::StringLiteral,
    TokenKind::TrueLiteral,
    TokenKind::NumberLiteral,
    TokenKind::LeftBrace,
    TokenKind::LeftBracket,
    TokenKind::Identifier,
];

/// Tokens accepted where an object property (or the closing brace) is due.
pub const PROPERTY_START: [TokenKind; 5] = [
    TokenKind::RightBrace,
    TokenKind::Identifier,
    TokenKind::ReservedWord,
    TokenKind::StringLiteral,
    TokenKind::NumberLiteral,
];

/// Deepest nesting of object and array literals a record may use.
pub const MAX_DEPTH: usize = 128;

/// Values still allowed once [`MAX_DEPTH`] is reached.
const SCALAR_START: [TokenKind; 6] = [
    TokenKind::FalseLiteral,
    TokenKind::NullLiteral,
    TokenKind::StringLiteral,
    TokenKind::TrueLiteral,
    TokenKind::NumberLiteral,
    TokenKind::Identifier,
];

pub struct Parser<'a> {
    input: &'a str,
    /// Non-separator tokens, always ending in `eof`
    tokens: Vec<Token>,
    position: usize,
    /// Open object and array literals
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser::from_tokens(input, tokenize(input))
    }

    /// Builds a parser over tokens already produced for `input`.
    ///
    /// Separators are dropped and a missing `eof` is appended.
    pub fn from_tokens(input: &'a str, tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Separator)
            .collect();
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = input.encode_utf16().count();
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Parser {
            input,
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Takes the current token's text and moves past it.
    fn take_text(&mut self) -> String {
        let text = mem::take(&mut self.tokens[self.position].text);
        self.advance();
        text
    }

    fn take_number(&mut self) -> Result<f64, SyntaxError> {
        let n = self
            .current()
            .number_value()
            .ok_or_else(|| self.unexpected(Expected::One(TokenKind::NumberLiteral)))?;
        self.advance();
        Ok(n)
    }

    fn unexpected(&self, expected: Expected) -> SyntaxError {
        let token = self.current();
        SyntaxError {
            input: self.input.to_string(),
            unexpected: token.kind,
            expected,
            offset: self.position,
            position: token.offset,
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), SyntaxError> {
        if !self.check(expected) {
            return Err(self.unexpected(Expected::One(expected)));
        }
        self.advance();
        Ok(())
    }

    /// Parses a complete options record: one value followed by the end of
    /// input.
    pub fn parse(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_value()?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    fn parse_value(&mut self) -> Result<Expr, SyntaxError> {
        match self.kind() {
            TokenKind::FalseLiteral => {
                self.advance();
                Ok(Expr::Boolean(false))
            }
            TokenKind::TrueLiteral => {
                self.advance();
                Ok(Expr::Boolean(true))
            }
            TokenKind::NullLiteral => {
                self.advance();
                Ok(Expr::Null)
            }
            TokenKind::NumberLiteral => self.take_number().map(Expr::Number),
            TokenKind::StringLiteral => Ok(Expr::String(self.take_text())),
            TokenKind::LeftBrace | TokenKind::LeftBracket if self.depth >= MAX_DEPTH => {
                Err(self.unexpected(Expected::OneOf(SCALAR_START.to_vec())))
            }
            TokenKind::LeftBrace => {
                self.depth += 1;
                let expr = self.parse_object_literal();
                self.depth -= 1;
                expr
            }
            TokenKind::LeftBracket => {
                self.depth += 1;
                let expr = self.parse_array_literal();
                self.depth -= 1;
                expr
            }
            TokenKind::Identifier => self.parse_access().map(Expr::Access),
            // Reserved words and `this` land here too
            _ => Err(self.unexpected(Expected::OneOf(VALUE_START.to_vec()))),
        }
    }

    fn parse_property_name(&mut self) -> Result<String, SyntaxError> {
        match self.kind() {
            TokenKind::Identifier
            | TokenKind::ReservedWord
            | TokenKind::ThisKeyword
            | TokenKind::TrueLiteral
            | TokenKind::FalseLiteral
            | TokenKind::NullLiteral
            | TokenKind::StringLiteral => Ok(self.take_text()),
            TokenKind::NumberLiteral => self.take_number().map(number_to_key),
            _ => Err(self.unexpected(Expected::OneOf(PROPERTY_START.to_vec()))),
        }
    }

    fn parse_object_literal(&mut self) -> Result<Expr, SyntaxError> {
        self.advance(); // Consume '{'
        let mut pairs = vec![];

        loop {
            if self.check(TokenKind::RightBrace) {
                self.advance();
                break;
            }

            let key = self.parse_property_name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_value()?;
            pairs.push((key, value));

            match self.kind() {
                TokenKind::Comma => self.advance(),
                TokenKind::RightBrace => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(self.unexpected(Expected::OneOf(vec![
                        TokenKind::Comma,
                        TokenKind::RightBrace,
                    ])));
                }
            }
        }

        Ok(Expr::Object(pairs))
    }

    fn parse_array_literal(&mut self) -> Result<Expr, SyntaxError> {
        self.advance(); // Consume '['
        let mut elements = vec![];

        loop {
            match self.kind() {
                TokenKind::RightBracket => {
                    self.advance();
                    break;
                }
                // Elision
                TokenKind::Comma => {
                    self.advance();
                    elements.push(None);
                }
                _ => {
                    elements.push(Some(self.parse_value()?));

                    // A comma after an element only separates; it adds no hole
                    match self.kind() {
                        TokenKind::Comma => self.advance(),
                        TokenKind::RightBracket => {
                            self.advance();
                            break;
                        }
                        _ => {
                            return Err(self.unexpected(Expected::OneOf(vec![
                                TokenKind::Comma,
                                TokenKind::RightBracket,
                            ])));
                        }
                    }
                }
            }
        }

        Ok(Expr::Array(elements))
    }

    /// Parse access expressions: `name`, `name('arg')`, then any number of
    /// `.name` / `['key']` / `[0]`.
    fn parse_access(&mut self) -> Result<AccessExpression, SyntaxError> {
        let name = self.take_text();

        let head = if self.check(TokenKind::LeftParen) {
            self.advance(); // Consume '('
            if !self.check(TokenKind::StringLiteral) {
                return Err(self.unexpected(Expected::One(TokenKind::StringLiteral)));
            }
            let arg0 = self.take_text();
            self.expect(TokenKind::RightParen)?;
            AccessHead::Call { target: name, arg0 }
        } else {
            AccessHead::Identifier(name)
        };

        let mut tail = vec![];
        loop {
            match self.kind() {
                TokenKind::Dot => {
                    self.advance(); // Consume '.'
                    match self.kind() {
                        TokenKind::Identifier | TokenKind::ReservedWord => {
                            tail.push(Accessor::Name(self.take_text()));
                        }
                        _ => return Err(self.unexpected(Expected::One(TokenKind::Identifier))),
                    }
                }
                TokenKind::LeftBracket => {
                    self.advance(); // Consume '['
                    let key = match self.kind() {
                        TokenKind::StringLiteral => IndexKey::Name(self.take_text()),
                        TokenKind::NumberLiteral => IndexKey::Number(self.take_number()?),
                        _ => {
                            return Err(self.unexpected(Expected::OneOf(vec![
                                TokenKind::StringLiteral,
                                TokenKind::NumberLiteral,
                            ])));
                        }
                    };
                    self.expect(TokenKind::RightBracket)?;
                    tail.push(Accessor::Index(key));
                }
                _ => break,
            }
        }

        Ok(AccessExpression { head, tail })
    }
}

#[test]
fn test_sparse_array() {
    let expr = Parser::new("[,,, 1, 2, 3]").parse().unwrap();
    match expr {
        Expr::Array(elements) => {
            assert_eq!(elements.len(), 6);
            assert!(elements[..3].iter().all(Option::is_none));
            assert_eq!(elements[3], Some(Expr::Number(1.0)));
        }
        other => panic!("Expected array, got {:?}", other),
    }
}

#[test]
fn test_call_only_at_head() {
    let err = Parser::new("{ a: b.c('x') }").parse().unwrap_err();
    assert_eq!(err.unexpected, TokenKind::LeftParen);
    assert_eq!(err.offset, 6);
    assert_eq!(err.position, 8);
}
