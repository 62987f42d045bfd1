//! Infix formula lexer.

use crate::error::{Error, Result};

/// Token types for infix formulas.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier or keyword (resolved against the keyword table by
    /// the parser, not here).
    Identifier(String),
    /// Integer literal.
    Integer(i32),
    /// Decimal literal without an exponent part.
    Real(f64),
    /// Literal in scientific notation, kept unmultiplied.
    RealExponent { mantissa: f64, exponent: i32 },
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `<`
    Lt,
    /// `<=`
    Leq,
    /// `>`
    Gt,
    /// `>=`
    Geq,
    /// `=` or `==`
    Eq,
    /// `!=`
    Neq,
    /// `&&`
    And,
    /// `||`
    Or,
    /// End of input.
    Eof,
}

/// A token with the byte offset it starts at.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

/// Lexer for infix formulas.
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.token == Token::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<SpannedToken> {
        self.skip_whitespace();

        let position = self.position();

        let token = match self.peek_char() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('+') => {
                self.advance();
                Token::Plus
            }
            Some('-') => {
                self.advance();
                Token::Minus
            }
            Some('*') => {
                self.advance();
                Token::Star
            }
            Some('/') => {
                self.advance();
                Token::Slash
            }
            Some('^') => {
                self.advance();
                Token::Caret
            }
            Some('<') => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    Token::Leq
                } else {
                    Token::Lt
                }
            }
            Some('>') => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    Token::Geq
                } else {
                    Token::Gt
                }
            }
            Some('=') => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                }
                Token::Eq
            }
            Some('!') => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    Token::Neq
                } else {
                    return Err(Error::FormulaParse {
                        message: "expected '=' after '!'".into(),
                        position,
                    });
                }
            }
            Some('&') => {
                self.advance();
                if self.peek_char() == Some('&') {
                    self.advance();
                    Token::And
                } else {
                    return Err(Error::FormulaParse {
                        message: "expected '&' after '&'".into(),
                        position,
                    });
                }
            }
            Some('|') => {
                self.advance();
                if self.peek_char() == Some('|') {
                    self.advance();
                    Token::Or
                } else {
                    return Err(Error::FormulaParse {
                        message: "expected '|' after '|'".into(),
                        position,
                    });
                }
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                Token::Identifier(self.read_identifier())
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.read_number(position)?,
            Some(c) => {
                return Err(Error::FormulaParse {
                    message: format!("unexpected character '{c}'"),
                    position,
                });
            }
        };

        Ok(SpannedToken { token, position })
    }

    fn position(&mut self) -> usize {
        match self.chars.peek() {
            Some((idx, _)) => *idx,
            None => self.input.len(),
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    /// Read a numeric literal: digits, an optional decimal point, and
    /// an optional exponent part. A literal with an exponent stays
    /// split into mantissa and exponent; a plain integer that does not
    /// fit `i32` falls back to a real.
    fn read_number(&mut self, position: usize) -> Result<Token> {
        let start = self.position();
        let mut has_dot = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let mantissa_end = self.position();
        let mantissa_str = &self.input[start..mantissa_end];
        if mantissa_str == "." {
            return Err(Error::FormulaParse {
                message: "malformed number".into(),
                position,
            });
        }

        let exponent_str = if matches!(self.peek_char(), Some('e') | Some('E')) {
            self.advance();
            let exp_start = self.position();
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.advance();
            }
            let mut has_digits = false;
            while let Some(c) = self.peek_char() {
                if c.is_ascii_digit() {
                    has_digits = true;
                    self.advance();
                } else {
                    break;
                }
            }
            if !has_digits {
                return Err(Error::FormulaParse {
                    message: "missing digits in exponent".into(),
                    position,
                });
            }
            Some(&self.input[exp_start..self.position()])
        } else {
            None
        };

        if let Some(exponent_str) = exponent_str {
            let mantissa: f64 = mantissa_str.parse().map_err(|_| Error::FormulaParse {
                message: format!("malformed number {mantissa_str:?}"),
                position,
            })?;
            let exponent: i32 = exponent_str.parse().map_err(|_| Error::FormulaParse {
                message: format!("exponent out of range: {exponent_str}"),
                position,
            })?;
            return Ok(Token::RealExponent { mantissa, exponent });
        }

        if has_dot {
            let value: f64 = mantissa_str.parse().map_err(|_| Error::FormulaParse {
                message: format!("malformed number {mantissa_str:?}"),
                position,
            })?;
            return Ok(Token::Real(value));
        }

        match mantissa_str.parse::<i32>() {
            Ok(value) => Ok(Token::Integer(value)),
            Err(_) => {
                let value: f64 = mantissa_str.parse().map_err(|_| Error::FormulaParse {
                    message: format!("malformed number {mantissa_str:?}"),
                    position,
                })?;
                Ok(Token::Real(value))
            }
        }
    }
}
