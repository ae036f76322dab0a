//! Lexer for the Refrain pattern DSL.
//!
//! The lexer converts pattern text into a stream of tokens. Runs of spaces
//! and tabs collapse into a single [`TokenKind::Ws`] token; `-` and `=` are
//! only legal as the start of `->` and `=>`; any other unknown character is
//! a lex error.

use refrain_foundation::{Error, Result};

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for Refrain pattern text.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
        }
    }

    /// Returns the next token from the source.
    ///
    /// # Errors
    /// Returns an error on an unknown character.
    pub fn next_token(&mut self) -> Result<Token> {
        let start = self.position;

        let Some(c) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start)));
        };

        let kind = match c {
            ' ' | '\t' => {
                while matches!(self.peek_char(), Some(' ' | '\t')) {
                    self.advance();
                }
                TokenKind::Ws
            }
            '|' => self.single(TokenKind::Pipe),
            '&' => self.single(TokenKind::Amp),
            '~' => self.single(TokenKind::Tilde),
            '^' => self.single(TokenKind::Caret),
            '$' => self.single(TokenKind::Dollar),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '-' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    return Err(Error::lex("expected '>' after '-'", start));
                }
            }
            '=' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    TokenKind::FatArrow
                } else {
                    return Err(Error::lex("expected '>' after '='", start));
                }
            }
            c if is_ident_start(c) => {
                let mut name = String::new();
                while let Some(c) = self.peek_char() {
                    if is_ident_char(c) {
                        name.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
                TokenKind::Ident(name)
            }
            c => {
                return Err(Error::lex(format!("unknown character {c:?}"), start));
            }
        };

        Ok(Token::new(kind, Span::new(start, self.position)))
    }

    /// Tokenizes all source and returns a vector of tokens ending in Eof.
    ///
    /// # Errors
    /// Returns an error on the first unknown character.
    pub fn tokenize_all(source: &str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Consumes one character and returns the given kind.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
        }
    }
}

/// Returns true if `c` can start an identifier.
const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier (not at start).
const fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
