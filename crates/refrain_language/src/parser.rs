//! Parser for the Refrain pattern DSL.
//!
//! Recursive descent over the token vector with this precedence ladder,
//! loosest to tightest:
//!
//! 1. `|` (Or, n-ary)
//! 2. whitespace (And, n-ary)
//! 3. `->` / `=>` (Seq / LooseSeq, left-associative)
//! 4. `&` (Intersect, n-ary)
//! 5. stacked unary prefixes `~`, `^`, `$`
//! 6. atoms: identifiers, `( expr )`, slices `[ expr ]` / `{ expr }`
//!
//! Identifiers starting with `In` or `Out` followed by a non-empty
//! identifier become insertion/removal nodes here, not in the lexer.

use refrain_foundation::{Error, Result};

use crate::ast::Pattern;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Parser for Refrain pattern text.
pub struct Parser {
    /// All tokens, ending in Eof.
    tokens: Vec<Token>,
    /// Index of the current token.
    pos: usize,
}

impl Parser {
    /// Creates a new parser for the given source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be tokenized.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            tokens: Lexer::tokenize_all(source)?,
            pos: 0,
        })
    }

    /// Parses the full source as one pattern.
    ///
    /// # Errors
    /// Returns an error if the source is empty or structurally invalid.
    pub fn parse(&mut self) -> Result<Pattern> {
        self.skip_ws();
        if self.current().kind == TokenKind::Eof {
            return Err(self.error("empty pattern"));
        }
        let pattern = self.parse_or()?;
        self.skip_ws();
        if self.current().kind != TokenKind::Eof {
            return Err(self.error(&format!("unexpected {}", self.current().kind.name())));
        }
        Ok(pattern)
    }

    /// Parses the `|` level.
    fn parse_or(&mut self) -> Result<Pattern> {
        let mut children = vec![self.parse_and()?];
        loop {
            let save = self.pos;
            self.skip_ws();
            if self.current().kind == TokenKind::Pipe {
                self.advance();
                self.skip_ws();
                children.push(self.parse_and()?);
            } else {
                self.pos = save;
                break;
            }
        }
        Ok(fold(children, Pattern::Or))
    }

    /// Parses the whitespace-conjunction level.
    ///
    /// A whitespace token conjoins only when the token after it can start
    /// an operand; otherwise it is padding around some outer operator.
    fn parse_and(&mut self) -> Result<Pattern> {
        let mut children = vec![self.parse_seq()?];
        while self.current().kind == TokenKind::Ws && self.peek(1).starts_operand() {
            self.advance();
            children.push(self.parse_seq()?);
        }
        Ok(fold(children, Pattern::And))
    }

    /// Parses the `->` / `=>` level, left-associative.
    fn parse_seq(&mut self) -> Result<Pattern> {
        let mut left = self.parse_intersect()?;
        loop {
            let save = self.pos;
            self.skip_ws();
            match self.current().kind {
                TokenKind::Arrow => {
                    self.advance();
                    self.skip_ws();
                    let right = self.parse_intersect()?;
                    left = Pattern::seq(left, right);
                }
                TokenKind::FatArrow => {
                    self.advance();
                    self.skip_ws();
                    let right = self.parse_intersect()?;
                    left = Pattern::loose_seq(left, right);
                }
                _ => {
                    self.pos = save;
                    break;
                }
            }
        }
        Ok(left)
    }

    /// Parses the `&` level.
    fn parse_intersect(&mut self) -> Result<Pattern> {
        let mut children = vec![self.parse_unary()?];
        loop {
            let save = self.pos;
            self.skip_ws();
            if self.current().kind == TokenKind::Amp {
                self.advance();
                self.skip_ws();
                children.push(self.parse_unary()?);
            } else {
                self.pos = save;
                break;
            }
        }
        Ok(fold(children, Pattern::Intersect))
    }

    /// Parses a chain of `~`/`^`/`$` prefixes and the atom they wrap.
    fn parse_unary(&mut self) -> Result<Pattern> {
        let mut wrappers: Vec<fn(Pattern) -> Pattern> = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Tilde => wrappers.push(Pattern::negate),
                TokenKind::Caret => wrappers.push(Pattern::first),
                TokenKind::Dollar => wrappers.push(Pattern::last),
                _ => break,
            }
            self.advance();
            self.skip_ws();
        }
        let mut atom = self.parse_atom()?;
        for wrap in wrappers.into_iter().rev() {
            atom = wrap(atom);
        }
        Ok(atom)
    }

    /// Parses an atom: identifier, group, or slice.
    fn parse_atom(&mut self) -> Result<Pattern> {
        match self.current().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(ident_pattern(&name))
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_ws();
                if self.current().kind == TokenKind::RParen {
                    return Err(self.error("empty group"));
                }
                let inner = self.parse_or()?;
                self.skip_ws();
                if self.current().kind != TokenKind::RParen {
                    return Err(self.error(&format!(
                        "expected ')', found {}",
                        self.current().kind.name()
                    )));
                }
                self.advance();
                Ok(inner)
            }
            open @ (TokenKind::LBracket | TokenKind::LBrace) => {
                let open_left = open == TokenKind::LBrace;
                self.advance();
                self.skip_ws();
                if matches!(
                    self.current().kind,
                    TokenKind::RBracket | TokenKind::RBrace
                ) {
                    return Err(self.error("empty slice"));
                }
                let body = self.parse_or()?;
                self.skip_ws();
                let open_right = match self.current().kind {
                    TokenKind::RBracket => false,
                    TokenKind::RBrace => true,
                    _ => {
                        return Err(self.error(&format!(
                            "expected ']' or '}}', found {}",
                            self.current().kind.name()
                        )));
                    }
                };
                self.advance();
                Ok(Pattern::slice(body, open_left, open_right))
            }
            TokenKind::Eof => Err(self.error("unexpected end of pattern")),
            other => Err(self.error(&format!("expected pattern, found {}", other.name()))),
        }
    }

    /// Skips a whitespace token if present.
    fn skip_ws(&mut self) {
        if self.current().kind == TokenKind::Ws {
            self.advance();
        }
    }

    /// Returns the current token.
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the token `n` positions ahead (Eof past the end).
    fn peek(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Creates a parse error at the current token.
    fn error(&self, message: &str) -> Error {
        Error::parse(message, self.current().span.start)
    }
}

/// Collapses a one-element child list; wraps longer lists in `make`.
fn fold(mut children: Vec<Pattern>, make: fn(Vec<Pattern>) -> Pattern) -> Pattern {
    if children.len() == 1 {
        children.pop().expect("one child")
    } else {
        make(children)
    }
}

/// Builds the pattern for a bare identifier, splitting `In`/`Out` prefixes.
fn ident_pattern(name: &str) -> Pattern {
    if let Some(rest) = name.strip_prefix("In") {
        if is_identifier(rest) {
            return Pattern::insertion(rest);
        }
    }
    if let Some(rest) = name.strip_prefix("Out") {
        if is_identifier(rest) {
            return Pattern::removal(rest);
        }
    }
    Pattern::elem(name)
}

/// Returns true if `text` is a non-empty identifier.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses pattern text into a [`Pattern`].
///
/// # Errors
/// Returns an error, carrying the source text, if parsing fails.
pub fn parse(source: &str) -> Result<Pattern> {
    Parser::new(source)
        .and_then(|mut p| p.parse())
        .map_err(|e| e.with_pattern(source))
}
