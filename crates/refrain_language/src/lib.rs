//! Lexer, parser, and pattern tree for the Refrain pattern DSL.
//!
//! This crate provides:
//! - [`Lexer`] - Converts pattern text into tokens
//! - [`Parser`] - Builds a [`Pattern`] tree from tokens
//! - [`Pattern`] - The tagged expression tree evaluated by `refrain_engine`
//! - [`substitute`] - Pure-tree variable substitution
//!
//! The surface syntax: whitespace conjoins, `|` alternates, `&` intersects
//! positions, `->`/`=>` order in time, `~`/`^`/`$` prefix-negate and pin to
//! the first/last position, and `[...]`/`{...}` delimit slice windows.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod subst;
pub mod token;

pub use ast::Pattern;
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use subst::{substitute, substitute_all};
pub use token::{Token, TokenKind};
