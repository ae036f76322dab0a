//! Report rendering, REPL, and CLI for Refrain.
//!
//! This crate provides:
//! - [`render_text`] / [`render_csv`] / [`render_json`] - Report formatters
//! - [`Repl`] - Interactive pattern queries against a loaded corpus
//! - The `refrain` binary with the `count`, `select`, `show`, `convert`,
//!   and `repl` subcommands

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod repl;
pub mod report;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use report::{DisplayConfig, render_csv, render_json, render_text};
