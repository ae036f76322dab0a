//! Core types for the Refrain pattern counter.
//!
//! This crate provides:
//! - [`Error`] - Error types for every layer, with position context
//! - [`Fraction`] - Exact ratios for support, confidence, and lift
//!
//! Higher layers (`refrain_language`, `refrain_engine`, `refrain_runtime`)
//! all report failures through this crate's [`Result`] alias.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod fraction;

pub use error::{Error, ErrorKind};
pub use fraction::Fraction;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
