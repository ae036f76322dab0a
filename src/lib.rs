//! Refrain - Counts patterns in sequences of groups
//!
//! This crate re-exports all layers of the Refrain system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: refrain_runtime    — Report rendering, REPL, CLI
//! Layer 2: refrain_engine     — Corpus, element index, evaluator, stats
//! Layer 1: refrain_language   — Lexer, parser, pattern tree
//! Layer 0: refrain_foundation — Core types (Error, Fraction)
//! ```

pub use refrain_engine as engine;
pub use refrain_foundation as foundation;
pub use refrain_language as language;
pub use refrain_runtime as runtime;
