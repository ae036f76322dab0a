//! Corpus model, element index, evaluator, bindings, and statistics.
//!
//! This crate provides:
//! - [`Corpus`] - Sequences of groups parsed from the `-1`/`-2` text format
//! - [`ElementIndex`] - Per-sequence occurrence and insertion/removal indices
//! - [`eval`] - The pattern evaluator producing match sets of group indices
//! - [`VarDecl`] / [`enumerate_bindings`] - Variable domains and injective bindings
//! - [`Miner`] - The driver gluing all of the above into a [`Report`]
//!
//! Evaluation is a pure function of (pattern, element index, window);
//! indices are built once per corpus and reused across every pattern and
//! binding.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binding;
pub mod corpus;
pub mod eval;
pub mod index;
pub mod miner;
pub mod stats;

pub use binding::{Binding, Domain, VarDecl, enumerate_bindings};
pub use corpus::{Corpus, Group, Sequence, SequenceFormat, select_lines};
pub use eval::{EvalContext, MatchSet, eval, matches};
pub use index::ElementIndex;
pub use miner::{BindingBlock, Miner, PatternEntry, Report, ReportBlock};
pub use stats::{AssociationRule, JointStats, support};
