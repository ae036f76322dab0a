//! End-to-end tests over the reference corpus.
//!
//! Scenario tests drive the full pipeline (text → corpus → patterns →
//! report); law tests check the algebraic properties of the evaluator
//! across exhaustively generated small sequences.

mod laws;
mod scenarios;
