//! The driver: evaluates patterns and bindings over a corpus and builds
//! report data.
//!
//! Element indices are built once when the miner is created and reused for
//! every pattern, binding, and sequence. The report is plain serializable
//! data; rendering lives in `refrain_runtime`.

use std::collections::BTreeSet;

use refrain_foundation::{Fraction, Result};
use refrain_language::{Pattern, parse, substitute_all};
use serde::Serialize;

use crate::binding::{Binding, VarDecl, enumerate_bindings};
use crate::corpus::Corpus;
use crate::eval::matches;
use crate::index::ElementIndex;
use crate::stats::{JointStats, support};

/// Evaluates patterns over a corpus whose indices are built once.
pub struct Miner<'a> {
    corpus: &'a Corpus,
    indices: Vec<ElementIndex>,
}

/// Support and matching lines for one pattern.
#[derive(Clone, Debug, Serialize)]
pub struct PatternEntry {
    /// Display text of the pattern.
    pub pattern: String,
    /// Matching sequence indices, ordered.
    pub matches: Vec<usize>,
    /// Fraction of sequences matching.
    pub support: Fraction,
}

/// Entries for every pattern of an invocation, plus joint statistics when
/// there is more than one pattern.
#[derive(Clone, Debug, Serialize)]
pub struct ReportBlock {
    /// One entry per pattern, in invocation order.
    pub entries: Vec<PatternEntry>,
    /// Joint support and ordered-pair association rules (two or more
    /// patterns only).
    pub joint: Option<JointStats>,
}

/// A report block for one concrete binding.
#[derive(Clone, Debug, Serialize)]
pub struct BindingBlock {
    /// The binding, in declaration order.
    pub binding: Binding,
    /// The per-binding results.
    pub block: ReportBlock,
}

/// The full result of one `count` invocation.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Number of sequences in the corpus.
    pub corpus_size: usize,
    /// Aggregate results; for variable patterns, the union over bindings.
    pub aggregate: ReportBlock,
    /// One block per binding (empty without variables).
    pub bindings: Vec<BindingBlock>,
    /// The variable whose domain resolved empty, if any; the pattern then
    /// keeps support 0.
    pub empty_domain: Option<String>,
    /// Parse errors for patterns that were skipped; the rest proceed.
    pub errors: Vec<String>,
}

impl<'a> Miner<'a> {
    /// Creates a miner, indexing every sequence of the corpus.
    #[must_use]
    pub fn new(corpus: &'a Corpus) -> Self {
        let indices = corpus.sequences().iter().map(ElementIndex::build).collect();
        tracing::debug!(sequences = corpus.len(), "indexed corpus");
        Self { corpus, indices }
    }

    /// Returns the per-sequence indices, in corpus order.
    #[must_use]
    pub fn indices(&self) -> &[ElementIndex] {
        &self.indices
    }

    /// Returns the indices of sequences matching `pattern`.
    #[must_use]
    pub fn match_set(&self, pattern: &Pattern) -> BTreeSet<usize> {
        self.indices
            .iter()
            .enumerate()
            .filter(|(_, index)| matches(pattern, index))
            .map(|(i, _)| i)
            .collect()
    }

    /// Runs parsed patterns with variable declarations.
    #[must_use]
    pub fn run(&self, patterns: &[Pattern], variables: &[VarDecl]) -> Report {
        let empty_domain = variables
            .iter()
            .find(|decl| decl.universe(self.corpus.alphabet()).is_empty())
            .map(|decl| decl.name.clone());
        let bindings = match &empty_domain {
            None => enumerate_bindings(variables, self.corpus.alphabet()).unwrap_or_default(),
            Some(name) => {
                tracing::warn!(variable = %name, "variable domain is empty");
                Vec::new()
            }
        };

        let binding_blocks: Vec<BindingBlock> = bindings
            .iter()
            .map(|binding| {
                let replaces = binding.replaces();
                let sets: Vec<(String, BTreeSet<usize>)> = patterns
                    .iter()
                    .map(|pattern| {
                        let bound = substitute_all(pattern, &replaces);
                        let set = self.match_set(&bound);
                        (bound.to_string(), set)
                    })
                    .collect();
                BindingBlock {
                    binding: binding.clone(),
                    block: self.block(sets),
                }
            })
            .collect();

        // Aggregate: direct evaluation without variables, union over
        // bindings with them. With an empty domain there is nothing to
        // bind, and the variable cannot match as a literal: support 0.
        let aggregate_sets: Vec<(String, BTreeSet<usize>)> = patterns
            .iter()
            .enumerate()
            .map(|(p, pattern)| {
                let set = if variables.is_empty() {
                    self.match_set(pattern)
                } else {
                    binding_blocks
                        .iter()
                        .flat_map(|b| b.block.entries[p].matches.iter().copied())
                        .collect()
                };
                (pattern.to_string(), set)
            })
            .collect();

        tracing::debug!(
            patterns = patterns.len(),
            bindings = binding_blocks.len(),
            "mined corpus"
        );

        Report {
            corpus_size: self.corpus.len(),
            aggregate: self.block(aggregate_sets),
            bindings: binding_blocks,
            empty_domain,
            errors: Vec::new(),
        }
    }

    /// Parses pattern and variable texts, then runs.
    ///
    /// A pattern that fails to parse is recorded in the report's `errors`
    /// and the remaining patterns proceed independently.
    ///
    /// # Errors
    /// Returns an error only for a malformed variable declaration.
    pub fn run_texts(&self, patterns: &[String], variables: &[String]) -> Result<Report> {
        let decls = variables
            .iter()
            .map(|text| VarDecl::parse(text))
            .collect::<Result<Vec<_>>>()?;

        let mut parsed = Vec::new();
        let mut errors = Vec::new();
        for text in patterns {
            match parse(text) {
                Ok(pattern) => parsed.push(pattern),
                Err(e) => errors.push(e.to_string()),
            }
        }

        let mut report = self.run(&parsed, &decls);
        report.errors = errors;
        Ok(report)
    }

    /// Builds a report block from named match sets.
    fn block(&self, sets: Vec<(String, BTreeSet<usize>)>) -> ReportBlock {
        let n = self.corpus.len();
        let joint = if sets.len() > 1 {
            Some(JointStats::build(&sets, n))
        } else {
            None
        };
        let entries = sets
            .into_iter()
            .map(|(pattern, set)| PatternEntry {
                support: support(&set, n),
                matches: set.into_iter().collect(),
                pattern,
            })
            .collect();
        ReportBlock { entries, joint }
    }
}
