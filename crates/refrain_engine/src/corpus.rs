//! Sequences of groups and the text format they are read from.
//!
//! A corpus is an ordered list of sequences; a sequence is an ordered list
//! of groups; a group is a set of element identifiers. In the text format,
//! tokens are whitespace-separated, `-1` terminates a group, and `-2`
//! terminates a sequence. Elements are any non-numeric token.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use refrain_foundation::{Error, Result};

/// A group: the elements observed at one time step.
pub type Group = Vec<String>;

/// An ordered list of groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    /// The groups, indexed from 0.
    pub groups: Vec<Group>,
}

impl Sequence {
    /// Creates a sequence from its groups.
    #[must_use]
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the sequence has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Renders the sequence back into the text format, terminators included.
    #[must_use]
    pub fn to_text(&self, format: &SequenceFormat) -> String {
        let mut parts: Vec<String> = Vec::new();
        for group in &self.groups {
            if !group.is_empty() {
                parts.push(group.join(" "));
            }
            parts.push(format.group_sep.clone());
        }
        parts.push(format.line_sep.clone());
        parts.join(" ")
    }
}

/// Separator configuration for the sequence text format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceFormat {
    /// Token terminating a sequence.
    pub line_sep: String,
    /// Token terminating a group.
    pub group_sep: String,
}

impl Default for SequenceFormat {
    fn default() -> Self {
        Self {
            line_sep: "-2".to_string(),
            group_sep: "-1".to_string(),
        }
    }
}

/// An ordered list of sequences plus the alphabet of all their elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    sequences: Vec<Sequence>,
    alphabet: BTreeSet<String>,
}

impl Corpus {
    /// Creates a corpus from already-built sequences.
    #[must_use]
    pub fn new(sequences: Vec<Sequence>) -> Self {
        let alphabet = sequences
            .iter()
            .flat_map(|s| s.groups.iter())
            .flat_map(|g| g.iter().cloned())
            .collect();
        Self {
            sequences,
            alphabet,
        }
    }

    /// Parses corpus text strictly.
    ///
    /// # Errors
    /// Returns an error on a numeric stray token or a sequence missing its
    /// terminator.
    pub fn from_text(text: &str, format: &SequenceFormat) -> Result<Self> {
        Self::parse(text, format, true)
    }

    /// Parses corpus text leniently: numeric tokens become elements and a
    /// trailing unterminated sequence is kept.
    ///
    /// Used for foreign formats (e.g. SPMF exports) where items are numbers.
    #[must_use]
    pub fn from_text_lenient(text: &str, format: &SequenceFormat) -> Self {
        Self::parse(text, format, false).expect("lenient parse cannot fail")
    }

    fn parse(text: &str, format: &SequenceFormat, strict: bool) -> Result<Self> {
        let mut sequences: Vec<Sequence> = Vec::new();
        let mut groups: Vec<Group> = Vec::new();
        let mut group: Group = Vec::new();
        let mut dangling = false;

        for token in text.split_whitespace() {
            if token == format.group_sep {
                groups.push(std::mem::take(&mut group));
                dangling = true;
            } else if token == format.line_sep {
                if !group.is_empty() {
                    groups.push(std::mem::take(&mut group));
                }
                sequences.push(Sequence::new(std::mem::take(&mut groups)));
                dangling = false;
            } else {
                if strict && token.parse::<i64>().is_ok() {
                    return Err(Error::input(
                        format!("unexpected numeric token {token:?}"),
                        sequences.len(),
                    ));
                }
                group.push(token.to_string());
                dangling = true;
            }
        }

        if dangling {
            if strict {
                return Err(Error::input(
                    format!("missing {:?} terminator", format.line_sep),
                    sequences.len(),
                ));
            }
            if !group.is_empty() {
                groups.push(group);
            }
            sequences.push(Sequence::new(groups));
        }

        tracing::debug!(sequences = sequences.len(), "parsed corpus text");
        Ok(Self::new(sequences))
    }

    /// Returns the number of sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if the corpus has no sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns the sequences in order.
    #[must_use]
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Returns the union alphabet of every element in the corpus.
    #[must_use]
    pub const fn alphabet(&self) -> &BTreeSet<String> {
        &self.alphabet
    }

    /// Returns the sequence at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    /// Maps elements through a conversion table and drops removed prefixes.
    ///
    /// Unmapped numeric items are kept verbatim and reported in the failure
    /// set. Elements starting with any prefix in `remove` are dropped after
    /// mapping.
    #[must_use]
    pub fn convert(
        &self,
        conversions: &BTreeMap<String, String>,
        remove: &[String],
    ) -> (Self, BTreeSet<String>) {
        let mut failures = BTreeSet::new();
        let sequences = self
            .sequences
            .iter()
            .map(|seq| {
                let groups = seq
                    .groups
                    .iter()
                    .map(|group| {
                        group
                            .iter()
                            .filter_map(|item| {
                                let name = match conversions.get(item) {
                                    Some(name) => name.clone(),
                                    None => {
                                        if item.parse::<i64>().is_ok() {
                                            failures.insert(item.clone());
                                        }
                                        item.clone()
                                    }
                                };
                                if remove.iter().any(|prefix| name.starts_with(prefix)) {
                                    None
                                } else {
                                    Some(name)
                                }
                            })
                            .collect()
                    })
                    .collect();
                Sequence::new(groups)
            })
            .collect();
        (Self::new(sequences), failures)
    }
}

/// Selects raw sequence lines from corpus text by index.
///
/// Lines are the chunks between `line_sep` tokens, reproduced verbatim
/// (leading whitespace trimmed) so the caller can reprint them.
///
/// # Errors
/// Returns an error when an index is out of range.
pub fn select_lines(
    text: &str,
    format: &SequenceFormat,
    indices: &[usize],
) -> Result<Vec<String>> {
    let mut lines: Vec<&str> = text.split(&format.line_sep).collect();
    // The split leaves a final empty chunk after the last terminator.
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    indices
        .iter()
        .map(|&i| {
            lines
                .get(i)
                .map(|l| l.trim().to_string())
                .ok_or_else(|| Error::input("line index out of range", i))
        })
        .collect()
}
