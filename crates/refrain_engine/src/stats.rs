//! Association-rule statistics over pattern match sets.
//!
//! Supports are exact fractions over the corpus size; confidence and lift
//! for a directional rule are derived fractions that stay `None` when
//! their denominator is zero (reported as absent, never as an error).

use std::collections::BTreeSet;

use refrain_foundation::Fraction;
use serde::Serialize;

/// Returns the support of a match set over a corpus of `corpus_len`
/// sequences.
#[must_use]
pub fn support(matches: &BTreeSet<usize>, corpus_len: usize) -> Fraction {
    Fraction::new(matches.len(), corpus_len)
}

/// A directional association rule between two patterns.
#[derive(Clone, Debug, Serialize)]
pub struct AssociationRule {
    /// Display text of the antecedent pattern.
    pub lhs: String,
    /// Display text of the consequent pattern.
    pub rhs: String,
    /// Support of the antecedent.
    pub lhs_support: Fraction,
    /// Support of the consequent.
    pub rhs_support: Fraction,
    /// `joint / Supp(lhs)`; `None` when the antecedent never matches.
    pub confidence: Option<Fraction>,
    /// `confidence / Supp(rhs)`; `None` when either divisor is zero.
    pub lift: Option<Fraction>,
}

impl AssociationRule {
    /// Builds the rule `lhs ==> rhs` from the two match sets.
    #[must_use]
    pub fn build(
        lhs: (&str, &BTreeSet<usize>),
        rhs: (&str, &BTreeSet<usize>),
        corpus_len: usize,
    ) -> Self {
        let joint: BTreeSet<usize> = lhs.1.intersection(rhs.1).copied().collect();
        let joint_support = support(&joint, corpus_len);
        let lhs_support = support(lhs.1, corpus_len);
        let rhs_support = support(rhs.1, corpus_len);
        let confidence = joint_support.div(lhs_support);
        let lift = confidence.and_then(|c| c.div(rhs_support));
        Self {
            lhs: lhs.0.to_string(),
            rhs: rhs.0.to_string(),
            lhs_support,
            rhs_support,
            confidence,
            lift,
        }
    }
}

/// Joint statistics over all patterns of one invocation.
#[derive(Clone, Debug, Serialize)]
pub struct JointStats {
    /// Display text: the pattern texts joined with `, `.
    pub name: String,
    /// Sequences matching every pattern.
    pub matches: Vec<usize>,
    /// Joint support.
    pub support: Fraction,
    /// Both directional rules for each ordered pattern pair.
    pub rules: Vec<AssociationRule>,
}

impl JointStats {
    /// Builds joint statistics from named match sets, one per pattern.
    ///
    /// `sets` must hold at least two entries; rules cover every ordered
    /// pair.
    #[must_use]
    pub fn build(sets: &[(String, BTreeSet<usize>)], corpus_len: usize) -> Self {
        let mut joint: BTreeSet<usize> = sets[0].1.clone();
        for (_, set) in &sets[1..] {
            joint = joint.intersection(set).copied().collect();
        }
        let name = sets
            .iter()
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>()
            .join(", ");

        let mut rules = Vec::new();
        for (i, (lhs_name, lhs_set)) in sets.iter().enumerate() {
            for (j, (rhs_name, rhs_set)) in sets.iter().enumerate() {
                if i == j {
                    continue;
                }
                rules.push(AssociationRule::build(
                    (lhs_name, lhs_set),
                    (rhs_name, rhs_set),
                    corpus_len,
                ));
            }
        }

        Self {
            name,
            support: support(&joint, corpus_len),
            matches: joint.into_iter().collect(),
            rules,
        }
    }
}
