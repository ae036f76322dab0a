//! Per-sequence element indices.
//!
//! Built once per sequence before any pattern is evaluated against it and
//! immutable thereafter. For each element the index stores the sorted group
//! positions containing it, plus the derived insertion and removal events:
//! a group is an insertion when the element appears there but not in the
//! immediately preceding group (the first group is an insertion for
//! everything it contains); a removal is the first group *after* a run in
//! which the element is gone, so an element still present in the final
//! group has no removal event.

use std::collections::BTreeMap;

use crate::corpus::Sequence;

/// Occurrence, insertion, and removal positions for every element of one
/// sequence.
#[derive(Clone, Debug, Default)]
pub struct ElementIndex {
    /// Number of groups in the host sequence.
    len: usize,
    /// Sorted group positions per element.
    groups_of: BTreeMap<String, Vec<usize>>,
    /// Insertion positions per element.
    in_groups: BTreeMap<String, Vec<usize>>,
    /// Removal positions per element.
    out_groups: BTreeMap<String, Vec<usize>>,
}

impl ElementIndex {
    /// Builds the index for a sequence.
    #[must_use]
    pub fn build(sequence: &Sequence) -> Self {
        let len = sequence.len();
        let mut groups_of: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (i, group) in sequence.groups.iter().enumerate() {
            for element in group {
                let positions = groups_of.entry(element.clone()).or_default();
                // Duplicate mentions within a group collapse to one.
                if positions.last() != Some(&i) {
                    positions.push(i);
                }
            }
        }

        let mut in_groups = BTreeMap::new();
        let mut out_groups = BTreeMap::new();
        for (element, positions) in &groups_of {
            let mut ins = Vec::new();
            let mut outs = Vec::new();
            for (k, &pos) in positions.iter().enumerate() {
                let starts_run = k == 0 || positions[k - 1] + 1 != pos;
                if starts_run {
                    ins.push(pos);
                }
                let ends_run =
                    k + 1 == positions.len() || positions[k + 1] != pos + 1;
                if ends_run && pos + 1 < len {
                    outs.push(pos + 1);
                }
            }
            in_groups.insert(element.clone(), ins);
            out_groups.insert(element.clone(), outs);
        }

        Self {
            len,
            groups_of,
            in_groups,
            out_groups,
        }
    }

    /// Returns the number of groups in the host sequence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the host sequence has no groups.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the sorted positions of groups containing `element`.
    #[must_use]
    pub fn groups_of(&self, element: &str) -> &[usize] {
        self.groups_of.get(element).map_or(&[], Vec::as_slice)
    }

    /// Returns the positions where `element` enters the sequence.
    #[must_use]
    pub fn in_groups(&self, element: &str) -> &[usize] {
        self.in_groups.get(element).map_or(&[], Vec::as_slice)
    }

    /// Returns the positions where `element` has just left the sequence.
    #[must_use]
    pub fn out_groups(&self, element: &str) -> &[usize] {
        self.out_groups.get(element).map_or(&[], Vec::as_slice)
    }

    /// Returns the first position containing `element`, if it occurs.
    #[must_use]
    pub fn first(&self, element: &str) -> Option<usize> {
        self.groups_of(element).first().copied()
    }

    /// Returns the last position containing `element`, if it occurs.
    #[must_use]
    pub fn last(&self, element: &str) -> Option<usize> {
        self.groups_of(element).last().copied()
    }

    /// Returns the elements occurring in the host sequence, in order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.groups_of.keys().map(String::as_str)
    }

    /// Renders the host sequence with its insertion and removal events
    /// appended to each group as `In<element>` / `Out<element>` markers.
    #[must_use]
    pub fn annotate(&self, sequence: &Sequence) -> Sequence {
        let mut annotated = sequence.clone();
        for (element, positions) in &self.in_groups {
            for &pos in positions {
                annotated.groups[pos].push(format!("In{element}"));
            }
        }
        for (element, positions) in &self.out_groups {
            for &pos in positions {
                annotated.groups[pos].push(format!("Out{element}"));
            }
        }
        annotated
    }
}
