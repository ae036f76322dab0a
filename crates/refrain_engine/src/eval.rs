//! The pattern evaluator.
//!
//! Maps a [`Pattern`] and an evaluation context (element index plus active
//! window) to the set of group positions witnessing the pattern. A pattern
//! matches a sequence when its match set over the full window is non-empty.
//! Every match set is a subset of the active window; element nodes clamp
//! their raw index positions, `First`/`Last` test against the window
//! bounds, and `Not` promotes "child has no match" to the full window set.

use std::collections::BTreeSet;

use refrain_language::Pattern;

use crate::index::ElementIndex;

/// A set of group positions within the active window.
pub type MatchSet = BTreeSet<usize>;

/// Evaluation context: the host sequence's index and the active window.
///
/// The window is half-open (`lo..hi`) so that a zero-length sequence is
/// representable without underflow.
#[derive(Clone, Copy, Debug)]
pub struct EvalContext<'a> {
    /// The host sequence's element index.
    pub index: &'a ElementIndex,
    /// First position inside the window.
    pub lo: usize,
    /// One past the last position inside the window.
    pub hi: usize,
}

impl<'a> EvalContext<'a> {
    /// Creates a context spanning the whole sequence.
    #[must_use]
    pub const fn full(index: &'a ElementIndex) -> Self {
        Self {
            index,
            lo: 0,
            hi: index.len(),
        }
    }

    /// Creates a context for the window `lo..hi`.
    #[must_use]
    pub const fn window(index: &'a ElementIndex, lo: usize, hi: usize) -> Self {
        Self { index, lo, hi }
    }

    /// Returns true if the window holds no positions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }

    /// Returns every position of the window.
    #[must_use]
    pub fn full_set(&self) -> MatchSet {
        (self.lo..self.hi).collect()
    }

    /// Clamps sorted raw positions to the window.
    fn clamp(&self, positions: &[usize]) -> MatchSet {
        positions
            .iter()
            .copied()
            .filter(|&p| p >= self.lo && p < self.hi)
            .collect()
    }
}

/// Returns true if `pattern` matches the indexed sequence.
#[must_use]
pub fn matches(pattern: &Pattern, index: &ElementIndex) -> bool {
    !eval(pattern, &EvalContext::full(index)).is_empty()
}

/// Evaluates `pattern` in `ctx`, returning its match set.
#[must_use]
pub fn eval(pattern: &Pattern, ctx: &EvalContext<'_>) -> MatchSet {
    match pattern {
        Pattern::Elem(e) => ctx.clamp(ctx.index.groups_of(e)),
        Pattern::InElem(e) => ctx.clamp(ctx.index.in_groups(e)),
        Pattern::OutElem(e) => ctx.clamp(ctx.index.out_groups(e)),
        Pattern::First(inner) => {
            let mut set = eval(inner, ctx);
            set.retain(|&p| p == ctx.lo);
            set
        }
        Pattern::Last(inner) => {
            let mut set = eval(inner, ctx);
            set.retain(|&p| p + 1 == ctx.hi);
            set
        }
        Pattern::Not(inner) => {
            if eval(inner, ctx).is_empty() {
                ctx.full_set()
            } else {
                MatchSet::new()
            }
        }
        Pattern::And(rules) => {
            let sets: Vec<MatchSet> = rules.iter().map(|r| eval(r, ctx)).collect();
            if sets.iter().any(MatchSet::is_empty) {
                MatchSet::new()
            } else {
                sets.into_iter().flatten().collect()
            }
        }
        Pattern::Or(rules) => rules.iter().flat_map(|r| eval(r, ctx)).collect(),
        Pattern::Intersect(rules) => {
            let mut sets = rules.iter().map(|r| eval(r, ctx));
            let first = sets.next().unwrap_or_default();
            sets.fold(first, |acc, set| acc.intersection(&set).copied().collect())
        }
        Pattern::Seq(left, right) => {
            seq_witnesses(&eval(left, ctx), &eval(right, ctx), true)
        }
        Pattern::LooseSeq(left, right) => {
            seq_witnesses(&eval(left, ctx), &eval(right, ctx), false)
        }
        Pattern::Slice {
            body,
            open_left,
            open_right,
        } => eval_slice(body, *open_left, *open_right, ctx),
    }
}

/// Witness positions for ordered composition.
///
/// For strict order, a left position is kept when some right position lies
/// strictly after it and vice versa; loose order allows equality.
fn seq_witnesses(left: &MatchSet, right: &MatchSet, strict: bool) -> MatchSet {
    let (Some(&min_left), Some(&max_right)) = (left.first(), right.last()) else {
        return MatchSet::new();
    };
    let mut witnesses = MatchSet::new();
    for &i in left {
        if if strict { i < max_right } else { i <= max_right } {
            witnesses.insert(i);
        }
    }
    for &j in right {
        if if strict { min_left < j } else { min_left <= j } {
            witnesses.insert(j);
        }
    }
    witnesses
}

/// Evaluates a slice node: enumerates candidate windows and keeps those
/// whose body holds inside.
///
/// The slice head is the leftmost conjunct of the body; candidate windows
/// are the maximal contiguous runs of the head's match set in the
/// enclosing window (for `[X …]` these are exactly the runs of X). The
/// remaining conjuncts are then re-evaluated inside each run, shrunk by
/// one position per open boundary; `First`/`Last` rebind to the shrunken
/// bounds. The accepted window contributes its full `[a, b]` range.
fn eval_slice(
    body: &Pattern,
    open_left: bool,
    open_right: bool,
    ctx: &EvalContext<'_>,
) -> MatchSet {
    let (head, rest): (&Pattern, &[Pattern]) = match body {
        Pattern::And(rules) if !rules.is_empty() => (&rules[0], &rules[1..]),
        other => (other, &[]),
    };

    let head_set = eval(head, ctx);
    let mut result = MatchSet::new();

    for (a, b) in contiguous_runs(&head_set) {
        let lo = a + usize::from(open_left);
        let hi = (b + 1).saturating_sub(usize::from(open_right));
        let inner = EvalContext::window(ctx.index, lo, hi);
        let accepted = if rest.is_empty() {
            true
        } else if inner.is_empty() {
            false
        } else {
            rest.iter().all(|rule| !eval(rule, &inner).is_empty())
        };
        if accepted {
            result.extend(a..=b);
        }
    }
    result
}

/// Splits a sorted position set into maximal runs of consecutive positions,
/// returned as inclusive `(start, end)` pairs.
fn contiguous_runs(positions: &MatchSet) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for &pos in positions {
        match current {
            Some((start, end)) if pos == end + 1 => current = Some((start, pos)),
            Some(run) => {
                runs.push(run);
                current = Some((pos, pos));
            }
            None => current = Some((pos, pos)),
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}
