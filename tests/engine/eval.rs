//! Integration tests for the evaluator over parsed patterns.

use refrain_engine::{Corpus, ElementIndex, EvalContext, SequenceFormat, eval, matches};
use refrain_language::parse;

/// Builds the element index of the first sequence in `text`.
fn index(text: &str) -> ElementIndex {
    let corpus = Corpus::from_text(text, &SequenceFormat::default()).unwrap();
    ElementIndex::build(corpus.get(0).unwrap())
}

fn check(pattern: &str, idx: &ElementIndex) -> bool {
    matches(&parse(pattern).unwrap(), idx)
}

// =============================================================================
// Window semantics
// =============================================================================

#[test]
fn match_sets_stay_inside_the_window() {
    let idx = index("a -1 b -1 a -1 -2");
    let pattern = parse("a | ~z").unwrap();
    let ctx = EvalContext::window(&idx, 1, 3);
    for position in eval(&pattern, &ctx) {
        assert!((1..3).contains(&position));
    }
}

#[test]
fn first_and_last_rebind_to_the_window() {
    let idx = index("a -1 b -1 c -1 -2");
    let ctx = EvalContext::window(&idx, 1, 3);
    assert!(!eval(&parse("^b").unwrap(), &ctx).is_empty());
    assert!(!eval(&parse("$c").unwrap(), &ctx).is_empty());
    assert!(eval(&parse("^a").unwrap(), &ctx).is_empty());
}

// =============================================================================
// Operator semantics over whole sequences
// =============================================================================

#[test]
fn conjunction_of_existence() {
    let idx = index("a -1 b -1 -2");
    assert!(check("a b", &idx));
    assert!(!check("a z", &idx));
}

#[test]
fn ordering_operators() {
    let same_group = index("a b -1 -2");
    let ordered = index("a -1 b -1 -2");
    assert!(!check("a -> b", &same_group));
    assert!(check("a => b", &same_group));
    assert!(check("a -> b", &ordered));
    assert!(check("a => b", &ordered));
    assert!(!check("b -> a", &ordered));
}

#[test]
fn negation_of_ordering() {
    let idx = index("b -1 a -1 -2");
    assert!(check("~(a -> b)", &idx));
    assert!(!check("~(b -> a)", &idx));
}

#[test]
fn slice_restricts_inner_rules_to_the_run() {
    // a's run is groups 1-2; b occurs at 0 and 3 only.
    let idx = index("b -1 a -1 a -1 b -1 -2");
    assert!(check("a b", &idx));
    assert!(!check("[a b]", &idx));
}

#[test]
fn slice_insertion_and_removal_events() {
    // Fever enters at 1 and leaves at 3 inside Sepsis' run 0-3.
    let idx = index("Sepsis -1 Sepsis Fever -1 Sepsis Fever -1 Sepsis -1 -2");
    assert!(check("[Sepsis InFever]", &idx));
    assert!(check("[Sepsis OutFever]", &idx));
    assert!(check("[Sepsis InFever -> OutFever]", &idx));
    assert!(!check("[Sepsis OutFever -> InFever]", &idx));
}

#[test]
fn open_boundaries_exclude_run_edges() {
    // b sits at both edges of a's run but nowhere inside.
    let idx = index("a b -1 a -1 a b -1 -2");
    assert!(check("[a b]", &idx));
    assert!(check("{a b]", &idx)); // b at the right edge still counts
    assert!(check("[a b}", &idx)); // b at the left edge still counts
    assert!(!check("{a b}", &idx)); // both edges excluded: no b left
}

#[test]
fn slice_windows_compose_with_ordering() {
    let idx = index("a -1 a -1 c -1 -2");
    assert!(check("[a] -> c", &idx));
    assert!(!check("c -> [a]", &idx));
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn empty_sequence_matches_nothing() {
    let idx = index("-2");
    assert!(idx.is_empty());
    for pattern in ["a", "~a", "[a]", "a -> b", "^a", "~(a b)"] {
        assert!(!check(pattern, &idx), "{pattern}");
    }
}

#[test]
fn single_group_sequence() {
    let idx = index("a b -1 -2");
    assert!(check("^a", &idx));
    assert!(check("$a", &idx));
    assert!(check("a & b", &idx));
    assert!(!check("a -> a", &idx));
    assert!(check("a => b", &idx));
}
