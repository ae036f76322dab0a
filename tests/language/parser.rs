//! Integration tests for the parser
//!
//! Tests the precedence ladder, slices, and error reporting of the
//! pattern DSL.

use refrain_language::{Pattern, parse, substitute};

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn or_is_loosest() {
    assert_eq!(
        parse("A B | C").unwrap(),
        Pattern::Or(vec![
            Pattern::And(vec![Pattern::elem("A"), Pattern::elem("B")]),
            Pattern::elem("C"),
        ])
    );
}

#[test]
fn seq_binds_tighter_than_and() {
    assert_eq!(
        parse("A B -> C D").unwrap(),
        Pattern::And(vec![
            Pattern::elem("A"),
            Pattern::seq(Pattern::elem("B"), Pattern::elem("C")),
            Pattern::elem("D"),
        ])
    );
}

#[test]
fn intersect_binds_tighter_than_seq() {
    assert_eq!(
        parse("A & B -> C & D").unwrap(),
        Pattern::seq(
            Pattern::Intersect(vec![Pattern::elem("A"), Pattern::elem("B")]),
            Pattern::Intersect(vec![Pattern::elem("C"), Pattern::elem("D")]),
        )
    );
}

#[test]
fn parens_override_precedence() {
    assert_eq!(
        parse("(A | B) -> C").unwrap(),
        Pattern::seq(
            Pattern::Or(vec![Pattern::elem("A"), Pattern::elem("B")]),
            Pattern::elem("C"),
        )
    );
}

#[test]
fn unary_wraps_the_following_atom() {
    assert_eq!(
        parse("~A -> ^B").unwrap(),
        Pattern::seq(
            Pattern::negate(Pattern::elem("A")),
            Pattern::first(Pattern::elem("B")),
        )
    );
}

#[test]
fn unary_stacks_in_any_order() {
    assert_eq!(
        parse("^~$A").unwrap(),
        Pattern::first(Pattern::negate(Pattern::last(Pattern::elem("A"))))
    );
}

// =============================================================================
// Slices
// =============================================================================

#[test]
fn slice_boundary_shapes() {
    for (source, open_left, open_right) in [
        ("[A]", false, false),
        ("{A]", true, false),
        ("[A}", false, true),
        ("{A}", true, true),
    ] {
        assert_eq!(
            parse(source).unwrap(),
            Pattern::slice(Pattern::elem("A"), open_left, open_right),
            "{source}"
        );
    }
}

#[test]
fn slice_contains_full_expression() {
    assert_eq!(
        parse("[A InB -> OutB]").unwrap(),
        Pattern::slice(
            Pattern::And(vec![
                Pattern::elem("A"),
                Pattern::seq(Pattern::insertion("B"), Pattern::removal("B")),
            ]),
            false,
            false,
        )
    );
}

#[test]
fn slices_nest() {
    assert_eq!(
        parse("[A {B C}]").unwrap(),
        Pattern::slice(
            Pattern::And(vec![
                Pattern::elem("A"),
                Pattern::slice(
                    Pattern::And(vec![Pattern::elem("B"), Pattern::elem("C")]),
                    true,
                    true,
                ),
            ]),
            false,
            false,
        )
    );
}

// =============================================================================
// In/Out splitting
// =============================================================================

#[test]
fn in_out_prefix_splitting() {
    assert_eq!(parse("InFever").unwrap(), Pattern::insertion("Fever"));
    assert_eq!(parse("Out_x").unwrap(), Pattern::removal("_x"));
    assert_eq!(parse("Inside").unwrap(), Pattern::insertion("side"));
    assert_eq!(parse("In").unwrap(), Pattern::elem("In"));
    assert_eq!(parse("Outlier").unwrap(), Pattern::removal("lier"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn structural_errors() {
    for source in [
        "", "  ", "()", "[]", "{ }", "(A", "A)", "[A", "A]", "{A", "A | | B", "-> A", "A ->",
        "& A", "~", "A ~",
    ] {
        assert!(parse(source).is_err(), "{source:?} should fail");
    }
}

#[test]
fn error_reports_position() {
    let err = parse("(A").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("position 2"), "{message}");
}

// =============================================================================
// Substitution round trip
// =============================================================================

#[test]
fn substitution_matches_hand_written_pattern() {
    let pattern = parse("[x Outy] -> y").unwrap();
    let bound = substitute(&substitute(&pattern, "x", "A"), "y", "B");
    assert_eq!(bound, parse("[A OutB] -> B").unwrap());
}
