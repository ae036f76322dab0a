//! Variable substitution over pattern trees.
//!
//! A variable is an ordinary identifier in the surface syntax; binding it
//! rewrites every `Elem`, `InElem`, and `OutElem` node whose name matches.
//! Substitution is a pure tree map producing a fresh tree.

use std::collections::BTreeMap;

use crate::ast::Pattern;

/// Substitutes a single variable with an element, returning a fresh tree.
#[must_use]
pub fn substitute(pattern: &Pattern, variable: &str, element: &str) -> Pattern {
    let mut replaces = BTreeMap::new();
    replaces.insert(variable.to_string(), element.to_string());
    substitute_all(pattern, &replaces)
}

/// Substitutes every variable in `replaces`, returning a fresh tree.
#[must_use]
pub fn substitute_all(pattern: &Pattern, replaces: &BTreeMap<String, String>) -> Pattern {
    let rename = |name: &String| replaces.get(name).unwrap_or(name).clone();
    match pattern {
        Pattern::Elem(name) => Pattern::Elem(rename(name)),
        Pattern::InElem(name) => Pattern::InElem(rename(name)),
        Pattern::OutElem(name) => Pattern::OutElem(rename(name)),
        Pattern::First(inner) => Pattern::first(substitute_all(inner, replaces)),
        Pattern::Last(inner) => Pattern::last(substitute_all(inner, replaces)),
        Pattern::Not(inner) => Pattern::negate(substitute_all(inner, replaces)),
        Pattern::And(rules) => {
            Pattern::And(rules.iter().map(|r| substitute_all(r, replaces)).collect())
        }
        Pattern::Or(rules) => {
            Pattern::Or(rules.iter().map(|r| substitute_all(r, replaces)).collect())
        }
        Pattern::Intersect(rules) => {
            Pattern::Intersect(rules.iter().map(|r| substitute_all(r, replaces)).collect())
        }
        Pattern::Seq(left, right) => Pattern::seq(
            substitute_all(left, replaces),
            substitute_all(right, replaces),
        ),
        Pattern::LooseSeq(left, right) => Pattern::loose_seq(
            substitute_all(left, replaces),
            substitute_all(right, replaces),
        ),
        Pattern::Slice {
            body,
            open_left,
            open_right,
        } => Pattern::slice(substitute_all(body, replaces), *open_left, *open_right),
    }
}
