//! Integration tests for the element index.

use refrain_engine::{Corpus, ElementIndex, SequenceFormat};

fn index(text: &str) -> ElementIndex {
    let corpus = Corpus::from_text(text, &SequenceFormat::default()).unwrap();
    ElementIndex::build(corpus.get(0).unwrap())
}

#[test]
fn first_group_inserts_everything_it_contains() {
    let idx = index("a b -1 a -1 -2");
    assert_eq!(idx.in_groups("a"), &[0]);
    assert_eq!(idx.in_groups("b"), &[0]);
}

#[test]
fn removal_is_the_first_group_after_a_run() {
    let idx = index("a -1 a -1 -1 a -1 -2");
    assert_eq!(idx.groups_of("a"), &[0, 1, 3]);
    assert_eq!(idx.out_groups("a"), &[2]);
    assert_eq!(idx.in_groups("a"), &[0, 3]);
}

#[test]
fn no_removal_at_end_of_sequence() {
    let idx = index("a -1 a -1 -2");
    assert_eq!(idx.out_groups("a"), &[] as &[usize]);
}

#[test]
fn removal_after_final_disappearance() {
    let idx = index("a -1 b -1 -2");
    assert_eq!(idx.out_groups("a"), &[1]);
}

#[test]
fn groups_of_nonempty_iff_element_occurs() {
    let idx = index("a -1 -2");
    assert!(!idx.groups_of("a").is_empty());
    assert!(idx.groups_of("z").is_empty());
}
