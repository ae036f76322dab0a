//! Scenario tests over the reference corpus.
//!
//! The corpus, indexed 0-4:
//!
//! ```text
//! 0: A
//! 1: B
//! 2: A B
//! 3: A ; B C          (two groups)
//! 4: B ; A B ; A ; C  (four groups)
//! ```

use refrain::engine::{Corpus, Miner, Report, SequenceFormat};
use refrain::foundation::Fraction;

fn corpus() -> Corpus {
    Corpus::from_text(
        "A -1 -2\n\
         B -1 -2\n\
         A B -1 -2\n\
         A -1 B C -1 -2\n\
         B -1 A B -1 A -1 C -1 -2",
        &SequenceFormat::default(),
    )
    .unwrap()
}

fn count(patterns: &[&str], variables: &[&str]) -> Report {
    let corpus = corpus();
    let miner = Miner::new(&corpus);
    miner
        .run_texts(
            &patterns.iter().map(ToString::to_string).collect::<Vec<_>>(),
            &variables
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        )
        .unwrap()
}

fn assert_support(report: &Report, matches: &[usize], support: Fraction) {
    let entry = &report.aggregate.entries[0];
    assert_eq!(entry.matches, matches);
    assert_eq!(entry.support, support);
}

#[test]
fn s1_conjunction() {
    assert_support(&count(&["A B"], &[]), &[2, 3, 4], Fraction::new(3, 5));
}

#[test]
fn s2_intersection() {
    assert_support(&count(&["A & B"], &[]), &[2, 4], Fraction::new(2, 5));
}

#[test]
fn s3_strict_sequence() {
    assert_support(&count(&["A -> B"], &[]), &[3], Fraction::new(1, 5));
}

#[test]
fn s4_slice_with_removal() {
    assert_support(&count(&["[A OutB]"], &[]), &[4], Fraction::new(1, 5));
}

#[test]
fn s5_slice_then_element() {
    assert_support(&count(&["[A] -> C"], &[]), &[3, 4], Fraction::new(2, 5));
}

#[test]
fn s6_missing_element() {
    assert_support(&count(&["Z"], &[]), &[], Fraction::zero());
}

#[test]
fn s7_variable_intersection() {
    let report = count(&["x & y"], &["x", "y"]);
    assert_support(&report, &[2, 3, 4], Fraction::new(3, 5));

    // No binding assigns the same element to both variables.
    for block in &report.bindings {
        assert_ne!(block.binding.pairs[0].1, block.binding.pairs[1].1);
    }

    let matches_for = |binding: &str| {
        report
            .bindings
            .iter()
            .find(|b| b.binding.to_string() == binding)
            .unwrap_or_else(|| panic!("missing binding {binding}"))
            .block
            .entries[0]
            .matches
            .clone()
    };
    assert_eq!(matches_for("x = B; y = A"), vec![2, 4]);
    assert_eq!(matches_for("x = B; y = C"), vec![3]);
    assert_eq!(matches_for("x = A; y = B"), vec![2, 4]);
}

#[test]
fn s8_association_rules() {
    let report = count(&["[A]", "[A B]"], &[]);

    let entries = &report.aggregate.entries;
    assert_eq!(entries[0].matches, vec![0, 2, 3, 4]);
    assert_eq!(entries[0].support, Fraction::new(4, 5));
    assert_eq!(entries[1].matches, vec![2, 4]);
    assert_eq!(entries[1].support, Fraction::new(2, 5));

    let joint = report.aggregate.joint.as_ref().unwrap();
    assert_eq!(joint.matches, vec![2, 4]);
    assert_eq!(joint.support, Fraction::new(2, 5));

    let forward = &joint.rules[0];
    assert_eq!(forward.lhs, "[A]");
    assert_eq!(forward.confidence.unwrap(), Fraction::new(1, 2));
    assert_eq!(forward.lift.unwrap(), Fraction::new(5, 4));

    let backward = &joint.rules[1];
    assert_eq!(backward.lhs, "[A B]");
    assert_eq!(backward.confidence.unwrap(), Fraction::new(1, 1));
    assert_eq!(backward.lift.unwrap(), Fraction::new(5, 4));
}

#[test]
fn report_renders_reference_text() {
    let corpus = corpus();
    let miner = Miner::new(&corpus);
    let report = miner.run_texts(&["A B".to_string()], &[]).unwrap();
    let text = refrain::runtime::render_text(
        &report,
        &corpus,
        &SequenceFormat::default(),
        &refrain::runtime::DisplayConfig {
            show_lines: true,
            ..Default::default()
        },
    );
    assert_eq!(text, "Supp((A B)) = 0.6 | 3 lines: 2, 3, 4\n");
}
