//! Law tests: algebraic properties of the index, the evaluator, and the
//! statistics, checked across every sequence of up to three groups over
//! the alphabet {A, B}.

use refrain::engine::{
    Corpus, ElementIndex, EvalContext, Miner, Sequence, SequenceFormat, eval, matches,
};
use refrain::foundation::Fraction;
use refrain::language::{Pattern, parse, substitute};

/// Every sequence of length 0..=3 whose groups are subsets of {A, B}.
fn all_small_sequences() -> Vec<Sequence> {
    let groups: Vec<Vec<String>> = vec![
        vec![],
        vec!["A".to_string()],
        vec!["B".to_string()],
        vec!["A".to_string(), "B".to_string()],
    ];
    let mut sequences = vec![Sequence::new(vec![])];
    let mut previous = vec![Vec::<Vec<String>>::new()];
    for _ in 0..3 {
        let mut next = Vec::new();
        for prefix in &previous {
            for group in &groups {
                let mut extended = prefix.clone();
                extended.push(group.clone());
                sequences.push(Sequence::new(extended.clone()));
                next.push(extended);
            }
        }
        previous = next;
    }
    sequences
}

fn probe_patterns() -> Vec<Pattern> {
    ["A", "B", "InA", "OutB", "^A", "$B", "~A", "A & B", "[A]"]
        .iter()
        .map(|p| parse(p).unwrap())
        .collect()
}

#[test]
fn law_in_groups_subset_and_first() {
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        for element in ["A", "B"] {
            let groups = index.groups_of(element);
            for pos in index.in_groups(element) {
                assert!(groups.contains(pos));
            }
            assert_eq!(groups.first(), index.in_groups(element).first());
        }
    }
}

#[test]
fn law_gap_produces_removal() {
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        for element in ["A", "B"] {
            let groups = index.groups_of(element);
            for window in groups.windows(2) {
                if window[1] > window[0] + 1 {
                    assert!(
                        index.out_groups(element).contains(&(window[0] + 1)),
                        "gap after {} in {sequence:?}",
                        window[0]
                    );
                }
            }
        }
    }
}

#[test]
fn law_double_negation_preserves_nonemptiness() {
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        for pattern in probe_patterns() {
            let double = Pattern::negate(Pattern::negate(pattern.clone()));
            if index.is_empty() {
                // No position can witness anything in an empty sequence.
                assert!(!matches(&double, &index));
            } else {
                assert_eq!(matches(&pattern, &index), matches(&double, &index));
            }
        }
    }
}

#[test]
fn law_and_or_commutative_associative() {
    let patterns = probe_patterns();
    let makes: [fn(Vec<Pattern>) -> Pattern; 2] = [Pattern::And, Pattern::Or];
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        for p in &patterns {
            for q in &patterns {
                for make in makes {
                    let pq = make(vec![p.clone(), q.clone()]);
                    let qp = make(vec![q.clone(), p.clone()]);
                    assert_eq!(matches(&pq, &index), matches(&qp, &index));
                }
                for r in patterns.iter().take(3) {
                    for make in makes {
                        let left = make(vec![
                            make(vec![p.clone(), q.clone()]),
                            r.clone(),
                        ]);
                        let right = make(vec![
                            p.clone(),
                            make(vec![q.clone(), r.clone()]),
                        ]);
                        assert_eq!(matches(&left, &index), matches(&right, &index));
                    }
                }
            }
        }
    }
}

#[test]
fn law_intersect_commutative_associative_idempotent() {
    let patterns = probe_patterns();
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        let ctx = EvalContext::full(&index);
        for p in &patterns {
            let pp = Pattern::Intersect(vec![p.clone(), p.clone()]);
            assert_eq!(eval(&pp, &ctx), eval(p, &ctx));
            for q in &patterns {
                let pq = Pattern::Intersect(vec![p.clone(), q.clone()]);
                let qp = Pattern::Intersect(vec![q.clone(), p.clone()]);
                assert_eq!(eval(&pq, &ctx), eval(&qp, &ctx));
                for r in patterns.iter().take(3) {
                    let left = Pattern::Intersect(vec![pq.clone(), r.clone()]);
                    let right = Pattern::Intersect(vec![
                        p.clone(),
                        Pattern::Intersect(vec![q.clone(), r.clone()]),
                    ]);
                    assert_eq!(eval(&left, &ctx), eval(&right, &ctx));
                }
            }
        }
    }
}

#[test]
fn law_strict_sequence_implies_loose() {
    let patterns = probe_patterns();
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        for p in &patterns {
            for q in &patterns {
                let strict = Pattern::seq(p.clone(), q.clone());
                let loose = Pattern::loose_seq(p.clone(), q.clone());
                if matches(&strict, &index) {
                    assert!(matches(&loose, &index), "{strict} in {sequence:?}");
                }
            }
        }
    }
}

#[test]
fn law_substitution_commutes_with_evaluation() {
    let templates = ["x", "Inx", "[x Outx]", "x -> B", "~x", "x & B"];
    for sequence in all_small_sequences() {
        let index = ElementIndex::build(&sequence);
        let ctx = EvalContext::full(&index);
        for template in templates {
            let tree = parse(template).unwrap();
            let bound = substitute(&tree, "x", "A");
            let literal = parse(&template.replace('x', "A")).unwrap();
            assert_eq!(eval(&bound, &ctx), eval(&literal, &ctx), "{template}");
        }
    }
}

#[test]
fn law_support_bounds_and_lift_identity() {
    let corpus = Corpus::from_text(
        "A -1 -2 B -1 -2 A B -1 -2 A -1 B C -1 -2 B -1 A B -1 A -1 C -1 -2",
        &SequenceFormat::default(),
    )
    .unwrap();
    let miner = Miner::new(&corpus);

    let pairs = [("A", "B"), ("[A]", "[A B]"), ("A -> B", "B"), ("Z", "A")];
    for (left, right) in pairs {
        let report = miner
            .run_texts(&[left.to_string(), right.to_string()], &[])
            .unwrap();
        let entries = &report.aggregate.entries;
        let joint = report.aggregate.joint.as_ref().unwrap();

        for entry in entries {
            assert!(entry.support >= Fraction::zero());
            assert!(entry.support <= Fraction::new(1, 1));
        }
        assert!(joint.support <= entries[0].support);
        assert!(joint.support <= entries[1].support);

        // Lift = Supp(joint) / (Supp(lhs) * Supp(rhs)) when defined.
        let rule = &joint.rules[0];
        if let Some(lift) = rule.lift {
            let expected = joint.support.value()
                / (rule.lhs_support.value() * rule.rhs_support.value());
            assert!((lift.value() - expected).abs() < 1e-12);
        }
    }
}
