//! Property tests for the distance calculator.
//!
//! The key guarantee is that shortest ancestor-path distance depends only on
//! the shape of the graph, never on the order in which parent edges were
//! declared, and that reachability is antisymmetric (the graph is a DAG).

use proptest::prelude::*;

use genfun::{Distance, Registry};

/// A random DAG layered by registration order: node `i` may only name
/// parents among nodes `0..i`, so cycles are impossible by construction.
fn dag_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), 1..12)
        .prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, picks)| {
                    let mut parents: Vec<usize> =
                        picks.into_iter().filter(|_| i > 0).map(|p| p.index(i)).collect();
                    parents.sort_unstable();
                    parents.dedup();
                    parents
                })
                .collect()
        })
}

fn name(i: usize) -> String {
    format!("C{i}")
}

fn build(parent_sets: &[Vec<usize>], reverse_edges: bool) -> Registry<()> {
    let mut reg = Registry::new();
    for (i, parents) in parent_sets.iter().enumerate() {
        let mut names: Vec<String> = parents.iter().map(|&p| name(p)).collect();
        if reverse_edges {
            names.reverse();
        }
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        reg.register_class(&name(i), &refs).unwrap();
    }
    reg
}

proptest! {
    #[test]
    fn distance_ignores_parent_declaration_order(parent_sets in dag_strategy()) {
        let forward = build(&parent_sets, false);
        let reversed = build(&parent_sets, true);
        for a in 0..parent_sets.len() {
            for b in 0..parent_sets.len() {
                prop_assert_eq!(
                    forward.distance(&name(a), &name(b)).unwrap(),
                    reversed.distance(&name(a), &name(b)).unwrap(),
                    "distance({}, {}) changed with edge order", a, b
                );
            }
        }
    }

    #[test]
    fn reachability_is_antisymmetric(parent_sets in dag_strategy()) {
        let reg = build(&parent_sets, false);
        for a in 0..parent_sets.len() {
            prop_assert_eq!(reg.distance(&name(a), &name(a)).unwrap(), Distance::Reachable(0));
            for b in 0..parent_sets.len() {
                if a == b {
                    continue;
                }
                let down = reg.distance(&name(a), &name(b)).unwrap();
                let up = reg.distance(&name(b), &name(a)).unwrap();
                prop_assert!(
                    !(down.is_reachable() && up.is_reachable()),
                    "{} and {} are mutually reachable in a DAG", a, b
                );
            }
        }
    }
}
