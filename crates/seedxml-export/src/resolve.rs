//! Topological ordering of the collected dependency graphs.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

/// Result of ordering one dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Every top-level key of the input, each exactly once; a key's listed
    /// dependencies that are themselves keys appear before it.
    pub order: Vec<String>,
    /// A back-edge was seen; the order is best-effort.
    pub cyclic: bool,
}

/// Depth-first postorder sort of `key -> dependency set`.
///
/// Keys appearing only inside value sets are not emitted here; callers put
/// them ahead of the sorted portion with [`prepend_missing`], since in the
/// final output leaves must still be declared before anything referencing
/// them. Ties are broken by key insertion order and nothing else, so
/// re-running over the same graph yields an identical order. Cycles never
/// fail: every involved key is emitted exactly once.
pub fn resolve(edges: &IndexMap<String, IndexSet<String>>) -> Resolution {
    let mut order = Vec::with_capacity(edges.len());
    let mut visited = HashSet::with_capacity(edges.len());
    let mut in_progress = HashSet::new();
    let mut cyclic = false;
    for key in edges.keys() {
        visit(
            key,
            edges,
            &mut visited,
            &mut in_progress,
            &mut order,
            &mut cyclic,
        );
    }
    Resolution { order, cyclic }
}

fn visit<'graph>(
    node: &'graph str,
    edges: &'graph IndexMap<String, IndexSet<String>>,
    visited: &mut HashSet<&'graph str>,
    in_progress: &mut HashSet<&'graph str>,
    order: &mut Vec<String>,
    cyclic: &mut bool,
) {
    if in_progress.contains(node) {
        *cyclic = true;
        return;
    }
    if !visited.insert(node) {
        return;
    }
    if let Some(dependencies) = edges.get(node) {
        in_progress.insert(node);
        for dependency in dependencies {
            visit(dependency, edges, visited, in_progress, order, cyclic);
        }
        in_progress.remove(node);
        order.push(node.to_string());
    }
}

/// Prepend the entries of `all` that `sorted` left out, preserving their
/// order and dropping duplicates.
pub fn prepend_missing(all: &[String], sorted: Vec<String>) -> Vec<String> {
    let known: HashSet<&str> = sorted.iter().map(String::as_str).collect();
    let mut result = Vec::with_capacity(all.len().max(sorted.len()));
    let mut seen: HashSet<&str> = HashSet::new();
    for key in all {
        if !known.contains(key.as_str()) && seen.insert(key.as_str()) {
            result.push(key.clone());
        }
    }
    result.extend(sorted);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> IndexMap<String, IndexSet<String>> {
        edges
            .iter()
            .map(|(key, deps)| {
                (
                    (*key).to_string(),
                    deps.iter().map(|dep| (*dep).to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn dependencies_come_first() {
        let edges = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        let resolution = resolve(&edges);
        assert_eq!(resolution.order, vec!["c", "b", "a"]);
        assert!(!resolution.cyclic);
    }

    #[test]
    fn value_only_nodes_are_not_emitted() {
        let edges = graph(&[("a", &["b"])]);
        let resolution = resolve(&edges);
        assert_eq!(resolution.order, vec!["a"]);
    }

    #[test]
    fn ties_follow_insertion_order() {
        let edges = graph(&[("b", &[]), ("a", &[]), ("c", &[])]);
        assert_eq!(resolve(&edges).order, vec!["b", "a", "c"]);
    }

    #[test]
    fn resolution_is_deterministic() {
        let edges = graph(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[]), ("d", &["a"])]);
        assert_eq!(resolve(&edges), resolve(&edges));
    }

    #[test]
    fn cycles_terminate_with_single_emission() {
        let edges = graph(&[("a", &["b"]), ("b", &["a"])]);
        let resolution = resolve(&edges);
        assert!(resolution.cyclic);
        assert_eq!(resolution.order.len(), 2);
        let mut sorted = resolution.order.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b"]);
    }

    #[test]
    fn prepend_missing_keeps_order_and_dedupes() {
        let sorted = vec!["c".to_string(), "a".to_string()];
        let all = vec![
            "a".to_string(),
            "d".to_string(),
            "e".to_string(),
            "d".to_string(),
        ];
        assert_eq!(prepend_missing(&all, sorted), vec!["d", "e", "c", "a"]);
    }
}
