// src/graph/planner.rs

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::graph::graph::DepGraph;
use crate::graph::resolve::is_partial;

/// Compute the minimal set of root templates to recompile after a change to
/// `changed`.
///
/// - A changed root template plans exactly itself, whether or not the graph
///   knows about it.
/// - A changed partial triggers a breadth-first walk over the reverse
///   dependency relation: every root reached (through any chain of partials)
///   is planned; partials along the way are traversed but never planned.
/// - A partial nothing depends on plans the empty set.
///
/// The visited set makes the walk terminate on authored cycles; nodes are
/// visited at most once.
pub fn plan_recompile(graph: &DepGraph, changed: &Path) -> BTreeSet<PathBuf> {
    if !is_partial(changed) {
        return BTreeSet::from([changed.to_path_buf()]);
    }

    let mut planned = BTreeSet::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::from([changed.to_path_buf()]);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        for dependent in graph.reverse_dependents(&current) {
            if !is_partial(&dependent) {
                planned.insert(dependent.clone());
            }
            // Roots can be included by other templates too, so traversal
            // continues regardless of kind.
            queue.push_back(dependent);
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    fn edges(items: &[&str]) -> BTreeSet<PathBuf> {
        items.iter().map(|s| p(s)).collect()
    }

    #[test]
    fn changed_root_plans_exactly_itself() {
        let mut graph = DepGraph::new();
        graph.set_edges(p("/site/index.njk"), edges(&["/site/_header.njk"]));

        let plan = plan_recompile(&graph, Path::new("/site/index.njk"));
        assert_eq!(plan, edges(&["/site/index.njk"]));
    }

    #[test]
    fn unknown_root_still_plans_itself() {
        let graph = DepGraph::new();
        let plan = plan_recompile(&graph, Path::new("/site/new-page.njk"));
        assert_eq!(plan, edges(&["/site/new-page.njk"]));
    }

    #[test]
    fn unknown_partial_plans_nothing() {
        let graph = DepGraph::new();
        let plan = plan_recompile(&graph, Path::new("/site/_orphan.njk"));
        assert!(plan.is_empty());
    }

    #[test]
    fn partial_with_no_dependents_plans_nothing() {
        let mut graph = DepGraph::new();
        graph.set_edges(p("/site/_lonely.njk"), edges(&[]));

        let plan = plan_recompile(&graph, Path::new("/site/_lonely.njk"));
        assert!(plan.is_empty());
    }

    #[test]
    fn shared_partial_plans_every_including_root() {
        let mut graph = DepGraph::new();
        graph.set_edges(p("/site/index.njk"), edges(&["/site/_header.njk"]));
        graph.set_edges(p("/site/about.njk"), edges(&["/site/_header.njk"]));

        let plan = plan_recompile(&graph, Path::new("/site/_header.njk"));
        assert_eq!(plan, edges(&["/site/index.njk", "/site/about.njk"]));
    }

    #[test]
    fn chains_of_partials_propagate_to_ancestor_roots() {
        // R includes P1 includes P2; a change to P2 must plan {R}.
        let mut graph = DepGraph::new();
        graph.set_edges(p("/site/r.njk"), edges(&["/site/_p1.njk"]));
        graph.set_edges(p("/site/_p1.njk"), edges(&["/site/_p2.njk"]));
        graph.set_edges(p("/site/_p2.njk"), edges(&[]));

        let plan = plan_recompile(&graph, Path::new("/site/_p2.njk"));
        assert_eq!(plan, edges(&["/site/r.njk"]));
    }

    #[test]
    fn authored_cycle_terminates_with_correct_roots() {
        // _a and _b include each other; r includes _a.
        let mut graph = DepGraph::new();
        graph.set_edges(p("/site/_a.njk"), edges(&["/site/_b.njk"]));
        graph.set_edges(p("/site/_b.njk"), edges(&["/site/_a.njk"]));
        graph.set_edges(p("/site/r.njk"), edges(&["/site/_a.njk"]));

        let from_a = plan_recompile(&graph, Path::new("/site/_a.njk"));
        assert_eq!(from_a, edges(&["/site/r.njk"]));

        let from_b = plan_recompile(&graph, Path::new("/site/_b.njk"));
        assert_eq!(from_b, edges(&["/site/r.njk"]));
    }

    #[test]
    fn traversal_continues_through_roots() {
        // base.njk is a root that is itself included by another root.
        let mut graph = DepGraph::new();
        graph.set_edges(p("/site/outer.njk"), edges(&["/site/inner.njk"]));
        graph.set_edges(p("/site/inner.njk"), edges(&["/site/_shared.njk"]));

        let plan = plan_recompile(&graph, Path::new("/site/_shared.njk"));
        assert_eq!(plan, edges(&["/site/inner.njk", "/site/outer.njk"]));
    }
}
