use std::collections::HashSet;

use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::graph::{DependencyGraph, DisableReason};

/// Disable every enabled edge that closes a cycle.
///
/// Depth-first from the root in declaration order; an edge pointing at a
/// node still on the current path is the one flagged. Nodes that cannot be
/// reached from the root are left alone.
pub fn flag_cyclic_edges(graph: &mut DependencyGraph) -> usize {
    let back_edges = back_edges(graph);

    let mut flagged = 0;
    for edge in back_edges {
        if graph.disable_edge(edge, DisableReason::Cyclic) {
            flagged += 1;
        }
    }
    if flagged > 0 {
        tracing::debug!(flagged, "disabled cyclic edges");
    }
    flagged
}

/// Iterative DFS; each frame holds a node's outgoing edges and how many
/// have been followed.
fn back_edges(graph: &DependencyGraph) -> Vec<EdgeIndex> {
    let root = graph.root();
    let mut on_path: HashSet<NodeIndex> = HashSet::from([root]);
    let mut done: HashSet<NodeIndex> = HashSet::new();
    let mut stack: Vec<(NodeIndex, Vec<(EdgeIndex, NodeIndex)>, usize)> =
        vec![(root, graph.enabled_outgoing(root), 0)];
    let mut found = Vec::new();

    while let Some((node, edges, next)) = stack.last_mut() {
        let Some(&(edge, target)) = edges.get(*next) else {
            let node = *node;
            on_path.remove(&node);
            done.insert(node);
            stack.pop();
            continue;
        };
        *next += 1;

        if on_path.contains(&target) {
            found.push(edge);
        } else if !done.contains(&target) {
            on_path.insert(target);
            stack.push((target, graph.enabled_outgoing(target), 0));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coord, link};
    use depot_core::scope::Scope;

    #[test]
    fn breaks_simple_cycle_at_back_edge() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        let ab = link(&mut g, "org.a:a:1.0", "org.b:b:1.0", Scope::Compile);
        let ba = link(&mut g, "org.b:b:1.0", "org.a:a:1.0", Scope::Compile);

        assert_eq!(flag_cyclic_edges(&mut g), 1);
        assert!(g.edge(ab).is_enabled());
        assert_eq!(g.edge(ba).disabled_reason(), Some(DisableReason::Cyclic));
    }

    #[test]
    fn self_loop_is_cyclic() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        let aa = link(&mut g, "org.a:a:1.0", "org.a:a:1.0", Scope::Compile);
        assert_eq!(flag_cyclic_edges(&mut g), 1);
        assert_eq!(g.edge(aa).disabled_reason(), Some(DisableReason::Cyclic));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        link(&mut g, "com.example:app:1.0", "org.b:b:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "org.c:c:1.0", Scope::Compile);
        link(&mut g, "org.b:b:1.0", "org.c:c:1.0", Scope::Compile);
        assert_eq!(flag_cyclic_edges(&mut g), 0);
    }

    #[test]
    fn deep_chain_does_not_exhaust_the_stack() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        let mut prev = "com.example:app:1.0".to_string();
        for i in 0..20_000 {
            let next = format!("org.deep:d{i}:1.0");
            link(&mut g, &prev, &next, Scope::Compile);
            prev = next;
        }
        let back = link(&mut g, &prev, "org.deep:d0:1.0", Scope::Compile);

        assert_eq!(flag_cyclic_edges(&mut g), 1);
        assert_eq!(g.edge(back).disabled_reason(), Some(DisableReason::Cyclic));
    }

    #[test]
    fn second_run_finds_nothing() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        link(&mut g, "org.a:a:1.0", "com.example:app:1.0", Scope::Compile);
        assert_eq!(flag_cyclic_edges(&mut g), 1);
        assert_eq!(flag_cyclic_edges(&mut g), 0);
    }
}
