use std::collections::{BTreeSet, HashMap, VecDeque};

use depot_core::dependency::Exclusion;
use petgraph::stable_graph::NodeIndex;

use crate::graph::{DependencyGraph, DisableReason};

/// Disable every enabled edge whose target is excluded at its source.
///
/// Exclusions flow downward: the set in effect at a node is its own set
/// plus the sets of every parent that reaches it over a kept edge. The
/// final sets are written back onto the nodes.
pub fn flag_excluded_edges(graph: &mut DependencyGraph) -> usize {
    let root = graph.root();
    let mut in_effect: HashMap<NodeIndex, BTreeSet<Exclusion>> = HashMap::new();
    in_effect.insert(root, graph.root_node().exclusions.clone());
    let mut queue = VecDeque::from([root]);
    let mut flagged = 0;

    while let Some(node) = queue.pop_front() {
        let current = in_effect.get(&node).cloned().unwrap_or_default();
        for (edge, target) in graph.enabled_outgoing(node) {
            let key = graph.node(target).mediation_key();
            if current.iter().any(|e| e.matches(&key)) {
                if graph.disable_edge(edge, DisableReason::Excluded) {
                    tracing::debug!(from = %graph.node(node), excluded = %key, "excluded");
                    flagged += 1;
                }
                continue;
            }

            let mut grew = false;
            let set = in_effect.entry(target).or_insert_with(|| {
                grew = true;
                graph.node(target).exclusions.clone()
            });
            let before = set.len();
            set.extend(current.iter().cloned());
            if grew || set.len() != before {
                queue.push_back(target);
            }
        }
    }

    for (node, set) in in_effect {
        graph.node_mut(node).exclusions = set;
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphNode;
    use crate::test_support::{coord, link, node};
    use depot_core::scope::Scope;

    fn excluding(graph: &mut DependencyGraph, at: &str, group: &str, artifact: &str) {
        let mut n = GraphNode::new(coord(at));
        n.exclusions.insert(Exclusion::new(group, artifact));
        graph.add_node(n);
    }

    #[test]
    fn exclusion_applies_below_declaring_node() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        excluding(&mut g, "org.a:a:1.0", "org.x", "x");
        link(&mut g, "org.a:a:1.0", "org.b:b:1.0", Scope::Compile);
        let bx = link(&mut g, "org.b:b:1.0", "org.x:x:1.0", Scope::Compile);

        assert_eq!(flag_excluded_edges(&mut g), 1);
        assert_eq!(g.edge(bx).disabled_reason(), Some(DisableReason::Excluded));
        let b = node(&g, "org.b:b:1.0");
        assert!(g.node(b).exclusions.contains(&Exclusion::new("org.x", "x")));
    }

    #[test]
    fn wildcard_excludes_whole_group() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        excluding(&mut g, "org.a:a:1.0", "org.x", "*");
        let ax = link(&mut g, "org.a:a:1.0", "org.x:x:1.0", Scope::Compile);
        let ay = link(&mut g, "org.a:a:1.0", "org.x:y:1.0", Scope::Compile);
        let az = link(&mut g, "org.a:a:1.0", "org.z:x:1.0", Scope::Compile);

        assert_eq!(flag_excluded_edges(&mut g), 2);
        assert!(!g.edge(ax).is_enabled());
        assert!(!g.edge(ay).is_enabled());
        assert!(g.edge(az).is_enabled());
    }

    #[test]
    fn excluded_subtree_does_not_propagate() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        excluding(&mut g, "org.a:a:1.0", "org.x", "x");
        link(&mut g, "org.a:a:1.0", "org.x:x:1.0", Scope::Compile);
        excluding(&mut g, "org.x:x:1.0", "org.q", "q");
        link(&mut g, "org.x:x:1.0", "org.y:y:1.0", Scope::Compile);

        flag_excluded_edges(&mut g);
        let y = node(&g, "org.y:y:1.0");
        assert!(g.node(y).exclusions.is_empty());
    }

    #[test]
    fn root_edges_are_never_excluded_by_descendants() {
        let mut g = DependencyGraph::new(coord("com.example:app:1.0"));
        link(&mut g, "com.example:app:1.0", "org.a:a:1.0", Scope::Compile);
        excluding(&mut g, "org.a:a:1.0", "org.x", "x");
        let rx = link(&mut g, "com.example:app:1.0", "org.x:x:1.0", Scope::Compile);

        assert_eq!(flag_excluded_edges(&mut g), 0);
        assert!(g.edge(rx).is_enabled());
    }
}
