//! Hand-built graphs for unit tests.

use depot_core::coordinate::Coordinate;
use depot_core::scope::Scope;
use petgraph::stable_graph::EdgeIndex;

use crate::graph::{DependencyGraph, GraphEdge, GraphNode};

pub fn coord(s: &str) -> Coordinate {
    Coordinate::parse(s).unwrap()
}

/// Add `from → to` (creating either node as needed).
pub fn link(graph: &mut DependencyGraph, from: &str, to: &str, scope: Scope) -> EdgeIndex {
    link_edge(graph, from, to, GraphEdge::new(scope))
}

pub fn link_edge(graph: &mut DependencyGraph, from: &str, to: &str, edge: GraphEdge) -> EdgeIndex {
    let from = graph.add_node(GraphNode::new(coord(from)));
    let to = graph.add_node(GraphNode::new(coord(to)));
    graph.add_edge(from, to, edge)
}

pub fn node(graph: &DependencyGraph, s: &str) -> petgraph::stable_graph::NodeIndex {
    graph.find(&coord(s)).unwrap()
}
