//! Dependency graph model: nodes keyed by coordinate, edges that are enabled
//! or disabled with a reason, and traversal over the enabled subgraph.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use depot_core::coordinate::{Coordinate, MediationKey};
use depot_core::dependency::{merge_managed, Exclusion, ManagedDependency};
use depot_core::scope::Scope;
use depot_util::errors::DepotError;
use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeFiltered, EdgeRef, IntoEdgeReferences};
use petgraph::Direction;
use serde::Serialize;

use crate::conflict::{ConflictReport, VersionConflict};

/// One artifact in the graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub coordinate: Coordinate,
    /// Exclusions in effect here, declared on the inbound edge or inherited.
    pub exclusions: BTreeSet<Exclusion>,
    /// Dependency management in effect here.
    pub dependency_management: Vec<ManagedDependency>,
    /// Reached through a parent POM's dependencies rather than a direct
    /// declaration.
    pub from_parent: bool,
    /// Scope assigned by scope reduction; `None` until then or when the node
    /// is not part of the resolution.
    pub resolved_scope: Option<Scope>,
}

impl GraphNode {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            exclusions: BTreeSet::new(),
            dependency_management: Vec::new(),
            from_parent: false,
            resolved_scope: None,
        }
    }

    pub fn key(&self) -> String {
        self.coordinate.key()
    }

    pub fn mediation_key(&self) -> MediationKey {
        self.coordinate.mediation_key()
    }

    /// Fold another contributor for the same artifact into this node.
    pub fn merge(&mut self, other: &GraphNode) {
        self.exclusions.extend(other.exclusions.iter().cloned());
        merge_managed(&mut self.dependency_management, &other.dependency_management);
        self.from_parent |= other.from_parent;
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.coordinate.fmt(f)
    }
}

/// Why an edge no longer takes part in the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisableReason {
    /// Closes a cycle back to a node on the current path.
    Cyclic,
    /// Matches an exclusion in effect at its source.
    Excluded,
    /// Optional dependency of a dependency.
    Optional,
    /// A nearer node with the same mediation key won.
    NearerDep,
    /// A node at the same distance with a newer version won.
    NearerEdge,
    /// Not visible under the requested scope.
    ScopeFiltered,
}

impl DisableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cyclic => "CYCLIC",
            Self::Excluded => "EXCLUDED",
            Self::Optional => "OPTIONAL",
            Self::NearerDep => "NEARER_DEP",
            Self::NearerEdge => "NEARER_EDGE",
            Self::ScopeFiltered => "SCOPE_FILTERED",
        }
    }
}

impl fmt::Display for DisableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum EdgeState {
    Enabled,
    Disabled(DisableReason),
}

/// A declared dependency from one node to another.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    /// Recorded scope. Starts as the declared scope and is rewritten to the
    /// edge's effective scope by scope update.
    pub scope: Scope,
    /// Scope as written in the POM; never rewritten.
    pub declared: Scope,
    pub optional: bool,
    pub state: EdgeState,
}

impl GraphEdge {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            declared: scope,
            optional: false,
            state: EdgeState::Enabled,
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.state == EdgeState::Enabled
    }

    pub fn disabled_reason(&self) -> Option<DisableReason> {
        match self.state {
            EdgeState::Enabled => None,
            EdgeState::Disabled(reason) => Some(reason),
        }
    }

    /// Disable the edge. The first reason sticks; returns whether anything
    /// changed.
    pub fn disable(&mut self, reason: DisableReason) -> bool {
        if self.is_enabled() {
            self.state = EdgeState::Disabled(reason);
            true
        } else {
            false
        }
    }
}

/// A disabled edge moved out of the live graph.
#[derive(Debug, Clone)]
pub struct PrunedEdge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub edge: GraphEdge,
}

/// The dependency graph of one resolution request.
///
/// Nodes live in a petgraph arena and are addressed by stable
/// [`NodeIndex`] handles; `index` maps each coordinate's normalized key to
/// its handle, so adding a coordinate twice merges instead of duplicating.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: StableDiGraph<GraphNode, GraphEdge>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
    pruned: Vec<PrunedEdge>,
    pub conflicts: ConflictReport,
}

impl DependencyGraph {
    pub fn new(root: Coordinate) -> Self {
        let mut graph = StableDiGraph::new();
        let key = root.key();
        let root = graph.add_node(GraphNode::new(root));
        let mut index = HashMap::new();
        index.insert(key, root);
        Self {
            graph,
            index,
            root,
            pruned: Vec::new(),
            conflicts: ConflictReport::new(),
        }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn root_node(&self) -> &GraphNode {
        &self.graph[self.root]
    }

    /// Add a node, merging into the existing node for the same coordinate.
    pub fn add_node(&mut self, node: GraphNode) -> NodeIndex {
        let key = node.key();
        if let Some(&idx) = self.index.get(&key) {
            self.graph[idx].merge(&node);
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Add a dependency edge from `from` to `to`. A second edge between the
    /// same pair is not added; the existing one is returned.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: GraphEdge) -> EdgeIndex {
        if let Some(existing) = self.graph.find_edge(from, to) {
            return existing;
        }
        self.graph.add_edge(from, to, edge)
    }

    pub fn find(&self, coord: &Coordinate) -> Option<NodeIndex> {
        self.index.get(&coord.key()).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut GraphNode {
        &mut self.graph[idx]
    }

    pub fn edge(&self, idx: EdgeIndex) -> &GraphEdge {
        &self.graph[idx]
    }

    pub fn edge_mut(&mut self, idx: EdgeIndex) -> &mut GraphEdge {
        &mut self.graph[idx]
    }

    pub fn endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// All node handles in insertion order.
    pub fn node_indices(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    /// All live edge handles in insertion order.
    pub fn edge_indices(&self) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self.graph.edge_indices().collect();
        edges.sort();
        edges
    }

    /// Live outbound edges of `idx` in declaration order.
    pub fn outgoing(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.directed(idx, Direction::Outgoing, false)
    }

    /// Live inbound edges of `idx` in declaration order, paired with their source.
    pub fn incoming(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.directed(idx, Direction::Incoming, false)
    }

    pub fn enabled_outgoing(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.directed(idx, Direction::Outgoing, true)
    }

    pub fn enabled_incoming(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        self.directed(idx, Direction::Incoming, true)
    }

    fn directed(
        &self,
        idx: NodeIndex,
        dir: Direction,
        enabled_only: bool,
    ) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, dir)
            .filter(|e| !enabled_only || e.weight().is_enabled())
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_by_key(|(e, _)| *e);
        edges
    }

    /// Disable an edge; returns whether it was enabled before.
    pub fn disable_edge(&mut self, idx: EdgeIndex, reason: DisableReason) -> bool {
        self.graph
            .edge_weight_mut(idx)
            .map(|edge| edge.disable(reason))
            .unwrap_or(false)
    }

    pub fn remove_edge(&mut self, idx: EdgeIndex) -> Option<GraphEdge> {
        self.graph.remove_edge(idx)
    }

    /// Move every disabled edge out of the live graph. Pruned edges still
    /// answer [`find_edge`](Self::find_edge) and
    /// [`disabled_edges`](Self::disabled_edges).
    pub fn prune_disabled(&mut self) -> usize {
        let disabled: Vec<EdgeIndex> = self
            .graph
            .edge_indices()
            .filter(|&e| !self.graph[e].is_enabled())
            .collect();
        for idx in &disabled {
            let Some((from, to)) = self.graph.edge_endpoints(*idx) else {
                continue;
            };
            if let Some(edge) = self.graph.remove_edge(*idx) {
                self.pruned.push(PrunedEdge { from, to, edge });
            }
        }
        disabled.len()
    }

    /// The edge `from → to`, live or pruned.
    pub fn find_edge(&self, from: &Coordinate, to: &Coordinate) -> Option<&GraphEdge> {
        let from = self.find(from)?;
        let to = self.find(to)?;
        if let Some(idx) = self.graph.find_edge(from, to) {
            return self.graph.edge_weight(idx);
        }
        self.pruned
            .iter()
            .find(|p| p.from == from && p.to == to)
            .map(|p| &p.edge)
    }

    /// Every disabled edge, live or pruned, as `(from, to, edge)`.
    pub fn disabled_edges(&self) -> Vec<(NodeIndex, NodeIndex, &GraphEdge)> {
        let mut out: Vec<(NodeIndex, NodeIndex, &GraphEdge)> = self
            .pruned
            .iter()
            .map(|p| (p.from, p.to, &p.edge))
            .collect();
        for e in self.graph.edge_references() {
            if !e.weight().is_enabled() {
                out.push((e.source(), e.target(), e.weight()));
            }
        }
        out
    }

    /// Hop count from the root to every node reachable over enabled edges.
    pub fn distances(&self) -> HashMap<NodeIndex, usize> {
        let mut dist = HashMap::new();
        dist.insert(self.root, 0);
        let mut queue = VecDeque::from([self.root]);
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            for (_, target) in self.enabled_outgoing(node) {
                if !dist.contains_key(&target) {
                    dist.insert(target, d + 1);
                    queue.push_back(target);
                }
            }
        }
        dist
    }

    /// Nodes reachable from the root over enabled edges, breadth-first,
    /// root included.
    pub fn reachable(&self) -> Vec<NodeIndex> {
        let mut seen = HashSet::from([self.root]);
        let mut order = vec![self.root];
        let mut i = 0;
        while i < order.len() {
            for (_, target) in self.enabled_outgoing(order[i]) {
                if seen.insert(target) {
                    order.push(target);
                }
            }
            i += 1;
        }
        order
    }

    /// Reachable nodes ordered so every node follows all of its reachable
    /// parents. Nodes caught in an enabled cycle are left out.
    pub fn topological_order(&self) -> Vec<NodeIndex> {
        let reachable = self.reachable();
        let members: HashSet<NodeIndex> = reachable.iter().copied().collect();
        let mut indegree: HashMap<NodeIndex, usize> = reachable
            .iter()
            .map(|&n| {
                let count = self
                    .enabled_incoming(n)
                    .iter()
                    .filter(|(_, src)| members.contains(src))
                    .count();
                (n, count)
            })
            .collect();

        let mut queue: VecDeque<NodeIndex> = reachable
            .iter()
            .copied()
            .filter(|n| indegree[n] == 0)
            .collect();
        let mut order = Vec::with_capacity(reachable.len());
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for (_, target) in self.enabled_outgoing(node) {
                if let Some(d) = indegree.get_mut(&target) {
                    *d -= 1;
                    if *d == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }
        order
    }

    /// Whether `to` is reachable from `from` over enabled edges other than `skip`.
    pub fn has_alternate_path(&self, skip: EdgeIndex, from: NodeIndex, to: NodeIndex) -> bool {
        let view = EdgeFiltered::from_fn(&self.graph, |e| e.id() != skip && e.weight().is_enabled());
        has_path_connecting(&view, from, to, None)
    }

    /// Resolved artifacts: every node reachable from the root, root excluded.
    pub fn resolved_nodes(&self) -> Vec<&GraphNode> {
        self.reachable()
            .into_iter()
            .filter(|&idx| idx != self.root)
            .map(|idx| &self.graph[idx])
            .collect()
    }

    /// Merge another graph for the same root into this one, keyed by coordinate.
    pub fn absorb(&mut self, other: DependencyGraph) -> Result<(), DepotError> {
        let other_root = &other.graph[other.root].coordinate;
        if other_root != &self.graph[self.root].coordinate {
            return Err(DepotError::Resolution {
                message: format!(
                    "builder returned a graph rooted at {other_root}, expected {}",
                    self.graph[self.root].coordinate
                ),
            });
        }

        let mut mapping: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        for idx in other.graph.node_indices() {
            let mapped = self.add_node(other.graph[idx].clone());
            mapping.insert(idx, mapped);
        }
        for idx in other.edge_indices() {
            if let Some((from, to)) = other.graph.edge_endpoints(idx) {
                self.add_edge(mapping[&from], mapping[&to], other.graph[idx].clone());
            }
        }
        for p in other.pruned {
            self.pruned.push(PrunedEdge {
                from: mapping[&p.from],
                to: mapping[&p.to],
                edge: p.edge,
            });
        }
        for c in other.conflicts.conflicts {
            self.conflicts.add(c);
        }
        Ok(())
    }

    /// Total number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of resolved nodes (excluding root).
    pub fn len(&self) -> usize {
        self.reachable().len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the nearest path from the root to a resolved dependency.
    ///
    /// Accepts a full coordinate, `group:artifact`, or just `artifact`.
    pub fn find_path(&self, target_key: &str) -> Option<Vec<&GraphNode>> {
        let target = self.resolve_key(target_key)?;
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([self.root]);
        let mut seen = HashSet::from([self.root]);
        while let Some(node) = queue.pop_front() {
            if node == target {
                let mut path = vec![node];
                let mut cur = node;
                while let Some(&p) = parent.get(&cur) {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return Some(path.into_iter().map(|idx| &self.graph[idx]).collect());
            }
            for (_, next) in self.enabled_outgoing(node) {
                if seen.insert(next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Resolve a user-provided key to a reachable node.
    fn resolve_key(&self, key: &str) -> Option<NodeIndex> {
        if let Ok(coord) = Coordinate::parse(key) {
            if let Some(idx) = self.find(&coord) {
                return Some(idx);
            }
        }
        self.reachable().into_iter().find(|&idx| {
            let node = &self.graph[idx];
            let c = &node.coordinate;
            node.mediation_key().to_string() == key
                || format!("{}:{}", c.group_id, c.artifact_id) == key
                || c.artifact_id == key
        })
    }

    /// Print the resolved tree (enabled edges only).
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = format!("{}\n", self.root_node());
        let mut visited = HashSet::from([self.root]);
        let deps = self.enabled_outgoing(self.root);
        let count = deps.len();
        for (i, (edge, child)) in deps.iter().enumerate() {
            self.print_subtree(
                &mut output,
                *edge,
                *child,
                "",
                i == count - 1,
                1,
                max_depth,
                &mut visited,
            );
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        edge: EdgeIndex,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        let edge = &self.graph[edge];
        let optional = if edge.optional { ", optional" } else { "" };
        output.push_str(&format!("{prefix}{connector}{node} ({}{optional})\n", edge.scope));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.enabled_outgoing(idx);
        let count = deps.len();
        for (i, (e, child)) in deps.iter().enumerate() {
            self.print_subtree(
                output,
                *e,
                *child,
                &child_prefix,
                i == count - 1,
                depth + 1,
                max_depth,
                visited,
            );
        }

        visited.remove(&idx);
    }

    /// A serializable view of the resolution for downstream consumers.
    pub fn snapshot(&self) -> GraphSnapshot {
        let reachable = self.reachable();
        let nodes = reachable
            .iter()
            .filter(|&&idx| idx != self.root)
            .map(|&idx| {
                let node = &self.graph[idx];
                NodeView {
                    coordinate: node.coordinate.to_string(),
                    scope: node.resolved_scope,
                    from_parent: node.from_parent,
                }
            })
            .collect();
        let edges = reachable
            .iter()
            .flat_map(|&idx| {
                self.enabled_outgoing(idx)
                    .into_iter()
                    .map(move |(e, to)| self.edge_view(idx, to, &self.graph[e]))
            })
            .collect();
        let disabled = self
            .disabled_edges()
            .into_iter()
            .map(|(from, to, edge)| self.edge_view(from, to, edge))
            .collect();
        GraphSnapshot {
            root: self.root_node().coordinate.to_string(),
            nodes,
            edges,
            disabled,
            conflicts: self.conflicts.conflicts.clone(),
        }
    }

    fn edge_view(&self, from: NodeIndex, to: NodeIndex, edge: &GraphEdge) -> EdgeView {
        EdgeView {
            from: self.graph[from].coordinate.to_string(),
            to: self.graph[to].coordinate.to_string(),
            scope: edge.scope,
            optional: edge.optional,
            state: edge.state,
        }
    }
}

/// Serializable form of a resolved graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub root: String,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub disabled: Vec<EdgeView>,
    pub conflicts: Vec<VersionConflict>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub coordinate: String,
    pub scope: Option<Scope>,
    pub from_parent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub scope: Scope,
    pub optional: bool,
    #[serde(flatten)]
    pub state: EdgeState,
}
