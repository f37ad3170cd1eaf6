//! Initial graph construction: a breadth-first walk over effective POMs.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use depot_core::coordinate::Coordinate;
use depot_core::dependency::{find_managed, merge_managed, Exclusion};
use depot_core::scope::Scope;
use depot_maven::pom::{Pom, PomDependency};
use depot_maven::source::MetadataSource;
use depot_util::errors::DepotError;
use petgraph::stable_graph::NodeIndex;

use crate::cache::{PomCache, VisitedSet};
use crate::graph::{DependencyGraph, GraphEdge, GraphNode};
use crate::version::VersionRange;

/// Longest parent/BOM import chain followed before giving up.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Produces the unreduced dependency graph for a root coordinate.
///
/// The returned graph must be rooted at `root`. Implementations are shared
/// between concurrent resolutions.
pub trait GraphBuilder: Send + Sync {
    fn build(&self, root: &Coordinate) -> Result<DependencyGraph, DepotError>;
}

impl<B: GraphBuilder + ?Sized> GraphBuilder for Arc<B> {
    fn build(&self, root: &Coordinate) -> Result<DependencyGraph, DepotError> {
        (**self).build(root)
    }
}

/// Builds graphs from POMs served by a [`MetadataSource`].
///
/// Every declared dependency becomes an edge, including ones that later
/// passes will disable. A target's own dependencies are expanded once, the
/// first time it is reached through an edge that can carry it into the
/// resolution: not excluded, not optional below the root, and not a
/// `test`, `provided` or `system` dependency of a dependency.
#[derive(Debug)]
pub struct PomGraphBuilder<S> {
    source: S,
    include_optional: bool,
}

impl<S: MetadataSource> PomGraphBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            include_optional: false,
        }
    }

    /// Also expand optional dependencies of dependencies.
    pub fn include_optional(mut self, include: bool) -> Self {
        self.include_optional = include;
        self
    }

    /// The effective POM: parent chain applied, properties resolved and BOM
    /// management imported.
    fn effective_pom(
        &self,
        coord: &Coordinate,
        cache: &mut PomCache,
        chain: &mut Vec<String>,
    ) -> Result<Pom, DepotError> {
        if let Some(pom) = cache.get(coord) {
            return Ok(pom.clone());
        }

        let link = format!("{}:{}:{}", coord.group_id, coord.artifact_id, coord.version);
        if chain.contains(&link) || chain.len() >= MAX_INHERITANCE_DEPTH {
            chain.push(link);
            return Err(DepotError::metadata(
                coord,
                format!("inheritance cycle: {}", chain.join(" -> ")),
            ));
        }
        chain.push(link);

        let mut pom = self.source.pom(coord)?;
        if let Some(parent_ref) = pom.parent.clone() {
            let parent = self.effective_pom(&parent_ref.coordinate(), cache, chain)?;
            pom.apply_parent(&parent);
        }
        pom.resolve_properties();

        let imports: Vec<PomDependency> = pom.bom_imports().into_iter().cloned().collect();
        for import in imports {
            let Some(version) = import.version.as_deref().filter(|v| !v.contains("${")) else {
                tracing::warn!(
                    pom = %coord,
                    bom = %import.mediation_key(),
                    "BOM import without a usable version, skipping"
                );
                continue;
            };
            let bom_coord =
                Coordinate::new(&import.group_id, &import.artifact_id, version).with_type("pom");
            let bom = self.effective_pom(&bom_coord, cache, chain)?;
            pom.import_management(&bom);
        }

        chain.pop();
        cache.insert(coord, pom.clone());
        Ok(pom)
    }

    /// Pick a concrete version for a declared version or range.
    fn select_version(&self, dep: &PomDependency, requested: &str) -> Result<String, DepotError> {
        let Some(range) = VersionRange::parse(requested) else {
            return Ok(requested.to_string());
        };
        let available = self.source.versions(&dep.group_id, &dep.artifact_id)?;
        match range.newest_in(&available) {
            Some(version) => {
                tracing::debug!(dependency = %dep.mediation_key(), range = requested, version, "range resolved");
                Ok(version.to_string())
            }
            None => Err(DepotError::metadata(
                format!("{}:{}:{requested}", dep.group_id, dep.artifact_id),
                "no available version satisfies the range",
            )),
        }
    }
}

impl<S: MetadataSource> GraphBuilder for PomGraphBuilder<S> {
    fn build(&self, root: &Coordinate) -> Result<DependencyGraph, DepotError> {
        let mut graph = DependencyGraph::new(root.clone());
        let mut cache = PomCache::new();
        let mut expanded = VisitedSet::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([graph.root()]);
        expanded.visit(root);

        while let Some(node_idx) = queue.pop_front() {
            let is_root = node_idx == graph.root();
            let source = graph.node(node_idx).clone();
            let pom = self.effective_pom(&source.coordinate, &mut cache, &mut Vec::new())?;

            let ancestor_managed = &source.dependency_management;
            let mut child_managed = ancestor_managed.clone();
            merge_managed(&mut child_managed, &pom.managed());

            for dep in &pom.dependencies {
                if dep.group_id.is_empty() || dep.artifact_id.is_empty() {
                    tracing::warn!(pom = %source.coordinate, "dependency without coordinates, skipping");
                    continue;
                }
                let key = dep.mediation_key();
                let ancestor = find_managed(ancestor_managed, &key);

                // Management from above wins over the declaration, which wins
                // over this POM's own management.
                let declared_version = ancestor
                    .and_then(|m| m.version.clone())
                    .or_else(|| dep.version.clone())
                    .or_else(|| pom.managed_version(&key).map(str::to_string));
                let Some(requested) = declared_version.filter(|v| !v.is_empty() && !v.contains("${"))
                else {
                    tracing::warn!(
                        pom = %source.coordinate,
                        dependency = %key,
                        "no resolvable version, skipping"
                    );
                    continue;
                };
                let version = self.select_version(dep, &requested)?;

                let own_managed_scope = || {
                    pom.managed()
                        .into_iter()
                        .find(|m| m.key == key)
                        .and_then(|m| m.scope)
                };
                let scope = ancestor
                    .and_then(|m| m.scope)
                    .or_else(|| dep.scope.as_ref().map(|_| dep.parsed_scope()))
                    .or_else(own_managed_scope)
                    .unwrap_or_default();

                let target = Coordinate::new(&dep.group_id, &dep.artifact_id, version)
                    .with_type(dep.type_.as_deref().unwrap_or(depot_core::coordinate::DEFAULT_TYPE))
                    .with_classifier(dep.classifier.clone().unwrap_or_default());

                let mut exclusions: BTreeSet<Exclusion> = source.exclusions.clone();
                exclusions.extend(dep.exclusions.iter().map(|e| e.to_exclusion()));

                let mut node = GraphNode::new(target.clone());
                node.exclusions = exclusions;
                node.dependency_management = child_managed.clone();
                node.from_parent = dep.inherited || (!is_root && source.from_parent);

                let child_idx = graph.add_node(node);
                graph.add_edge(node_idx, child_idx, GraphEdge::new(scope).optional(dep.optional));

                let excluded = source.exclusions.iter().any(|e| e.matches(&key));
                let terminal = scope == Scope::System
                    || (!is_root
                        && ((dep.optional && !self.include_optional)
                            || Scope::combine(Scope::Compile, scope).is_none()));
                if excluded || terminal {
                    tracing::trace!(dependency = %target, excluded, "not expanding");
                    continue;
                }
                if expanded.visit(&target) {
                    queue.push_back(child_idx);
                }
            }
        }

        tracing::info!(
            root = %root,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        Ok(graph)
    }
}
