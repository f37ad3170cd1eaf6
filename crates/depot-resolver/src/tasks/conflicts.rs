use std::collections::BTreeMap;

use depot_core::coordinate::MediationKey;
use petgraph::stable_graph::NodeIndex;

use crate::conflict::VersionConflict;
use crate::graph::{DependencyGraph, DisableReason};
use crate::tasks::flag_intransitive_edges;
use crate::version::compare_versions;

/// Mediate version conflicts until each mediation key has one reachable node.
///
/// Edges that can never reach the consumer are disabled first (see
/// [`flag_intransitive_edges`]), so a test or optional dependency of a
/// dependency never outbids a version that is actually carried in.
///
/// Conflicts are settled nearest-first: the key whose closest node is
/// nearest the root goes first, ties broken by key order. The winner is the
/// nearest node, then the newest version, then the earliest added. Every
/// loser has its enabled inbound edges disabled (`NearerDep` when the winner
/// is strictly nearer, `NearerEdge` at equal distance) and its exclusions
/// and dependency management are folded into the winner. Distances are
/// recomputed after each key, since disabling edges can move nodes.
pub fn refine_conflicts(graph: &mut DependencyGraph, include_optional: bool) -> usize {
    let root = graph.root();
    let mut disabled = flag_intransitive_edges(graph, include_optional);

    loop {
        let distances = graph.distances();
        let mut groups: BTreeMap<MediationKey, Vec<NodeIndex>> = BTreeMap::new();
        for &node in distances.keys() {
            if node != root {
                groups.entry(graph.node(node).mediation_key()).or_default().push(node);
            }
        }

        let next = groups
            .into_iter()
            .filter(|(_, nodes)| nodes.len() > 1)
            .min_by_key(|(_, nodes)| nodes.iter().map(|n| distances[n]).min().unwrap_or(usize::MAX));
        let Some((key, mut nodes)) = next else {
            break;
        };

        nodes.sort_by(|a, b| {
            distances[a]
                .cmp(&distances[b])
                .then_with(|| {
                    compare_versions(&graph.node(*b).coordinate.version, &graph.node(*a).coordinate.version)
                })
                .then_with(|| a.cmp(b))
        });
        let winner = nodes[0];
        let winner_distance = distances[&winner];

        for &loser in &nodes[1..] {
            let reason = if distances[&loser] > winner_distance {
                DisableReason::NearerDep
            } else {
                DisableReason::NearerEdge
            };
            for (edge, _) in graph.enabled_incoming(loser) {
                if graph.disable_edge(edge, reason) {
                    disabled += 1;
                }
            }

            let loser_node = graph.node(loser).clone();
            graph.node_mut(winner).merge(&loser_node);

            let conflict = VersionConflict {
                key: key.to_string(),
                requested: loser_node.coordinate.version.clone(),
                resolved: graph.node(winner).coordinate.version.clone(),
                reason,
            };
            tracing::debug!(%conflict, "version conflict mediated");
            graph.conflicts.add(conflict);
        }
    }

    disabled
}
