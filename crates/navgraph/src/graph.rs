use std::collections::BTreeMap;

use log::{debug, info};
use navgraph_core::spatial::distance_from_lat_lon;
use navgraph_edges::{Edge, EdgeCalculator, EdgeError, Sequence};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::capture_set::GraphInput;

/// Outgoing edges per node id, in node id order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationGraph {
    pub edges: BTreeMap<String, Vec<Edge>>,
}

impl NavigationGraph {
    pub fn edges_of(&self, node_id: &str) -> Option<&[Edge]> {
        self.edges.get(node_id).map(Vec::as_slice)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

/// Compute the edges of every node that has full metadata.
///
/// Candidates of a node are the captures within `search_radius` meters of it
/// (planar lat/lon distance) plus its sequence neighbours. Core nodes get no
/// entry.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(nodes = input.nodes.len()))
)]
pub fn build_navigation_graph(
    input: &GraphInput,
    calculator: &EdgeCalculator,
    search_radius: f64,
) -> Result<NavigationGraph, EdgeError> {
    let mut graph = NavigationGraph::default();

    for (node, position) in input.nodes.iter().zip(&input.positions) {
        if !node.is_full() {
            debug!("skipping {}: {:?}", node.id, node.completeness());
            continue;
        }

        let own_sequence;
        let sequence = match input.sequence_of(node) {
            Some(sequence) => sequence,
            None => {
                own_sequence = Sequence::new(node.sequence_id.clone(), vec![node.id.clone()]);
                &own_sequence
            }
        };
        let neighbours = [sequence.prev_id(&node.id), sequence.next_id(&node.id)];

        let candidates = input
            .nodes
            .iter()
            .zip(&input.positions)
            .filter(|(other, other_position)| {
                neighbours.contains(&Some(other.id.as_str()))
                    || distance_from_lat_lon(
                        position.lat,
                        position.lon,
                        other_position.lat,
                        other_position.lon,
                    ) <= search_radius
            })
            .map(|(other, _)| other);

        let edges = calculator.compute_edges_among(node, sequence, candidates)?;
        graph.edges.insert(node.id.clone(), edges);
    }

    info!(
        "navigation graph: {} edges over {} nodes",
        graph.edge_count(),
        graph.edges.len()
    );
    Ok(graph)
}
