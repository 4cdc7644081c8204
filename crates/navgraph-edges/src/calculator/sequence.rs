use log::trace;

use super::{ensure_full, EdgeCalculator};
use crate::edge::{Direction, Edge};
use crate::error::EdgeError;
use crate::node::{Node, Sequence};

impl EdgeCalculator {
    /// `Next` and `Prev` edges from capture order alone.
    ///
    /// `sequence` must be the node's own sequence. A node missing from it
    /// gets no edges.
    pub fn calculate_edges(
        &self,
        node: &Node,
        sequence: &Sequence,
    ) -> Result<Vec<Edge>, EdgeError> {
        ensure_full(node)?;
        if sequence.id != node.sequence_id {
            return Err(EdgeError::SequenceMismatch {
                node_id: node.id.clone(),
                node_sequence: node.sequence_id.clone(),
                sequence: sequence.id.clone(),
            });
        }

        let mut edges = Vec::with_capacity(2);
        if let Some(next) = sequence.next_id(&node.id) {
            edges.push(Edge::new(next, Direction::Next));
        }
        if let Some(prev) = sequence.prev_id(&node.id) {
            edges.push(Edge::new(prev, Direction::Prev));
        }
        trace!("node {}: {} sequence edges", node.id, edges.len());
        Ok(edges)
    }
}
