//! Edge calculation.
//!
//! Pipeline for one source node:
//! 1. Sequence edges (next/prev) from capture order alone.
//! 2. Potential edges: distance, motion and direction changes, rotation and
//!    sequence/merge flags of every candidate with a pose.
//! 3. Step edges: at most one forward/backward/left/right target, chosen by
//!    lowest score among candidates within the step's direction and drift
//!    limits; forward/backward fall back to a sequence neighbour.
//! 4. Turn edges for non-panorama sources.
//! 5. At most one panorama edge.

mod panorama;
mod potential;
mod sequence;
mod step;
#[cfg(test)]
mod testing;
mod turn;

use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::edge::Edge;
use crate::error::{EdgeError, SettingsError};
use crate::node::{Node, Sequence};
use crate::settings::EdgeCalculatorSettings;

pub use potential::PotentialEdge;

/// Computes navigation edges with a fixed, validated set of thresholds.
///
/// Holds no other state; every method is a pure function of its arguments.
#[derive(Clone, Debug)]
pub struct EdgeCalculator {
    settings: EdgeCalculatorSettings,
}

impl EdgeCalculator {
    pub fn new(settings: EdgeCalculatorSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &EdgeCalculatorSettings {
        &self.settings
    }

    /// Every edge of `node`: sequence, step, turn and panorama edges.
    ///
    /// `sequence` must be the node's own sequence; its neighbours of `node`
    /// are the step fallbacks. `candidates` are typically pre-filtered by a
    /// spatial index and may include `node` itself.
    pub fn compute_edges(
        &self,
        node: &Node,
        sequence: &Sequence,
        candidates: &[Node],
    ) -> Result<Vec<Edge>, EdgeError> {
        self.compute_edges_among(node, sequence, candidates)
    }

    /// [`compute_edges`](Self::compute_edges) over borrowed candidates.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(node = %node.id))
    )]
    pub fn compute_edges_among<'a>(
        &self,
        node: &Node,
        sequence: &Sequence,
        candidates: impl IntoIterator<Item = &'a Node>,
    ) -> Result<Vec<Edge>, EdgeError> {
        let mut edges = self.calculate_edges(node, sequence)?;

        let prev_id = sequence.prev_id(&node.id);
        let next_id = sequence.next_id(&node.id);
        let fallback_ids: Vec<&str> = prev_id.into_iter().chain(next_id).collect();

        let potential_edges = self.potential_edges_among(node, candidates, &fallback_ids)?;
        edges.extend(self.compute_step_edges(&potential_edges, prev_id, next_id));
        if !node.is_panorama() {
            edges.extend(self.compute_turn_edges(&potential_edges));
        }
        edges.extend(self.compute_panorama_edges(node, &potential_edges));

        debug!("node {}: {} edges", node.id, edges.len());
        Ok(edges)
    }
}

pub(crate) fn ensure_full(node: &Node) -> Result<(), EdgeError> {
    if node.is_full() {
        Ok(())
    } else {
        Err(EdgeError::NodeNotFull {
            id: node.id.clone(),
            completeness: node.completeness(),
        })
    }
}

/// Score term for a missing relation (lower scores win).
#[inline]
pub(crate) fn penalty(applies: bool) -> f64 {
    if applies {
        1.0
    } else {
        0.0
    }
}
