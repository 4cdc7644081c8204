use std::f64::consts::PI;

use super::{penalty, EdgeCalculator, PotentialEdge};
use crate::edge::{Direction, Edge};
use crate::node::Node;

impl EdgeCalculator {
    /// Link `node` to the best full panorama nearby.
    ///
    /// Candidates must lie within `[min_distance, max_distance]`; those near
    /// `preferred_distance` and related to the source score best. Sources
    /// that are not panoramas also prefer panoramas in front of the camera.
    pub fn compute_panorama_edges(
        &self,
        node: &Node,
        potential_edges: &[PotentialEdge],
    ) -> Vec<Edge> {
        let settings = &self.settings.panorama;
        let source_is_panorama = node.is_panorama();

        let mut best: Option<(&PotentialEdge, f64)> = None;
        for potential in potential_edges {
            if !potential.is_full_panorama
                || potential.distance < settings.min_distance
                || potential.distance > settings.max_distance
            {
                continue;
            }

            let mut score = (potential.distance - settings.preferred_distance).abs()
                / settings.max_distance
                + penalty(!potential.same_sequence)
                + penalty(!potential.same_merge_component);
            if !source_is_panorama {
                score += potential.motion_change.abs() / PI;
            }

            if best.is_none_or(|(_, lowest)| score < lowest) {
                best = Some((potential, score));
            }
        }

        best.map(|(potential, _)| {
            Edge::new(potential.target_id.clone(), Direction::Panorama)
                .with_azimuth(potential.world_motion_azimuth)
        })
        .into_iter()
        .collect()
    }
}
