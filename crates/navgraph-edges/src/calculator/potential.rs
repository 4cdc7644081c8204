use log::{debug, trace};
use nalgebra::Vector3;
use navgraph_core::{spatial, Pose};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{ensure_full, EdgeCalculator};
use crate::error::EdgeError;
use crate::node::Node;

/// Geometric relation between a source node and one candidate.
///
/// Angles are radians in `(−π, π]`, distances meters. Derived on every query
/// and never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PotentialEdge {
    pub target_id: String,
    /// Distance between the optical centers.
    pub distance: f64,
    /// Horizontal angle from the source viewing direction to the motion.
    pub motion_change: f64,
    /// Elevation of the motion above the horizontal plane.
    pub vertical_motion: f64,
    /// Horizontal angle from the source to the candidate viewing direction.
    pub direction_change: f64,
    /// Source viewing elevation minus candidate viewing elevation.
    pub vertical_direction_change: f64,
    /// Magnitude of the relative rotation between the two cameras.
    pub rotation: f64,
    /// Horizontal motion angle from the frame's east axis.
    pub world_motion_azimuth: f64,
    pub same_sequence: bool,
    pub same_merge_component: bool,
    pub is_full_panorama: bool,
}

/// Source-side quantities shared by every candidate of one query.
struct SourceGeometry<'a> {
    node: &'a Node,
    pose: &'a Pose,
    position: Vector3<f64>,
    direction: Vector3<f64>,
    vertical_direction: f64,
}

impl<'a> SourceGeometry<'a> {
    fn new(node: &'a Node, pose: &'a Pose) -> Self {
        let direction = pose.viewing_direction();
        Self {
            node,
            pose,
            position: pose.optical_center(),
            direction,
            vertical_direction: spatial::angle_to_plane(&direction, &Vector3::z()),
        }
    }

    fn measure(
        &self,
        candidate: &Node,
        candidate_pose: &Pose,
        motion: Vector3<f64>,
        distance: f64,
    ) -> PotentialEdge {
        let up = Vector3::z();
        let current = &self.direction;
        let direction = candidate_pose.viewing_direction();

        PotentialEdge {
            target_id: candidate.id.clone(),
            distance,
            motion_change: spatial::angle_between_vector2(current.x, current.y, motion.x, motion.y),
            vertical_motion: spatial::angle_to_plane(&motion, &up),
            direction_change: spatial::angle_between_vector2(
                current.x,
                current.y,
                direction.x,
                direction.y,
            ),
            vertical_direction_change: self.vertical_direction
                - spatial::angle_to_plane(&direction, &up),
            rotation: spatial::relative_rotation_angle(
                &self.pose.rotation,
                &candidate_pose.rotation,
            ),
            world_motion_azimuth: spatial::angle_between_vector2(1.0, 0.0, motion.x, motion.y),
            same_sequence: candidate.sequence_id == self.node.sequence_id,
            same_merge_component: same_merge_component(self.node, candidate),
            is_full_panorama: candidate.is_panorama(),
        }
    }
}

/// Unknown components are compatible with anything.
fn same_merge_component(a: &Node, b: &Node) -> bool {
    match (a.merge_component_id(), b.merge_component_id()) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

impl EdgeCalculator {
    /// Measure every usable candidate relative to `node`.
    ///
    /// Fails if `node` lacks full metadata. Returns an empty list when `node`
    /// has no reconstructed pose. Candidates without a pose and the node
    /// itself are skipped, as are candidates beyond `max_distance` unless
    /// their id is in `fallback_ids`. Output follows the input order.
    pub fn get_potential_edges(
        &self,
        node: &Node,
        candidates: &[Node],
        fallback_ids: &[&str],
    ) -> Result<Vec<PotentialEdge>, EdgeError> {
        self.potential_edges_among(node, candidates, fallback_ids)
    }

    /// [`get_potential_edges`](Self::get_potential_edges) over borrowed
    /// candidates, e.g. the result of a spatial filter.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(node = %node.id))
    )]
    pub fn potential_edges_among<'a>(
        &self,
        node: &Node,
        candidates: impl IntoIterator<Item = &'a Node>,
        fallback_ids: &[&str],
    ) -> Result<Vec<PotentialEdge>, EdgeError> {
        ensure_full(node)?;
        let Some(pose) = node.pose() else {
            debug!("node {} has no merged pose, no potential edges", node.id);
            return Ok(Vec::new());
        };

        let source = SourceGeometry::new(node, pose);
        let mut potential_edges = Vec::new();
        let mut candidate_count = 0usize;

        for candidate in candidates {
            candidate_count += 1;
            let Some(candidate_pose) = candidate.pose() else {
                continue;
            };
            if candidate.id == node.id {
                continue;
            }

            let motion = candidate_pose.optical_center() - source.position;
            let distance = motion.norm();
            if distance > self.settings.max_distance
                && !fallback_ids.contains(&candidate.id.as_str())
            {
                trace!("{} -> {}: {distance:.2} m is too far", node.id, candidate.id);
                continue;
            }

            potential_edges.push(source.measure(candidate, candidate_pose, motion, distance));
        }

        debug!(
            "node {}: {} potential edges from {} candidates",
            node.id,
            potential_edges.len(),
            candidate_count
        );
        Ok(potential_edges)
    }
}
