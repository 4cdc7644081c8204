use std::f64::consts::{FRAC_PI_2, PI};

use log::trace;
use navgraph_core::spatial::angle_difference;

use super::{penalty, EdgeCalculator, PotentialEdge};
use crate::edge::{Direction, Edge};

#[derive(Clone, Copy, Debug)]
struct StepDirection {
    direction: Direction,
    /// Ideal motion angle relative to the source viewing direction.
    motion_change: f64,
    /// Whether a sequence neighbour may stand in when nothing scores.
    use_fallback: bool,
}

const STEP_DIRECTIONS: [StepDirection; 4] = [
    StepDirection {
        direction: Direction::StepForward,
        motion_change: 0.0,
        use_fallback: true,
    },
    StepDirection {
        direction: Direction::StepBackward,
        motion_change: PI,
        use_fallback: true,
    },
    StepDirection {
        direction: Direction::StepLeft,
        motion_change: FRAC_PI_2,
        use_fallback: false,
    },
    StepDirection {
        direction: Direction::StepRight,
        motion_change: -FRAC_PI_2,
        use_fallback: false,
    },
];

impl EdgeCalculator {
    /// Pick at most one target per step direction.
    ///
    /// Within the direction-change and drift limits the lowest score wins,
    /// the first candidate on ties. Forward and backward fall back to the
    /// sequence neighbour `prev_id`/`next_id` when no candidate is close
    /// enough to be scored.
    pub fn compute_step_edges(
        &self,
        potential_edges: &[PotentialEdge],
        prev_id: Option<&str>,
        next_id: Option<&str>,
    ) -> Vec<Edge> {
        STEP_DIRECTIONS
            .iter()
            .filter_map(|step| self.step_edge(step, potential_edges, prev_id, next_id))
            .collect()
    }

    fn step_edge(
        &self,
        step: &StepDirection,
        potential_edges: &[PotentialEdge],
        prev_id: Option<&str>,
        next_id: Option<&str>,
    ) -> Option<Edge> {
        let max_distance = self.settings.max_distance;
        let limits = &self.settings.step;

        let is_neighbour = |id: &str| prev_id == Some(id) || next_id == Some(id);

        let mut fallback: Option<&PotentialEdge> = None;
        let mut best: Option<(&PotentialEdge, f64)> = None;

        for potential in potential_edges {
            if potential.direction_change.abs() > limits.max_direction_change {
                continue;
            }

            let motion_difference = angle_difference(step.motion_change, potential.motion_change);
            let direction_motion_difference =
                angle_difference(potential.direction_change, motion_difference);
            let drift = motion_difference.abs().max(direction_motion_difference.abs());
            if drift > limits.max_drift {
                continue;
            }

            // Captured before the distance cut: a far neighbour still counts.
            if step.use_fallback && is_neighbour(&potential.target_id) {
                fallback = Some(potential);
            }

            if potential.distance > max_distance {
                continue;
            }

            let combined_motion_difference = motion_difference.hypot(potential.vertical_motion);
            let score = 2.0 * potential.distance / max_distance
                + 2.0 * combined_motion_difference / limits.max_drift
                + 2.0 * potential.rotation / limits.max_direction_change
                + 2.0 * penalty(potential.same_sequence)
                + 2.0 * penalty(potential.same_merge_component);

            trace!(
                "{:?} -> {}: drift {drift:.3}, score {score:.3}",
                step.direction,
                potential.target_id
            );
            if best.is_none_or(|(_, lowest)| score < lowest) {
                best = Some((potential, score));
            }
        }

        best.map(|(potential, _)| potential)
            .or(fallback)
            .map(|potential| {
                Edge::new(potential.target_id.clone(), step.direction)
                    .with_azimuth(potential.world_motion_azimuth)
            })
    }
}
