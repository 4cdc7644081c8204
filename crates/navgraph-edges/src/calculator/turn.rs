use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use navgraph_core::spatial::angle_difference;

use super::{penalty, EdgeCalculator, PotentialEdge};
use crate::edge::{Direction, Edge};

#[derive(Clone, Copy, Debug)]
struct TurnDirection {
    direction: Direction,
    /// Ideal viewing direction change.
    direction_change: f64,
    /// Preferred motion angle while turning (cutting the corner).
    motion_change: f64,
}

const TURN_DIRECTIONS: [TurnDirection; 2] = [
    TurnDirection {
        direction: Direction::TurnLeft,
        direction_change: FRAC_PI_2,
        motion_change: FRAC_PI_4,
    },
    TurnDirection {
        direction: Direction::TurnRight,
        direction_change: -FRAC_PI_2,
        motion_change: -FRAC_PI_4,
    },
];

impl EdgeCalculator {
    /// Pick at most one target per turn direction.
    ///
    /// Close rig captures turned partway towards the turn always outrank
    /// ordinary candidates. Full panoramas are never turn targets.
    pub fn compute_turn_edges(&self, potential_edges: &[PotentialEdge]) -> Vec<Edge> {
        TURN_DIRECTIONS
            .iter()
            .filter_map(|turn| self.turn_edge(turn, potential_edges))
            .collect()
    }

    fn turn_edge(&self, turn: &TurnDirection, potential_edges: &[PotentialEdge]) -> Option<Edge> {
        let settings = &self.settings.turn;
        let mut best: Option<(&PotentialEdge, f64)> = None;

        for potential in potential_edges {
            if potential.is_full_panorama || potential.distance > settings.max_distance {
                continue;
            }

            let direction_difference =
                angle_difference(turn.direction_change, potential.direction_change);

            let rig = potential.distance < settings.max_rig_distance
                && potential.direction_change.abs() > settings.min_rig_direction_change
                && potential.direction_change.signum() == turn.direction_change.signum()
                && potential.direction_change.abs() < turn.direction_change.abs();

            let score = if rig {
                direction_difference.abs() - FRAC_PI_2
            } else if direction_difference.abs() <= settings.max_direction_change {
                let motion_difference =
                    angle_difference(turn.motion_change, potential.motion_change);
                potential.distance / settings.max_distance
                    + motion_difference.abs() / PI
                    + penalty(!potential.same_sequence)
                    + penalty(!potential.same_merge_component)
            } else {
                continue;
            };

            if best.is_none_or(|(_, lowest)| score < lowest) {
                best = Some((potential, score));
            }
        }

        best.map(|(potential, _)| {
            Edge::new(potential.target_id.clone(), turn.direction)
                .with_azimuth(potential.world_motion_azimuth)
        })
    }
}
