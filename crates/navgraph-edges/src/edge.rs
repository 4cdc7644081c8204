use serde::{Deserialize, Serialize};

/// Navigation direction of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
    StepForward,
    StepBackward,
    StepLeft,
    StepRight,
    TurnLeft,
    TurnRight,
    Panorama,
}

/// Directed edge from a source node (implicit) to `target_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target_id: String,
    pub direction: Direction,
    /// Horizontal motion angle from the frame's east axis, for geometric edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_motion_azimuth: Option<f64>,
}

impl Edge {
    pub fn new(target_id: impl Into<String>, direction: Direction) -> Self {
        Self {
            target_id: target_id.into(),
            direction,
            world_motion_azimuth: None,
        }
    }

    pub fn with_azimuth(mut self, world_motion_azimuth: f64) -> Self {
        self.world_motion_azimuth = Some(world_motion_azimuth);
        self
    }
}
