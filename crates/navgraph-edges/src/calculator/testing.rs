//! Builders shared by the calculator unit tests.

use nalgebra::{Rotation3, Vector3};
use navgraph_core::Pose;
use std::f64::consts::FRAC_PI_2;

use super::{EdgeCalculator, PotentialEdge};
use crate::node::{FullMetadata, Node};
use crate::settings::EdgeCalculatorSettings;

pub(crate) fn calculator() -> EdgeCalculator {
    EdgeCalculator::new(EdgeCalculatorSettings::default()).unwrap()
}

/// Angle-axis rotation of a level camera looking `yaw` radians
/// counter-clockwise from east.
pub(crate) fn facing(yaw: f64) -> Vector3<f64> {
    facing_pitched(yaw, 0.0)
}

/// Like [`facing`], with the view raised `pitch` radians above the horizon.
pub(crate) fn facing_pitched(yaw: f64, pitch: f64) -> Vector3<f64> {
    let east = Rotation3::new(Vector3::new(0.0, -FRAC_PI_2, 0.0));
    let raise = Rotation3::from_axis_angle(&Vector3::y_axis(), pitch);
    (east * raise * Rotation3::from_axis_angle(&Vector3::z_axis(), -yaw)).scaled_axis()
}

pub(crate) fn merged_in(
    id: &str,
    sequence_id: &str,
    merge_component_id: Option<&str>,
    center: [f64; 3],
    yaw: f64,
) -> Node {
    let metadata = FullMetadata {
        merge_component_id: merge_component_id.map(str::to_owned),
        panorama: None,
    };
    let pose = Pose::from_optical_center(facing(yaw), Vector3::from(center));
    Node::merged(id, sequence_id, metadata, pose)
}

pub(crate) fn merged(id: &str, sequence_id: &str, center: [f64; 3], yaw: f64) -> Node {
    merged_in(id, sequence_id, None, center, yaw)
}

/// Level potential edge in another sequence and merge component.
pub(crate) fn potential(
    id: &str,
    distance: f64,
    motion_change: f64,
    direction_change: f64,
) -> PotentialEdge {
    PotentialEdge {
        target_id: id.to_owned(),
        distance,
        motion_change,
        vertical_motion: 0.0,
        direction_change,
        vertical_direction_change: 0.0,
        rotation: direction_change.abs(),
        world_motion_azimuth: motion_change,
        same_sequence: false,
        same_merge_component: false,
        is_full_panorama: false,
    }
}
