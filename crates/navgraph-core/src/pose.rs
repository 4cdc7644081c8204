use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geo::{GeodeticPosition, LocalFrame};
use crate::spatial;

/// Camera extrinsics in a shared local ENU frame.
///
/// `rotation` is an angle-axis vector for the world→camera rotation `R`, and
/// `translation` is `t` such that the optical center is `C = −Rᵀ·t`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub rotation: Vector3<f64>,
    pub translation: Vector3<f64>,
}

impl Pose {
    pub fn new(rotation: Vector3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build a pose from a rotation and a known optical center (`t = −R·C`).
    pub fn from_optical_center(rotation: Vector3<f64>, center: Vector3<f64>) -> Self {
        let translation = -(spatial::rotation_matrix(&rotation) * center);
        Self::new(rotation, translation)
    }

    /// Build a pose for a camera at a geodetic position, expressed in `frame`.
    pub fn from_geodetic(
        rotation: Vector3<f64>,
        position: GeodeticPosition,
        frame: &LocalFrame,
    ) -> Self {
        Self::from_optical_center(rotation, frame.geodetic_to_enu(position))
    }

    #[inline]
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        spatial::rotation_matrix(&self.rotation)
    }

    #[inline]
    pub fn optical_center(&self) -> Vector3<f64> {
        spatial::optical_center(&self.rotation, &self.translation)
    }

    #[inline]
    pub fn viewing_direction(&self) -> Vector3<f64> {
        spatial::viewing_direction(&self.rotation)
    }
}
