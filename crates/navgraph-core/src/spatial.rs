//! Vector and rotation helpers used to extract navigation features from
//! camera poses.
//!
//! Rotations are angle-axis vectors: the direction is the rotation axis and
//! the norm is the angle in radians. Camera rotations map world (ENU) vectors
//! into the camera frame, whose optical axis is `+Z`.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Matrix3, Vector3};

/// Mean Earth radius used by [`distance_from_lat_lon`] (meters).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Below this norm a vector is treated as zero length.
const EPSILON: f64 = 1e-12;

/// Rotation matrix of an angle-axis vector (Rodrigues' formula).
///
/// A zero angle yields the identity.
pub fn rotation_matrix(angle_axis: &Vector3<f64>) -> Matrix3<f64> {
    let angle = angle_axis.norm();
    if angle < EPSILON {
        return Matrix3::identity();
    }

    let k = angle_axis / angle;
    #[rustfmt::skip]
    let cross = Matrix3::new(
        0.0, -k.z, k.y,
        k.z, 0.0, -k.x,
        -k.y, k.x, 0.0,
    );

    Matrix3::identity() + cross * angle.sin() + cross * cross * (1.0 - angle.cos())
}

/// Rotate `vector` by the angle-axis rotation.
pub fn rotate(vector: &Vector3<f64>, angle_axis: &Vector3<f64>) -> Vector3<f64> {
    rotation_matrix(angle_axis) * vector
}

/// Camera center `C = −Rᵀ·t` in the world frame.
pub fn optical_center(rotation: &Vector3<f64>, translation: &Vector3<f64>) -> Vector3<f64> {
    -(rotation_matrix(rotation).transpose() * translation)
}

/// Camera optical axis `Rᵀ·(0, 0, 1)` expressed in the world frame.
pub fn viewing_direction(rotation: &Vector3<f64>) -> Vector3<f64> {
    rotation_matrix(rotation).transpose() * Vector3::z()
}

/// Signed angle from `(x1, y1)` to `(x2, y2)`, in `(−π, π]`.
///
/// Positive angles are counter-clockwise.
pub fn angle_between_vector2(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let cross = x1 * y2 - y1 * x2;
    let dot = x1 * x2 + y1 * y2;
    cross.atan2(dot)
}

/// Signed shortest angular difference going from `angle1` to `angle2`.
pub fn angle_difference(angle1: f64, angle2: f64) -> f64 {
    wrap_angle(angle2 - angle1)
}

/// Angle of the rotation taking orientation `rotation1` to `rotation2`.
///
/// Always non-negative and symmetric in its arguments.
pub fn relative_rotation_angle(rotation1: &Vector3<f64>, rotation2: &Vector3<f64>) -> f64 {
    let relative = rotation_matrix(rotation2) * rotation_matrix(rotation1).transpose();
    clamp((relative.trace() - 1.0) / 2.0, -1.0, 1.0).acos()
}

/// Signed angle between `vector` and the plane with normal `normal`.
///
/// Zero-length vectors lie in every plane and yield `0`.
pub fn angle_to_plane(vector: &Vector3<f64>, normal: &Vector3<f64>) -> f64 {
    let norm = vector.norm();
    let normal_norm = normal.norm();
    if norm < EPSILON || normal_norm < EPSILON {
        return 0.0;
    }

    clamp(vector.dot(normal) / (norm * normal_norm), -1.0, 1.0).asin()
}

/// Convert a counter-clockwise angle from the east axis to a compass bearing
/// (clockwise from north), wrapped to `[−π, π)`.
pub fn azimuthal_to_bearing(angle: f64) -> f64 {
    wrap_angle(FRAC_PI_2 - angle)
}

const WRAP_REDUCE_INTERVALS: f64 = 64.0;

/// Wrap `value` into `[min, max)` by repeatedly shifting it by the interval
/// width.
///
/// Non-finite values and empty intervals (`max <= min`) return `value`
/// unchanged.
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || !(max > min) {
        return value;
    }

    let interval = max - min;
    let mut wrapped = value;
    // Far outside the interval a single shift is lost to rounding.
    if (value - min).abs() > WRAP_REDUCE_INTERVALS * interval {
        wrapped = min + (value - min).rem_euclid(interval);
    }
    while wrapped >= max {
        wrapped -= interval;
    }
    while wrapped < min {
        wrapped += interval;
    }
    wrapped
}

/// Wrap an angle into `[−π, π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    wrap(angle, -PI, PI)
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Approximate ground distance in meters between two nearby geodetic
/// positions (degrees).
///
/// Uses an equirectangular projection at the mean latitude. Good to a few
/// percent up to a few kilometers; not a great-circle distance, so do not
/// use it for long ranges.
pub fn distance_from_lat_lon(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let mean_lat = deg_to_rad((lat1 + lat2) / 2.0);
    let x = deg_to_rad(lon2 - lon1) * mean_lat.cos();
    let y = deg_to_rad(lat2 - lat1);
    EARTH_RADIUS_M * x.hypot(y)
}
