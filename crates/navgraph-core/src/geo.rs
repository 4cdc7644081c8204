//! WGS84 geodetic, Earth-Centered Earth-Fixed (ECEF) and local
//! East-North-Up (ENU) coordinate conversions.
//!
//! Geodetic positions are in degrees (latitude, longitude) and meters
//! (altitude above the ellipsoid). ECEF and ENU values share the same
//! `Vector3<f64>` representation in meters; which frame a vector lives in is
//! decided by the conversion that produced it.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = 6_356_752.314_245_18;

const A2: f64 = WGS84_A * WGS84_A;
const B2: f64 = WGS84_B * WGS84_B;
/// First eccentricity squared.
const E2: f64 = (A2 - B2) / A2;
/// Second eccentricity squared.
const EP2: f64 = (A2 - B2) / B2;

const MAX_LATITUDE_ITERATIONS: usize = 8;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-14;

/// Geodetic position on the WGS84 ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Altitude above the ellipsoid in meters.
    pub alt: f64,
}

impl GeodeticPosition {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }
}

/// Convert a geodetic position to ECEF coordinates.
pub fn geodetic_to_ecef(position: GeodeticPosition) -> Vector3<f64> {
    let (sin_lat, cos_lat) = position.lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = position.lon.to_radians().sin_cos();

    // Radius of curvature in the prime vertical.
    let n = WGS84_A / (1.0 - E2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + position.alt) * cos_lat * cos_lon,
        (n + position.alt) * cos_lat * sin_lon,
        (n * (1.0 - E2) + position.alt) * sin_lat,
    )
}

/// Convert ECEF coordinates back to a geodetic position.
///
/// Bowring's formula gives the starting latitude, which is then refined by
/// fixed-point iteration until it stops moving. Altitude uses
/// `p·cosφ + z·sinφ − a²/N`, which stays well conditioned at the poles.
pub fn ecef_to_geodetic(ecef: Vector3<f64>) -> GeodeticPosition {
    let (x, y, z) = (ecef.x, ecef.y, ecef.z);
    let p = x.hypot(y);
    let lon = y.atan2(x);

    let theta = (z * WGS84_A).atan2(p * WGS84_B);
    let (sin_theta, cos_theta) = theta.sin_cos();
    let mut lat = (z + EP2 * WGS84_B * sin_theta.powi(3))
        .atan2(p - E2 * WGS84_A * cos_theta.powi(3));

    for _ in 0..MAX_LATITUDE_ITERATIONS {
        let n = prime_vertical_radius(lat);
        let alt = ellipsoidal_height(p, z, lat, n);
        let next = z.atan2(p * (1.0 - E2 * n / (n + alt)));
        let delta = (next - lat).abs();
        lat = next;
        if delta < LATITUDE_TOLERANCE_RAD {
            break;
        }
    }

    let alt = ellipsoidal_height(p, z, lat, prime_vertical_radius(lat));
    GeodeticPosition::new(lat.to_degrees(), lon.to_degrees(), alt)
}

fn prime_vertical_radius(lat_rad: f64) -> f64 {
    let sin_lat = lat_rad.sin();
    WGS84_A / (1.0 - E2 * sin_lat * sin_lat).sqrt()
}

fn ellipsoidal_height(p: f64, z: f64, lat_rad: f64, n: f64) -> f64 {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    p * cos_lat + z * sin_lat - A2 / n
}

/// Local East-North-Up tangent plane anchored at a reference position.
///
/// The reference ECEF origin and the ECEF→ENU rotation are computed once,
/// so converting many captures into one shared frame is cheap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    reference: GeodeticPosition,
    origin: Vector3<f64>,
    /// Rows are the local east, north and up unit vectors in ECEF.
    ecef_to_enu: Matrix3<f64>,
}

impl LocalFrame {
    pub fn new(reference: GeodeticPosition) -> Self {
        let (sin_lat, cos_lat) = reference.lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = reference.lon.to_radians().sin_cos();

        #[rustfmt::skip]
        let ecef_to_enu = Matrix3::new(
            -sin_lon,           cos_lon,            0.0,
            -sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat,
            cos_lat * cos_lon,  cos_lat * sin_lon,  sin_lat,
        );

        Self {
            reference,
            origin: geodetic_to_ecef(reference),
            ecef_to_enu,
        }
    }

    #[inline]
    pub fn reference(&self) -> GeodeticPosition {
        self.reference
    }

    /// ECEF coordinates of the frame origin.
    #[inline]
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    #[inline]
    pub fn ecef_to_enu(&self, ecef: Vector3<f64>) -> Vector3<f64> {
        self.ecef_to_enu * (ecef - self.origin)
    }

    #[inline]
    pub fn enu_to_ecef(&self, enu: Vector3<f64>) -> Vector3<f64> {
        self.ecef_to_enu.transpose() * enu + self.origin
    }

    pub fn geodetic_to_enu(&self, position: GeodeticPosition) -> Vector3<f64> {
        self.ecef_to_enu(geodetic_to_ecef(position))
    }

    pub fn enu_to_geodetic(&self, enu: Vector3<f64>) -> GeodeticPosition {
        ecef_to_geodetic(self.enu_to_ecef(enu))
    }
}

/// Convert ECEF coordinates into the ENU frame anchored at `reference`.
pub fn ecef_to_enu(ecef: Vector3<f64>, reference: GeodeticPosition) -> Vector3<f64> {
    LocalFrame::new(reference).ecef_to_enu(ecef)
}

/// Convert ENU coordinates anchored at `reference` back to ECEF.
pub fn enu_to_ecef(enu: Vector3<f64>, reference: GeodeticPosition) -> Vector3<f64> {
    LocalFrame::new(reference).enu_to_ecef(enu)
}

pub fn geodetic_to_enu(position: GeodeticPosition, reference: GeodeticPosition) -> Vector3<f64> {
    LocalFrame::new(reference).geodetic_to_enu(position)
}

pub fn enu_to_geodetic(enu: Vector3<f64>, reference: GeodeticPosition) -> GeodeticPosition {
    LocalFrame::new(reference).enu_to_geodetic(enu)
}
