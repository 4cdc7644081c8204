//! Geometry for building street-level navigation graphs.
//!
//! This crate is purely geometric: WGS84 geodetic/ECEF/ENU conversions
//! ([`geo`]), rotation and angle helpers ([`spatial`]) and camera poses in a
//! shared local frame ([`Pose`]). Nothing here allocates state or performs
//! I/O apart from the optional logger.
//!
//! ```
//! use navgraph_core::{geo, GeodeticPosition};
//!
//! let reference = GeodeticPosition::new(55.6050, 13.0038, 12.0);
//! let target = GeodeticPosition::new(55.6051, 13.0038, 12.0);
//! let enu = geo::geodetic_to_enu(target, reference);
//! assert!(enu.y > 11.0 && enu.y < 11.2);
//! ```

pub mod geo;
mod logger;
mod pose;
pub mod spatial;

pub use geo::{GeodeticPosition, LocalFrame};
pub use pose::Pose;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
