use crate::node::Completeness;

/// Caller contract violations when querying edges.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EdgeError {
    #[error("node {id} needs full metadata to be queried (completeness: {completeness:?})")]
    NodeNotFull {
        id: String,
        completeness: Completeness,
    },
    #[error("node {node_id} belongs to sequence {node_sequence}, not {sequence}")]
    SequenceMismatch {
        node_id: String,
        node_sequence: String,
        sequence: String,
    },
}

/// Settings validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be finite and > 0 (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite and >= 0 (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("panorama.min_distance ({min}) exceeds panorama.max_distance ({max})")]
    PanoramaDistanceRange { min: f64, max: f64 },
}
