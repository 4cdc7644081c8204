//! JSON capture sets: geodetic captures grouped into sequences.

use std::collections::{BTreeMap, HashSet};
use std::{fs, path::Path};

use log::{debug, info};
use navgraph_core::{GeodeticPosition, LocalFrame, Pose};
use navgraph_edges::{Completeness, FullMetadata, Node, PanoramaProjection, Sequence};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum CaptureSetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("capture set has no captures")]
    Empty,
    #[error("duplicate capture id {0}")]
    DuplicateId(String),
    #[error("merged capture {0} has no rotation")]
    MissingRotation(String),
    #[error("duplicate sequence id {0}")]
    DuplicateSequence(String),
    #[error("sequence {sequence} lists capture {capture} more than once")]
    RepeatedSequenceMember { sequence: String, capture: String },
    #[error("sequence {sequence} lists unknown capture {capture}")]
    UnknownSequenceMember { sequence: String, capture: String },
    #[error("sequence {sequence} lists capture {capture} of sequence {capture_sequence}")]
    ForeignSequenceMember {
        sequence: String,
        capture: String,
        capture_sequence: String,
    },
}

/// One capture as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub id: String,
    pub sequence_id: String,
    pub completeness: Completeness,
    pub position: GeodeticPosition,
    /// Angle-axis world→camera rotation in the capture set's local ENU frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_component_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panorama: Option<PanoramaProjection>,
}

/// Captures plus their sequences, as read from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureSet {
    /// Origin of the local ENU frame; the first capture's position if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<GeodeticPosition>,
    #[serde(default)]
    pub sequences: Vec<Sequence>,
    pub captures: Vec<CaptureRecord>,
}

/// Validated capture set with nodes expressed in one local frame.
#[derive(Clone, Debug)]
pub struct GraphInput {
    pub frame: LocalFrame,
    pub nodes: Vec<Node>,
    /// Geodetic position of `nodes[i]`.
    pub positions: Vec<GeodeticPosition>,
    pub sequences: BTreeMap<String, Sequence>,
}

impl GraphInput {
    /// The sequence `node_id` belongs to.
    pub fn sequence_of(&self, node: &Node) -> Option<&Sequence> {
        self.sequences.get(&node.sequence_id)
    }
}

impl CaptureSet {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CaptureSetError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CaptureSetError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Validate the set and convert captures to nodes in a shared ENU frame.
    ///
    /// Captures of a sequence that is not listed are ordered as they appear
    /// in `captures`.
    pub fn into_graph_input(self) -> Result<GraphInput, CaptureSetError> {
        let first = self.captures.first().ok_or(CaptureSetError::Empty)?;
        let frame = LocalFrame::new(self.reference.unwrap_or(first.position));

        let mut capture_sequences: BTreeMap<&str, &str> = BTreeMap::new();
        for capture in &self.captures {
            if capture_sequences
                .insert(&capture.id, &capture.sequence_id)
                .is_some()
            {
                return Err(CaptureSetError::DuplicateId(capture.id.clone()));
            }
        }

        let mut sequences: BTreeMap<String, Sequence> = BTreeMap::new();
        for sequence in &self.sequences {
            if sequences.contains_key(&sequence.id) {
                return Err(CaptureSetError::DuplicateSequence(sequence.id.clone()));
            }
            let mut members: HashSet<&str> = HashSet::with_capacity(sequence.node_ids.len());
            for member in &sequence.node_ids {
                if !members.insert(member.as_str()) {
                    return Err(CaptureSetError::RepeatedSequenceMember {
                        sequence: sequence.id.clone(),
                        capture: member.clone(),
                    });
                }
                match capture_sequences.get(member.as_str()) {
                    None => {
                        return Err(CaptureSetError::UnknownSequenceMember {
                            sequence: sequence.id.clone(),
                            capture: member.clone(),
                        })
                    }
                    Some(&own) if own != sequence.id => {
                        return Err(CaptureSetError::ForeignSequenceMember {
                            sequence: sequence.id.clone(),
                            capture: member.clone(),
                            capture_sequence: own.to_owned(),
                        })
                    }
                    Some(_) => {}
                }
            }
            sequences.insert(sequence.id.clone(), sequence.clone());
        }

        let listed: HashSet<String> = sequences.keys().cloned().collect();
        let mut nodes = Vec::with_capacity(self.captures.len());
        let mut positions = Vec::with_capacity(self.captures.len());
        for capture in self.captures {
            if !listed.contains(&capture.sequence_id) {
                sequences
                    .entry(capture.sequence_id.clone())
                    .or_insert_with(|| Sequence::new(capture.sequence_id.clone(), Vec::new()))
                    .node_ids
                    .push(capture.id.clone());
            }
            positions.push(capture.position);
            nodes.push(capture.into_node(&frame)?);
        }

        info!(
            "capture set: {} captures in {} sequences",
            nodes.len(),
            sequences.len()
        );
        Ok(GraphInput {
            frame,
            nodes,
            positions,
            sequences,
        })
    }
}

impl CaptureRecord {
    fn into_node(self, frame: &LocalFrame) -> Result<Node, CaptureSetError> {
        let metadata = FullMetadata {
            merge_component_id: self.merge_component_id,
            panorama: self.panorama,
        };
        let node = match self.completeness {
            Completeness::Core => Node::core(self.id, self.sequence_id),
            Completeness::Full => Node::full(self.id, self.sequence_id, metadata),
            Completeness::Merged => {
                let rotation = self
                    .rotation
                    .ok_or_else(|| CaptureSetError::MissingRotation(self.id.clone()))?;
                let pose = Pose::from_geodetic(rotation.into(), self.position, frame);
                debug!("{}: optical center {:?}", self.id, pose.optical_center());
                Node::merged(self.id, self.sequence_id, metadata, pose)
            }
        };
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn record(id: &str, sequence_id: &str, lat: f64) -> CaptureRecord {
        CaptureRecord {
            id: id.into(),
            sequence_id: sequence_id.into(),
            completeness: Completeness::Merged,
            position: GeodeticPosition::new(lat, 10.0, 30.0),
            rotation: Some([0.0, -std::f64::consts::FRAC_PI_2, 0.0]),
            merge_component_id: None,
            panorama: None,
        }
    }

    fn set(captures: Vec<CaptureRecord>) -> CaptureSet {
        CaptureSet {
            reference: None,
            sequences: Vec::new(),
            captures,
        }
    }

    #[test]
    fn first_capture_is_the_default_reference() {
        let input = set(vec![record("a", "s", 50.0), record("b", "s", 50.0001)])
            .into_graph_input()
            .unwrap();
        let center = input.nodes[0].pose().unwrap().optical_center();
        assert_abs_diff_eq!(center.norm(), 0.0, epsilon = 1e-8);
        let north = input.nodes[1].pose().unwrap().optical_center();
        assert!(north.y > 11.0 && north.y < 11.2, "{north:?}");
    }

    #[test]
    fn unlisted_sequences_follow_capture_order() {
        let input = set(vec![
            record("b", "s", 50.0),
            record("x", "t", 50.0),
            record("a", "s", 50.0),
        ])
        .into_graph_input()
        .unwrap();
        assert_eq!(input.sequences["s"].node_ids, ["b", "a"]);
        assert_eq!(input.sequences["t"].node_ids, ["x"]);
        assert_eq!(input.sequence_of(&input.nodes[1]).unwrap().id, "t");
    }

    #[test]
    fn rejects_invalid_sets() {
        assert!(matches!(
            set(Vec::new()).into_graph_input(),
            Err(CaptureSetError::Empty)
        ));

        let duplicate = set(vec![record("a", "s", 50.0), record("a", "s", 50.0)]);
        assert!(matches!(
            duplicate.into_graph_input(),
            Err(CaptureSetError::DuplicateId(id)) if id == "a"
        ));

        let mut unrotated = record("a", "s", 50.0);
        unrotated.rotation = None;
        assert!(matches!(
            set(vec![unrotated]).into_graph_input(),
            Err(CaptureSetError::MissingRotation(_))
        ));

        let mut unknown = set(vec![record("a", "s", 50.0)]);
        unknown.sequences = vec![Sequence::new("s", vec!["a".into(), "ghost".into()])];
        assert!(matches!(
            unknown.into_graph_input(),
            Err(CaptureSetError::UnknownSequenceMember { .. })
        ));

        let mut twice = set(vec![record("a", "s", 50.0), record("b", "s", 50.0)]);
        twice.sequences = vec![
            Sequence::new("s", vec!["a".into()]),
            Sequence::new("s", vec!["b".into()]),
        ];
        assert!(matches!(
            twice.into_graph_input(),
            Err(CaptureSetError::DuplicateSequence(id)) if id == "s"
        ));

        let mut repeated = set(vec![record("a", "s", 50.0), record("b", "s", 50.0)]);
        repeated.sequences = vec![Sequence::new("s", vec!["a".into(), "b".into(), "a".into()])];
        let err = repeated.into_graph_input().unwrap_err();
        assert_eq!(err.to_string(), "sequence s lists capture a more than once");

        let mut foreign = set(vec![record("a", "s", 50.0), record("b", "t", 50.0)]);
        foreign.sequences = vec![Sequence::new("s", vec!["a".into(), "b".into()])];
        assert!(matches!(
            foreign.into_graph_input(),
            Err(CaptureSetError::ForeignSequenceMember { .. })
        ));
    }

    #[test]
    fn parses_minimal_json() {
        let json = r#"{
            "captures": [
                {"id": "a", "sequence_id": "s", "completeness": "core",
                 "position": {"lat": 1.0, "lon": 2.0, "alt": 3.0}},
                {"id": "b", "sequence_id": "s", "completeness": "full",
                 "position": {"lat": 1.0, "lon": 2.0, "alt": 3.0},
                 "merge_component_id": "m"}
            ]
        }"#;
        let set: CaptureSet = serde_json::from_str(json).unwrap();
        let input = set.into_graph_input().unwrap();
        assert_eq!(input.nodes[0].completeness(), Completeness::Core);
        assert_eq!(input.nodes[1].merge_component_id(), Some("m"));
        assert_eq!(input.frame.reference(), GeodeticPosition::new(1.0, 2.0, 3.0));
    }
}
