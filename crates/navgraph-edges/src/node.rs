//! Capture nodes and sequences.

use navgraph_core::Pose;
use serde::{Deserialize, Serialize};

/// How much is known about a node, from least to most.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    /// Identity and location only.
    Core,
    /// Intrinsic/extrinsic metadata is available; edges may be queried.
    Full,
    /// A reconstructed rotation and translation is available.
    Merged,
}

/// Equirectangular projection metadata of a panoramic capture (pixels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanoramaProjection {
    pub full_pano_width: u32,
    pub full_pano_height: u32,
    pub cropped_area_image_width: u32,
    pub cropped_area_image_height: u32,
    pub cropped_area_left: u32,
    pub cropped_area_top: u32,
}

impl PanoramaProjection {
    /// Uncropped equirectangular projection of the given size.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            full_pano_width: width,
            full_pano_height: height,
            cropped_area_image_width: width,
            cropped_area_image_height: height,
            cropped_area_left: 0,
            cropped_area_top: 0,
        }
    }

    /// True when the image covers the whole 360° × 180° sphere.
    pub fn is_full(&self) -> bool {
        self.full_pano_width > 0
            && self.full_pano_height > 0
            && self.cropped_area_left == 0
            && self.cropped_area_top == 0
            && self.cropped_area_image_width == self.full_pano_width
            && self.cropped_area_image_height == self.full_pano_height
    }
}

/// Metadata available once a node is at least [`Completeness::Full`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FullMetadata {
    /// Reconstruction the node was merged into, if known.
    #[serde(default)]
    pub merge_component_id: Option<String>,
    #[serde(default)]
    pub panorama: Option<PanoramaProjection>,
}

/// Node data by completeness level.
///
/// A pose can only exist next to full metadata, so code that needs geometry
/// matches on [`NodeState::Merged`] instead of checking flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "completeness", rename_all = "snake_case")]
pub enum NodeState {
    Core,
    Full(FullMetadata),
    Merged { metadata: FullMetadata, pose: Pose },
}

/// A camera capture in the navigation graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub sequence_id: String,
    pub state: NodeState,
}

impl Node {
    pub fn core(id: impl Into<String>, sequence_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence_id: sequence_id.into(),
            state: NodeState::Core,
        }
    }

    pub fn full(
        id: impl Into<String>,
        sequence_id: impl Into<String>,
        metadata: FullMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            sequence_id: sequence_id.into(),
            state: NodeState::Full(metadata),
        }
    }

    pub fn merged(
        id: impl Into<String>,
        sequence_id: impl Into<String>,
        metadata: FullMetadata,
        pose: Pose,
    ) -> Self {
        Self {
            id: id.into(),
            sequence_id: sequence_id.into(),
            state: NodeState::Merged { metadata, pose },
        }
    }

    pub fn completeness(&self) -> Completeness {
        match self.state {
            NodeState::Core => Completeness::Core,
            NodeState::Full(_) => Completeness::Full,
            NodeState::Merged { .. } => Completeness::Merged,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.completeness() >= Completeness::Full
    }

    #[inline]
    pub fn is_merged(&self) -> bool {
        self.completeness() == Completeness::Merged
    }

    pub fn metadata(&self) -> Option<&FullMetadata> {
        match &self.state {
            NodeState::Core => None,
            NodeState::Full(metadata) | NodeState::Merged { metadata, .. } => Some(metadata),
        }
    }

    pub fn pose(&self) -> Option<&Pose> {
        match &self.state {
            NodeState::Merged { pose, .. } => Some(pose),
            _ => None,
        }
    }

    pub fn merge_component_id(&self) -> Option<&str> {
        self.metadata()?.merge_component_id.as_deref()
    }

    /// True iff the node carries valid full-panorama metadata.
    pub fn is_panorama(&self) -> bool {
        self.metadata()
            .and_then(|m| m.panorama.as_ref())
            .is_some_and(PanoramaProjection::is_full)
    }
}

/// Ordered node ids captured in one continuous sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub node_ids: Vec<String>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, node_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            node_ids,
        }
    }

    fn position(&self, node_id: &str) -> Option<usize> {
        self.node_ids.iter().position(|id| id == node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.position(node_id).is_some()
    }

    /// Id following `node_id`, if any.
    pub fn next_id(&self, node_id: &str) -> Option<&str> {
        let index = self.position(node_id)?;
        self.node_ids.get(index + 1).map(String::as_str)
    }

    /// Id preceding `node_id`, if any.
    pub fn prev_id(&self, node_id: &str) -> Option<&str> {
        let index = self.position(node_id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.node_ids.get(i))
            .map(String::as_str)
    }
}
