//! Navigation edges between oriented camera captures.
//!
//! Nodes carry a [`NodeState`] that grows from identity only (`Core`), to
//! metadata (`Full`), to a reconstructed pose in a shared ENU frame
//! (`Merged`). [`EdgeCalculator`] measures candidates around a node and
//! classifies them into step, turn and panorama edges; sequence order adds
//! next/prev edges.
//!
//! ```
//! use navgraph_edges::{
//!     Direction, EdgeCalculator, EdgeCalculatorSettings, FullMetadata, Node, Sequence,
//! };
//!
//! let calculator = EdgeCalculator::new(EdgeCalculatorSettings::default())?;
//! let sequence = Sequence::new("seq", vec!["a".into(), "b".into()]);
//! let node = Node::full("a", "seq", FullMetadata::default());
//!
//! let edges = calculator.compute_edges(&node, &sequence, &[])?;
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges[0].direction, Direction::Next);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod calculator;
mod edge;
mod error;
mod io;
mod node;
mod settings;

pub use calculator::{EdgeCalculator, PotentialEdge};
pub use edge::{Direction, Edge};
pub use error::{EdgeError, SettingsError};
pub use io::SettingsIoError;
pub use node::{Completeness, FullMetadata, Node, NodeState, PanoramaProjection, Sequence};
pub use settings::{EdgeCalculatorSettings, PanoramaSettings, StepSettings, TurnSettings};
