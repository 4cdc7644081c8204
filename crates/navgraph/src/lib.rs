//! High-level facade for the `navgraph-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry ([`core`]) and edge ([`edges`]) crates
//! - JSON capture sets with geodetic positions ([`CaptureSet`])
//! - whole-graph construction over a capture set ([`build_navigation_graph`])
//! - the `navgraph` command line tool (feature `cli`)
//!
//! ## Quickstart
//!
//! ```no_run
//! use navgraph::{build_navigation_graph, CaptureSet, EdgeCalculator, EdgeCalculatorSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = CaptureSet::load_json("captures.json")?.into_graph_input()?;
//! let calculator = EdgeCalculator::new(EdgeCalculatorSettings::default())?;
//! let graph = build_navigation_graph(&input, &calculator, 50.0)?;
//! println!("{}", serde_json::to_string_pretty(&graph)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `navgraph::core`: WGS84 conversions, local ENU frames, rotations, poses.
//! - `navgraph::edges`: nodes, sequences and the edge calculator.

pub use navgraph_core as core;
pub use navgraph_edges as edges;

mod capture_set;
mod graph;

pub use capture_set::{CaptureRecord, CaptureSet, CaptureSetError, GraphInput};
pub use graph::{build_navigation_graph, NavigationGraph};

pub use navgraph_core::{GeodeticPosition, LocalFrame, Pose};
pub use navgraph_edges::{
    Direction, Edge, EdgeCalculator, EdgeCalculatorSettings, EdgeError, Node, Sequence,
};
