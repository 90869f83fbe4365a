#![warn(missing_docs)]

//! Structural model loader for an LED light sculpture.
//!
//! A model directory holds one text file per concern: metadata, boxes,
//! vertices, lasers, edges, the panel signal-path table, striping
//! instructions and panels. [`ModelBuilder`] reads them in dependency order
//! and assembles an immutable [`Model`] with:
//!
//! - a cross-referenced graph of vertices, edges and panels
//! - pixel positions for every lit edge and striped panel
//! - symmetry groups over edges, discovered from geometry
//! - panel sections and flavors
//! - axis boundaries of the full pixel cloud
//!
//! Any malformed line aborts the load with a [`LoadError`] naming the file
//! and line.
//!
//! # Example
//!
//! ```no_run
//! use lightform_model::{load_model, Section};
//!
//! let model = load_model("resources/vehicle").unwrap();
//! for panel in model.panels_in_section(Section::Fore) {
//!     println!("{} has {} pixels", panel.id, panel.points.len());
//! }
//! ```

pub mod boundary;
pub mod boxes;
mod builder;
pub mod config;
pub mod edge;
pub mod error;
mod general;
pub mod graph;
pub mod laser;
mod model;
pub mod nudge;
pub mod output;
pub mod panel;
pub mod section;
pub mod source;
pub mod striping;
pub mod symmetry;
pub mod vertex;

pub use boundary::Boundaries;
pub use boxes::SculptureBox;
pub use builder::{load_model, ModelBuilder, ModelSource};
pub use config::{FileNames, LoaderConfig};
pub use edge::{Edge, EdgeKind};
pub use error::{LoadError, Location, Result};
pub use graph::{EdgeId, Graph, GroupId, PanelId, VertexId};
pub use laser::{Laser, LaserControl, MovingTarget};
pub use model::Model;
pub use output::{BindingLog, Binding, BoundEntity, ControllerAddress, OutputBinder};
pub use panel::{Flip, Panel};
pub use section::Section;
pub use striping::{Side, StripingInstructions};
pub use symmetry::{SymmetryGroup, SymmetryKey};
pub use vertex::Vertex;
