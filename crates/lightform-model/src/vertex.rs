//! Vertex catalog: `id x y z` rows.

use lightform_math::{point_from_microns, Point3};

use crate::error::Result;
use crate::graph::{EdgeId, Graph};
use crate::source::SourceFile;

/// A named point anchoring one or more edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// External id from the vertex file.
    pub id: i32,
    /// Position in microns.
    pub point: Point3,
    /// Incident edges, in load order.
    pub edges: Vec<EdgeId>,
}

impl Vertex {
    /// Create a vertex with no incident edges.
    pub fn new(id: i32, point: Point3) -> Self {
        Self {
            id,
            point,
            edges: Vec::new(),
        }
    }
}

/// Load every vertex row into `graph`.
///
/// A repeated id replaces the earlier record.
pub fn load_vertexes(graph: &mut Graph, file: &SourceFile) -> Result<()> {
    for line in file.lines() {
        let fields = line.tab_fields(4)?;
        let id = line.int(fields[0])?;
        let point = point_from_microns(
            line.int(fields[1])?,
            line.int(fields[2])?,
            line.int(fields[3])?,
        );
        let (_, replaced) = graph.upsert_vertex(Vertex::new(id, point));
        if replaced {
            log::warn!("{}: duplicate vertex id {id}, keeping the later record", line.location());
        }
    }
    Ok(())
}
