//! Edge graph: LED strips between vertex pairs.
//!
//! Each row of the edge file is `"<v0>-<v1>"`, a kind and a controller
//! spec, tab-separated.

use std::collections::HashMap;
use std::ops::Range;

use lightform_math::{lerp, midpoint, Point3};
use serde::Serialize;

use crate::config::LoaderConfig;
use crate::error::{LoadError, Location, Result};
use crate::graph::{GroupId, Graph, PanelId, VertexId};
use crate::output::{BoundEntity, ControllerAddress, OutputBinder, UNCONTROLLED};
use crate::source::SourceFile;

/// How an edge strip is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeKind {
    /// Lit, wired from the lower vertex id to the higher.
    Default,
    /// Lit, wired from the higher vertex id to the lower.
    Reversed,
    /// No pixels.
    Dark,
}

impl EdgeKind {
    /// Decode an edge kind token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "default" => Some(EdgeKind::Default),
            "reversed" => Some(EdgeKind::Reversed),
            "dark" => Some(EdgeKind::Dark),
            _ => None,
        }
    }

    /// True unless wired in reverse.
    pub fn is_forward(self) -> bool {
        self != EdgeKind::Reversed
    }

    /// True for edges that emit no pixels.
    pub fn is_dark(self) -> bool {
        self == EdgeKind::Dark
    }
}

/// An LED strip between two vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    /// `"<v0>-<v1>"` key from the edge file.
    pub key: String,
    /// Endpoint with the lower id.
    pub v0: VertexId,
    /// Endpoint with the higher id.
    pub v1: VertexId,
    /// Wiring kind.
    pub kind: EdgeKind,
    /// Midpoint of the strip.
    pub center: Point3,
    /// Pixel positions in wiring order.
    pub points: Vec<Point3>,
    /// Indices of `points` in the model's point cloud.
    pub pixels: Range<usize>,
    /// Symmetry group; assigned once all edges are loaded.
    pub symmetry_group: GroupId,
    /// Panels bordered by this edge.
    pub panels: Vec<PanelId>,
    /// Output controller, if bound.
    pub controller: Option<ControllerAddress>,
}

impl Edge {
    /// True unless wired in reverse.
    pub fn is_forward(&self) -> bool {
        self.kind.is_forward()
    }

    /// True for edges that emit no pixels.
    pub fn is_dark(&self) -> bool {
        self.kind.is_dark()
    }
}

/// Split `"<v0>-<v1>"` into ordered vertex ids.
pub fn parse_edge_key(key: &str) -> std::result::Result<(i32, i32), String> {
    let parts: Vec<&str> = key.split('-').collect();
    let &[a, b] = parts.as_slice() else {
        return Err(format!("found {} id tokens, expected 2", parts.len()));
    };
    let v0: i32 = a.parse().map_err(|_| format!("{a:?} is not an integer"))?;
    let v1: i32 = b.parse().map_err(|_| format!("{b:?} is not an integer"))?;
    if v0 >= v1 {
        return Err(format!("vertex ids out of order: {v0} >= {v1}"));
    }
    Ok((v0, v1))
}

/// Pixels along a strip: `floor(length * density)`, centered in equal
/// slots, in wiring order.
pub fn strip_pixels(from: &Point3, to: &Point3, leds_per_micron: f64) -> Vec<Point3> {
    let count = ((to - from).norm() * leds_per_micron).floor() as usize;
    (0..count)
        .map(|i| lerp(from, to, (i as f64 + 0.5) / count as f64))
        .collect()
}

/// Load every edge row into `graph`, binding controlled edges.
///
/// A vertex pair may be listed only once.
pub fn load_edges(
    graph: &mut Graph,
    file: &SourceFile,
    config: &LoaderConfig,
    binder: &mut dyn OutputBinder,
) -> Result<()> {
    let mut first_lines: HashMap<(i32, i32), usize> = HashMap::new();
    for line in file.lines() {
        let fields = line.tab_fields(3)?;
        let (key, kind_token, controller) = (fields[0], fields[1], fields[2]);
        let at = line.location();

        let kind = EdgeKind::from_token(kind_token)
            .ok_or_else(|| LoadError::unknown_token(at.clone(), "edge kind", kind_token))?;
        if kind.is_dark() && controller != UNCONTROLLED {
            return Err(LoadError::invalid_controller(
                at,
                controller,
                "dark edges must be uncontrolled",
            ));
        }

        let (id0, id1) = parse_edge_key(key).map_err(|reason| LoadError::BadEdgeId {
            at: at.clone(),
            id: key.to_string(),
            reason,
        })?;
        if let Some(&first_line) = first_lines.get(&(id0, id1)) {
            return Err(LoadError::DuplicateId {
                at,
                kind: "edge",
                id: key.to_string(),
                first_line,
            });
        }
        first_lines.insert((id0, id1), at.line);
        let v0 = resolve_vertex(graph, id0, &at)?;
        let v1 = resolve_vertex(graph, id1, &at)?;

        let (p0, p1) = (graph.vertices[v0].point, graph.vertices[v1].point);
        let points = match kind {
            EdgeKind::Dark => Vec::new(),
            EdgeKind::Default => strip_pixels(&p0, &p1, config.leds_per_micron),
            EdgeKind::Reversed => strip_pixels(&p1, &p0, config.leds_per_micron),
        };

        let address = if controller == UNCONTROLLED {
            None
        } else {
            Some(controller.parse::<ControllerAddress>().map_err(|reason| {
                LoadError::invalid_controller(at.clone(), controller, reason)
            })?)
        };

        let eid = graph.add_edge(Edge {
            key: key.to_string(),
            v0,
            v1,
            kind,
            center: midpoint(&p0, &p1),
            points,
            pixels: 0..0,
            symmetry_group: GroupId::default(),
            panels: Vec::new(),
            controller: address.clone(),
        });

        if let Some(address) = address {
            binder.bind(BoundEntity::Edge(eid), &address, kind.is_forward());
        }
    }
    Ok(())
}

fn resolve_vertex(graph: &Graph, id: i32, at: &Location) -> Result<VertexId> {
    graph
        .vertex_id(id)
        .ok_or_else(|| LoadError::missing_reference(at.clone(), "vertex", id))
}
