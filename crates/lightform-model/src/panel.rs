//! Triangular panels bounded by three edges.
//!
//! Each row of the panel file is `id e0 e1 e2 flip type`, tab-separated.
//! A type containing `.` is a controller spec and marks the panel as lit.

use std::collections::HashMap;
use std::ops::Range;

use lightform_math::{lerp, Dir3, Point3, Tolerance, Triangle, Vec3};
use serde::Serialize;

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};
use crate::graph::{EdgeId, Graph, VertexId};
use crate::output::{BoundEntity, ControllerAddress, OutputBinder};
use crate::section::Section;
use crate::source::SourceFile;
use crate::striping::StripingInstructions;

/// Flavor assigned to every lit panel.
pub const LIT_FLAVOR: &str = "lit";

/// Orientation of a panel's triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flip {
    /// Token `flipped`: winding reversed.
    Flipped,
    /// Token `unflipped`.
    Unflipped,
}

impl Flip {
    /// Decode a flip token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "flipped" => Some(Flip::Flipped),
            "unflipped" => Some(Flip::Unflipped),
            _ => None,
        }
    }
}

/// A triangular LED surface.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Panel id from the panel file.
    pub id: String,
    /// Distinct corners, in order of first appearance across the edges.
    pub vertices: [VertexId; 3],
    /// Bounding edges as listed.
    pub edges: [EdgeId; 3],
    /// Orientation.
    pub flip: Flip,
    /// Corner positions in winding order (reversed when flipped).
    pub triangle: Triangle,
    /// Structural zone.
    pub section: Section,
    /// Category tag; [`LIT_FLAVOR`] for lit panels.
    pub flavor: String,
    /// Controller spec of a lit panel, as written.
    pub output_config: Option<String>,
    /// Row layout, if the striping file lists this panel.
    pub striping: Option<StripingInstructions>,
    /// Wire channel in order: a position per lit pixel, `None` per gap.
    pub slots: Vec<Option<Point3>>,
    /// Lit pixel positions in wiring order.
    pub points: Vec<Point3>,
    /// Indices of `points` in the model's point cloud.
    pub pixels: Range<usize>,
    /// Output controller, if lit.
    pub controller: Option<ControllerAddress>,
}

impl Panel {
    /// True if the panel carries its own controller.
    pub fn is_lit(&self) -> bool {
        self.output_config.is_some()
    }

    /// Unit normal of the oriented triangle.
    pub fn normal(&self) -> Option<Dir3> {
        self.triangle.normal()
    }

    /// Centroid of the corners.
    pub fn centroid(&self) -> Point3 {
        self.triangle.centroid()
    }

    /// Number of channel positions, gaps included.
    pub fn channel_len(&self) -> usize {
        self.slots.len()
    }

    /// Point-cloud index of each channel position, `None` for gaps.
    pub fn channel_indices(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.slots.iter().scan(self.pixels.start, |next, slot| {
            Some(slot.map(|_| {
                let index = *next;
                *next += 1;
                index
            }))
        })
    }
}

/// Lay out a panel's pixels row by row.
///
/// Rows run parallel to `start -> a` and stack toward `b`. Each row spans
/// from the `start -> b` side (left) to the `a -> b` side (right) and starts
/// from whichever side its phase selects; a positive before-nudge pushes the
/// first pixel past that side. Each row is preceded by its gap positions,
/// which hold no point, so the result has one slot per channel position.
///
/// A degenerate triangle collapses every pixel onto `start`.
pub fn row_pixels(
    start: &Point3,
    a: &Point3,
    b: &Point3,
    striping: &StripingInstructions,
    pixel_pitch: f64,
    row_pitch: f64,
) -> Vec<Option<Point3>> {
    let tol = Tolerance::DEFAULT;
    let base = a - start;
    let base_len = base.norm();
    let along = if tol.is_zero(base_len) {
        Vec3::zeros()
    } else {
        base / base_len
    };
    let to_b = b - start;
    let height = (to_b - along * to_b.dot(&along)).norm();

    let mut slots = Vec::with_capacity(striping.channel_len());
    for (row, ((&length, &nudge), &gap)) in striping
        .row_lengths
        .iter()
        .zip(&striping.before_nudges)
        .zip(&striping.gaps)
        .enumerate()
    {
        slots.extend(std::iter::repeat(None).take(gap));

        let t = if tol.is_zero(height) {
            0.0
        } else {
            ((row as f64 + 0.5) * row_pitch / height).min(1.0)
        };
        let (origin, dir) = if striping.row_starts_left(row) {
            (lerp(start, b, t), along)
        } else {
            (lerp(a, b, t), -along)
        };
        for k in 0..length.max(0) {
            let offset = (f64::from(k - nudge) + 0.5) * pixel_pitch;
            slots.push(Some(origin + dir * offset));
        }
    }
    slots
}

/// Load every panel row into `graph`, binding lit panels.
///
/// A panel id may be listed only once.
pub fn load_panels(
    graph: &mut Graph,
    file: &SourceFile,
    striping: &HashMap<String, StripingInstructions>,
    config: &LoaderConfig,
    binder: &mut dyn OutputBinder,
) -> Result<()> {
    let mut first_lines: HashMap<&str, usize> = HashMap::new();
    for line in file.lines() {
        let fields = line.tab_fields(6)?;
        let id = fields[0];
        let flip_token = fields[4];
        let panel_type = fields[5];
        let at = line.location();

        if let Some(&first_line) = first_lines.get(id) {
            return Err(LoadError::DuplicateId {
                at,
                kind: "panel",
                id: id.to_string(),
                first_line,
            });
        }
        first_lines.insert(id, at.line);

        let mut edges = [EdgeId::default(); 3];
        for (slot, key) in edges.iter_mut().zip(&fields[1..4]) {
            *slot = graph
                .edge_id(key)
                .ok_or_else(|| LoadError::missing_reference(at.clone(), "edge", key))?;
        }

        let mut corners: Vec<VertexId> = Vec::with_capacity(3);
        for &eid in &edges {
            let edge = &graph.edges[eid];
            for vid in [edge.v0, edge.v1] {
                if !corners.contains(&vid) {
                    corners.push(vid);
                }
            }
        }
        let vertices: [VertexId; 3] =
            corners
                .as_slice()
                .try_into()
                .map_err(|_| LoadError::NotATriangle {
                    at: at.clone(),
                    id: id.to_string(),
                    count: corners.len(),
                })?;

        let flip = Flip::from_token(flip_token)
            .ok_or_else(|| LoadError::unknown_token(at.clone(), "flip token", flip_token))?;

        let lit = panel_type.contains('.');
        let (flavor, output_config) = if lit {
            (LIT_FLAVOR.to_string(), Some(panel_type.to_string()))
        } else {
            (panel_type.to_string(), None)
        };
        let controller = output_config
            .as_deref()
            .map(|spec| {
                spec.parse::<ControllerAddress>()
                    .map_err(|reason| LoadError::invalid_controller(at.clone(), spec, reason))
            })
            .transpose()?;

        let corner_points = vertices.map(|vid| graph.vertices[vid].point);
        let unflipped = Triangle::new(corner_points[0], corner_points[1], corner_points[2]);
        let triangle = match flip {
            Flip::Flipped => unflipped.flipped(),
            Flip::Unflipped => unflipped,
        };

        let instructions = striping.get(id).cloned();
        let slots = match &instructions {
            Some(instr) => {
                let start = vertices
                    .iter()
                    .position(|&vid| graph.vertices[vid].id == instr.starting_vertex)
                    .ok_or_else(|| {
                        LoadError::missing_reference(
                            at.clone(),
                            "starting vertex on panel",
                            instr.starting_vertex,
                        )
                    })?;
                let a = corner_points[(start + 1) % 3];
                let b = corner_points[(start + 2) % 3];
                row_pixels(
                    &corner_points[start],
                    &a,
                    &b,
                    instr,
                    config.pixel_pitch,
                    config.row_pitch,
                )
            }
            None => Vec::new(),
        };

        let pid = graph.add_panel(Panel {
            id: id.to_string(),
            vertices,
            edges,
            flip,
            section: Section::classify(&triangle),
            triangle,
            flavor,
            output_config,
            striping: instructions,
            points: slots.iter().flatten().copied().collect(),
            slots,
            pixels: 0..0,
            controller: controller.clone(),
        });

        if let Some(address) = controller {
            binder.bind(BoundEntity::Panel(pid), &address, true);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::load_edges;
    use crate::output::BindingLog;
    use crate::striping::Side;
    use crate::vertex::load_vertexes;
    use approx::assert_relative_eq;

    const VERTEXES: &str = "1\t0\t0\t100000\n2\t1000000\t0\t100000\n3\t0\t1000000\t100000\n4\t0\t0\t-100000\n";
    const EDGES: &str = "1-2\tdefault\tuncontrolled\n2-3\tdefault\tuncontrolled\n1-3\tdark\tuncontrolled\n1-4\tdefault\tuncontrolled\n";

    fn graph() -> Graph {
        let mut g = Graph::new();
        load_vertexes(&mut g, &SourceFile::from_text("vertexes.txt", VERTEXES)).unwrap();
        load_edges(
            &mut g,
            &SourceFile::from_text("edges.txt", EDGES),
            &LoaderConfig::default(),
            &mut BindingLog::default(),
        )
        .unwrap();
        g
    }

    fn striping() -> HashMap<String, StripingInstructions> {
        HashMap::from([(
            "SUA".to_string(),
            StripingInstructions {
                starting_vertex: 1,
                start_side: Side::Left,
                universe_lengths: None,
                row_lengths: vec![3, 2],
                before_nudges: vec![0, 0],
                gaps: vec![0, 1],
            },
        )])
    }

    fn load(g: &mut Graph, text: &str) -> Result<BindingLog> {
        let mut log = BindingLog::default();
        let f = SourceFile::from_text("panels.txt", text);
        load_panels(g, &f, &striping(), &LoaderConfig::default(), &mut log)?;
        Ok(log)
    }

    #[test]
    fn test_panel_wires_edges_and_vertices() {
        let mut g = graph();
        load(&mut g, "SUA\t1-2\t2-3\t1-3\tunflipped\tsolid\n").unwrap();
        let pid = g.panel_id("SUA").unwrap();
        let p = &g.panels[pid];
        let ids: Vec<i32> = p.vertices.iter().map(|&v| g.vertices[v].id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for eid in p.edges {
            assert_eq!(g.edges[eid].panels, vec![pid]);
        }
        assert_eq!(p.flavor, "solid");
        assert!(!p.is_lit());
        assert_eq!(p.section, Section::StarboardFore);
        assert_relative_eq!(p.normal().unwrap().z, 1.0);
    }

    #[test]
    fn test_flipped_panel_reverses_normal() {
        let mut g = graph();
        load(&mut g, "SUA\t1-2\t2-3\t1-3\tflipped\tsolid\n").unwrap();
        let p = &g.panels[g.panel_id("SUA").unwrap()];
        assert_eq!(p.flip, Flip::Flipped);
        assert_relative_eq!(p.normal().unwrap().z, -1.0);
    }

    #[test]
    fn test_striped_pixels() {
        let mut g = graph();
        load(&mut g, "SUA\t1-2\t2-3\t1-3\tunflipped\tsolid\n").unwrap();
        let p = &g.panels[g.panel_id("SUA").unwrap()];
        assert_eq!(p.points.len(), 5);
        let pitch = LoaderConfig::default().pixel_pitch;
        // first row starts at the left bound and runs toward vertex 2
        assert_relative_eq!(p.points[0].y, 25_000.0, epsilon = 1e-6);
        assert_relative_eq!(p.points[1].x - p.points[0].x, pitch, epsilon = 1e-6);
        // second row runs back from the right bound
        assert_relative_eq!(p.points[3].y, 75_000.0, epsilon = 1e-6);
        assert!(p.points[4].x < p.points[3].x);
    }

    #[test]
    fn test_gap_positions_keep_channel_slots() {
        let mut g = graph();
        load(&mut g, "SUA\t1-2\t2-3\t1-3\tunflipped\tsolid\n").unwrap();
        let p = &g.panels[g.panel_id("SUA").unwrap()];
        let instr = p.striping.as_ref().unwrap();
        assert_eq!(p.channel_len(), instr.channel_len());
        assert_eq!(p.channel_len(), 6);
        // the second row is preceded by one dark position
        assert!(p.slots[..3].iter().all(Option::is_some));
        assert_eq!(p.slots[3], None);
        assert_eq!(p.slots[4], Some(p.points[3]));
        assert_eq!(p.slots.iter().flatten().count(), p.points.len());
    }

    #[test]
    fn test_degenerate_panel_keeps_slots() {
        let all = striping();
        let striping = &all["SUA"];
        let origin = Point3::origin();
        let slots = row_pixels(&origin, &origin, &origin, striping, 1.0, 1.0);
        assert_eq!(slots.len(), striping.channel_len());
        assert!(slots.iter().flatten().all(|p| *p == origin));
    }

    #[test]
    fn test_unstriped_panel_is_empty() {
        let mut g = graph();
        load(&mut g, "SUB\t1-2\t2-3\t1-3\tunflipped\tsolid\n").unwrap();
        let p = &g.panels[g.panel_id("SUB").unwrap()];
        assert!(p.points.is_empty());
        assert!(p.slots.is_empty());
        assert!(p.striping.is_none());
    }

    #[test]
    fn test_lit_panel_is_bound() {
        let mut g = graph();
        let log = load(&mut g, "SUB\t1-2\t2-3\t1-3\tunflipped\t10.1.1.1#4:0\n").unwrap();
        let pid = g.panel_id("SUB").unwrap();
        let p = &g.panels[pid];
        assert!(p.is_lit());
        assert_eq!(p.flavor, LIT_FLAVOR);
        assert_eq!(p.output_config.as_deref(), Some("10.1.1.1#4:0"));
        assert_eq!(log.bindings.len(), 1);
        assert_eq!(log.bindings[0].entity, BoundEntity::Panel(pid));
        assert!(log.bindings[0].forward);
    }

    #[test]
    fn test_duplicate_panel_rejected() {
        let mut g = graph();
        let mut log = BindingLog::default();
        let f = SourceFile::from_text(
            "panels.txt",
            "SUB\t1-2\t2-3\t1-3\tunflipped\t10.1.1.1#4:0\n\
             SUB\t1-2\t2-3\t1-3\tflipped\tsolid\n",
        );
        let err = load_panels(&mut g, &f, &striping(), &LoaderConfig::default(), &mut log)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::DuplicateId {
                kind: "panel",
                first_line: 1,
                ..
            }
        ));
        assert_eq!(g.panels.len(), 1);
        assert_eq!(g.edges[g.edge_id("1-2").unwrap()].panels.len(), 1);
    }

    #[test]
    fn test_not_a_triangle() {
        let mut g = graph();
        let err = load(&mut g, "SUB\t1-2\t2-3\t1-4\tunflipped\tsolid\n").unwrap_err();
        assert!(matches!(err, LoadError::NotATriangle { count: 4, .. }));
        assert!(g.panels.is_empty());
    }

    #[test]
    fn test_missing_edge() {
        let mut g = graph();
        let err = load(&mut g, "SUB\t1-2\t2-3\t3-4\tunflipped\tsolid\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingReference { kind: "edge", .. }));
    }

    #[test]
    fn test_bad_flip_token() {
        let mut g = graph();
        let err = load(&mut g, "SUB\t1-2\t2-3\t1-3\tsideways\tsolid\n").unwrap_err();
        assert!(matches!(err, LoadError::UnknownToken { .. }));
    }

    #[test]
    fn test_start_vertex_must_be_on_panel() {
        let mut g = graph();
        let mut s = striping();
        s.get_mut("SUA").unwrap().starting_vertex = 4;
        let f = SourceFile::from_text("panels.txt", "SUA\t1-2\t2-3\t1-3\tunflipped\tsolid\n");
        let err = load_panels(
            &mut g,
            &f,
            &s,
            &LoaderConfig::default(),
            &mut BindingLog::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::MissingReference { .. }));
    }
}
