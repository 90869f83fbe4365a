//! The assembled, read-only sculpture model.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use lightform_math::Point3;

use crate::boundary::Boundaries;
use crate::boxes::SculptureBox;
use crate::edge::Edge;
use crate::graph::{EdgeId, GroupId, Graph, PanelId, VertexId};
use crate::laser::Laser;
use crate::output::Binding;
use crate::panel::Panel;
use crate::section::Section;
use crate::symmetry::SymmetryGroup;
use crate::vertex::Vertex;

/// A fully loaded sculpture.
///
/// Built once by [`ModelBuilder`](crate::ModelBuilder) and never mutated.
#[derive(Debug)]
pub struct Model {
    pub(crate) name: String,
    pub(crate) graph: Graph,
    pub(crate) lasers: Vec<Laser>,
    pub(crate) laser_index: HashMap<String, usize>,
    pub(crate) boxes: Vec<SculptureBox>,
    pub(crate) sections: BTreeMap<Section, Vec<PanelId>>,
    pub(crate) flavors: BTreeMap<String, Vec<PanelId>>,
    pub(crate) points: Vec<Point3>,
    pub(crate) edge_pixels: Range<usize>,
    pub(crate) panel_pixels: Range<usize>,
    pub(crate) boundaries: Boundaries,
    pub(crate) bindings: Vec<Binding>,
}

impl Model {
    /// Model name from the metadata file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying entity graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    // --- vertices ---

    /// Vertex by external id.
    pub fn vertex(&self, id: i32) -> Option<&Vertex> {
        self.graph.vertex_id(id).map(|vid| &self.graph.vertices[vid])
    }

    /// Vertex by handle.
    pub fn vertex_by_handle(&self, vid: VertexId) -> &Vertex {
        &self.graph.vertices[vid]
    }

    /// All vertices in file order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.graph.vertices.iter()
    }

    // --- edges ---

    /// Edge by `"<v0>-<v1>"` key.
    pub fn edge(&self, key: &str) -> Option<&Edge> {
        self.graph.edge_id(key).map(|eid| &self.graph.edges[eid])
    }

    /// Edge by handle.
    pub fn edge_by_handle(&self, eid: EdgeId) -> &Edge {
        &self.graph.edges[eid]
    }

    /// All edges in file order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.graph.edges.iter()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edges.len()
    }

    // --- symmetry ---

    /// All symmetry groups.
    pub fn symmetry_groups(&self) -> impl Iterator<Item = (GroupId, &SymmetryGroup)> {
        self.graph.groups.iter()
    }

    /// The symmetry group containing `eid`.
    pub fn symmetry_group_of(&self, eid: EdgeId) -> &SymmetryGroup {
        &self.graph.groups[self.graph.edges[eid].symmetry_group]
    }

    /// Edges sharing a symmetry group with `eid`, itself included.
    pub fn symmetric_edges(&self, eid: EdgeId) -> impl Iterator<Item = &Edge> {
        self.symmetry_group_of(eid)
            .edges
            .iter()
            .map(|&e| &self.graph.edges[e])
    }

    // --- panels ---

    /// Panel by id.
    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.graph.panel_id(id).map(|pid| &self.graph.panels[pid])
    }

    /// Panel by handle.
    pub fn panel_by_handle(&self, pid: PanelId) -> &Panel {
        &self.graph.panels[pid]
    }

    /// All panels in file order.
    pub fn panels(&self) -> impl Iterator<Item = (PanelId, &Panel)> {
        self.graph.panels.iter()
    }

    /// Number of panels.
    pub fn panel_count(&self) -> usize {
        self.graph.panels.len()
    }

    /// Panels of one section, in file order.
    pub fn panels_in_section(&self, section: Section) -> impl Iterator<Item = &Panel> {
        self.sections
            .get(&section)
            .into_iter()
            .flatten()
            .map(|&pid| &self.graph.panels[pid])
    }

    /// Panels belonging to any of `sections`.
    pub fn panels_in_sections<'a>(
        &'a self,
        sections: &'a [Section],
    ) -> impl Iterator<Item = &'a Panel> + 'a {
        sections
            .iter()
            .flat_map(move |&section| self.panels_in_section(section))
    }

    /// Pixel positions of every panel in `section`.
    pub fn points_in_section(&self, section: Section) -> Vec<Point3> {
        self.panels_in_section(section)
            .flat_map(|p| p.points.iter().copied())
            .collect()
    }

    /// Panels on the left when viewing the starboard side.
    pub fn left_panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels_in_sections(&Section::LEFT)
    }

    /// Panels on the right when viewing the starboard side.
    pub fn right_panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels_in_sections(&Section::RIGHT)
    }

    /// Sections that hold at least one panel.
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections.keys().copied()
    }

    /// Panels of one flavor, in file order.
    pub fn panels_of_flavor(&self, flavor: &str) -> impl Iterator<Item = &Panel> {
        self.flavors
            .get(flavor)
            .into_iter()
            .flatten()
            .map(|&pid| &self.graph.panels[pid])
    }

    /// All flavors with their panel counts.
    pub fn flavors(&self) -> impl Iterator<Item = (&str, usize)> {
        self.flavors.iter().map(|(f, pids)| (f.as_str(), pids.len()))
    }

    // --- lasers and boxes ---

    /// Laser by id.
    pub fn laser(&self, id: &str) -> Option<&Laser> {
        self.laser_index.get(id).map(|&i| &self.lasers[i])
    }

    /// All lasers in file order.
    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    /// Boxes, each original followed by its z-mirror.
    pub fn boxes(&self) -> &[SculptureBox] {
        &self.boxes
    }

    // --- pixels ---

    /// Every pixel: edge pixels first, then panel pixels.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Edge pixels.
    pub fn edge_points(&self) -> &[Point3] {
        &self.points[self.edge_pixels.clone()]
    }

    /// Panel pixels.
    pub fn panel_points(&self) -> &[Point3] {
        &self.points[self.panel_pixels.clone()]
    }

    /// Whether pixel `index` belongs to an edge.
    pub fn is_edge_point(&self, index: usize) -> bool {
        self.edge_pixels.contains(&index)
    }

    /// Whether pixel `index` belongs to a panel.
    pub fn is_panel_point(&self, index: usize) -> bool {
        self.panel_pixels.contains(&index)
    }

    /// Extreme pixels along each axis.
    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Controller bindings made during load, in load order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}
