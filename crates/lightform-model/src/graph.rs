//! Entity arenas and handles for the sculpture graph.
//!
//! Vertices, edges and panels reference one another in both directions
//! (vertex to incident edges, edge to panels). Entities live in slot maps and
//! refer to each other through copyable handles, so the graph has a single
//! owner and no reference cycles.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::edge::Edge;
use crate::panel::Panel;
use crate::symmetry::SymmetryGroup;
use crate::vertex::Vertex;

slotmap::new_key_type! {
    /// Handle to a vertex in the graph.
    pub struct VertexId;
}

slotmap::new_key_type! {
    /// Handle to an edge in the graph.
    pub struct EdgeId;
}

slotmap::new_key_type! {
    /// Handle to a panel in the graph.
    pub struct PanelId;
}

slotmap::new_key_type! {
    /// Handle to a symmetry group.
    pub struct GroupId;
}

/// The cross-referenced mesh graph.
///
/// Entities iterate in insertion order, which is file order.
#[derive(Debug, Default)]
pub struct Graph {
    /// All vertices.
    pub vertices: SlotMap<VertexId, Vertex>,
    /// All edges.
    pub edges: SlotMap<EdgeId, Edge>,
    /// All panels.
    pub panels: SlotMap<PanelId, Panel>,
    /// Symmetry groups over edges.
    pub groups: SlotMap<GroupId, SymmetryGroup>,
    vertex_index: HashMap<i32, VertexId>,
    edge_index: HashMap<String, EdgeId>,
    panel_index: HashMap<String, PanelId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex, replacing any earlier vertex with the same id.
    ///
    /// The returned flag is set when an earlier vertex was replaced; the
    /// replacement keeps the earlier handle.
    pub fn upsert_vertex(&mut self, vertex: Vertex) -> (VertexId, bool) {
        if let Some(&vid) = self.vertex_index.get(&vertex.id) {
            self.vertices[vid] = vertex;
            return (vid, true);
        }
        let id = vertex.id;
        let vid = self.vertices.insert(vertex);
        self.vertex_index.insert(id, vid);
        (vid, false)
    }

    /// Insert an edge under its `"<v0>-<v1>"` key and register it on both
    /// endpoint vertices.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let (v0, v1) = (edge.v0, edge.v1);
        let key = edge.key.clone();
        let eid = self.edges.insert(edge);
        self.vertices[v0].edges.push(eid);
        self.vertices[v1].edges.push(eid);
        self.edge_index.insert(key, eid);
        eid
    }

    /// Insert a panel and register it on its three edges.
    pub fn add_panel(&mut self, panel: Panel) -> PanelId {
        let edges = panel.edges;
        let key = panel.id.clone();
        let pid = self.panels.insert(panel);
        for eid in edges {
            let panels = &mut self.edges[eid].panels;
            if !panels.contains(&pid) {
                panels.push(pid);
            }
        }
        self.panel_index.insert(key, pid);
        pid
    }

    /// Look up a vertex handle by external id.
    pub fn vertex_id(&self, id: i32) -> Option<VertexId> {
        self.vertex_index.get(&id).copied()
    }

    /// Look up an edge handle by `"<v0>-<v1>"` key.
    pub fn edge_id(&self, key: &str) -> Option<EdgeId> {
        self.edge_index.get(key).copied()
    }

    /// Look up a panel handle by id.
    pub fn panel_id(&self, id: &str) -> Option<PanelId> {
        self.panel_index.get(id).copied()
    }
}
