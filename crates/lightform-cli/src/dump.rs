//! JSON view of a loaded model.

use lightform_math::Point3;
use lightform_model::{
    Boundaries, ControllerAddress, EdgeKind, Flip, Model, Section, StripingInstructions,
    SymmetryKey,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ModelDump<'a> {
    pub name: &'a str,
    pub vertices: Vec<VertexDump>,
    pub edges: Vec<EdgeDump<'a>>,
    pub panels: Vec<PanelDump<'a>>,
    pub lasers: Vec<LaserDump<'a>>,
    pub boxes: Vec<[Point3; 8]>,
    pub symmetry_groups: Vec<GroupDump>,
    pub boundaries: &'a Boundaries,
}

#[derive(Serialize)]
pub struct VertexDump {
    pub id: i32,
    pub point: Point3,
    pub edges: usize,
}

#[derive(Serialize)]
pub struct EdgeDump<'a> {
    pub key: &'a str,
    pub kind: EdgeKind,
    pub center: Point3,
    pub pixel_count: usize,
    pub controller: Option<&'a ControllerAddress>,
    pub panels: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<&'a [Point3]>,
}

#[derive(Serialize)]
pub struct PanelDump<'a> {
    pub id: &'a str,
    pub vertices: [i32; 3],
    pub edges: [&'a str; 3],
    pub flip: Flip,
    pub section: Section,
    pub flavor: &'a str,
    pub controller: Option<&'a ControllerAddress>,
    pub striping: Option<&'a StripingInstructions>,
    pub pixel_count: usize,
    pub channel_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<&'a [Point3]>,
}

#[derive(Serialize)]
pub struct LaserDump<'a> {
    pub id: &'a str,
    pub position: Point3,
}

#[derive(Serialize)]
pub struct GroupDump {
    pub key: SymmetryKey,
    pub edges: Vec<String>,
}

impl<'a> ModelDump<'a> {
    /// Snapshot `model`; pixel positions only when `with_points` is set.
    pub fn new(model: &'a Model, with_points: bool) -> Self {
        let vertices = model
            .vertices()
            .map(|(_, v)| VertexDump {
                id: v.id,
                point: v.point,
                edges: v.edges.len(),
            })
            .collect();

        let edges = model
            .edges()
            .map(|(_, e)| EdgeDump {
                key: &e.key,
                kind: e.kind,
                center: e.center,
                pixel_count: e.points.len(),
                controller: e.controller.as_ref(),
                panels: e
                    .panels
                    .iter()
                    .map(|&pid| model.panel_by_handle(pid).id.as_str())
                    .collect(),
                points: with_points.then_some(e.points.as_slice()),
            })
            .collect();

        let panels = model
            .panels()
            .map(|(_, p)| PanelDump {
                id: &p.id,
                vertices: p.vertices.map(|vid| model.vertex_by_handle(vid).id),
                edges: p.edges.map(|eid| model.edge_by_handle(eid).key.as_str()),
                flip: p.flip,
                section: p.section,
                flavor: &p.flavor,
                controller: p.controller.as_ref(),
                striping: p.striping.as_ref(),
                pixel_count: p.points.len(),
                channel_len: p.channel_len(),
                points: with_points.then_some(p.points.as_slice()),
            })
            .collect();

        let lasers = model
            .lasers()
            .iter()
            .map(|l| LaserDump {
                id: &l.id,
                position: l.position,
            })
            .collect();

        let symmetry_groups = model
            .symmetry_groups()
            .map(|(_, g)| GroupDump {
                key: g.key,
                edges: g
                    .edges
                    .iter()
                    .map(|&eid| model.edge_by_handle(eid).key.clone())
                    .collect(),
            })
            .collect();

        Self {
            name: model.name(),
            vertices,
            edges,
            panels,
            lasers,
            boxes: model.boxes().iter().map(|b| b.points).collect(),
            symmetry_groups,
            boundaries: model.boundaries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightform_model::ModelBuilder;
    use std::collections::HashMap;

    fn model() -> Model {
        let files = HashMap::from([
            ("general.txt", "name: Dump Rig\n"),
            ("boxes.txt", ""),
            (
                "vertexes.txt",
                "1\t0\t0\t0\n2\t1000000\t0\t0\n3\t0\t1000000\t0\n",
            ),
            ("lasers.txt", "L1\t1\t2\t3\n"),
            (
                "edges.txt",
                "1-2\tdefault\tuncontrolled\n2-3\tdefault\tuncontrolled\n1-3\tdark\tuncontrolled\n",
            ),
            (
                "panel_signal_paths.tsv",
                "Panel\ta\tb\tc\td\te\tf\tSignal in vertex\n",
            ),
            ("striping-instructions.txt", ""),
            ("panels.txt", "P1\t1-2\t2-3\t1-3\tunflipped\tsolid\n"),
        ]);
        ModelBuilder::from_memory(files).build().unwrap()
    }

    #[test]
    fn test_dump_without_points() {
        let model = model();
        let json = serde_json::to_value(ModelDump::new(&model, false)).unwrap();
        assert_eq!(json["name"], "Dump Rig");
        assert_eq!(json["edges"].as_array().unwrap().len(), 3);
        assert!(json["edges"][0].get("points").is_none());
        assert_eq!(json["edges"][0]["pixel_count"], 60);
        assert_eq!(json["panels"][0]["edges"][1], "2-3");
        assert_eq!(json["panels"][0]["flip"], "Unflipped");
        assert_eq!(json["panels"][0]["channel_len"], 0);
        assert_eq!(json["lasers"][0]["id"], "L1");
    }

    #[test]
    fn test_dump_with_points() {
        let model = model();
        let json = serde_json::to_value(ModelDump::new(&model, true)).unwrap();
        assert_eq!(json["edges"][0]["points"].as_array().unwrap().len(), 60);
        assert_eq!(json["edges"][2]["points"].as_array().unwrap().len(), 0);
    }
}
