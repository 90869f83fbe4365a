//! Loads the fixture model directories under `tests/fixtures/`.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use lightform_math::{Axis, Point3};
use lightform_model::{
    load_model, BindingLog, BoundEntity, EdgeKind, LoadError, Model, ModelBuilder, Section,
};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn wedge() -> Model {
    load_model(fixture_dir("wedge")).unwrap()
}

/// The wedge fixture as in-memory files, for tests that corrupt one of them.
fn wedge_files() -> HashMap<String, String> {
    fs::read_dir(fixture_dir("wedge"))
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            (name, fs::read_to_string(&path).unwrap())
        })
        .collect()
}

#[test]
fn test_loads_wedge() {
    let model = wedge();
    assert_eq!(model.name(), "Wedge");
    // vertex 5 is listed twice; the later record wins
    assert_eq!(model.vertices().count(), 5);
    assert_eq!(model.vertex(5).unwrap().point, Point3::new(0.0, 1_000_000.0, 0.0));
    // vertex 1's row ends in a stray tab
    assert_eq!(model.vertex(1).unwrap().point.z, 500_000.0);
    assert_eq!(model.edge_count(), 8);
    assert_eq!(model.panel_count(), 4);
    assert_eq!(model.lasers().len(), 2);
    assert_eq!(model.laser("L2").unwrap().position.y, -500_000.0);
}

#[test]
fn test_edge_vertices_are_ordered() {
    let model = wedge();
    for (_, edge) in model.edges() {
        let v0 = model.vertex_by_handle(edge.v0);
        let v1 = model.vertex_by_handle(edge.v1);
        assert!(v0.id < v1.id, "edge {} is not ordered", edge.key);
        assert_eq!(edge.key, format!("{}-{}", v0.id, v1.id));
    }
}

#[test]
fn test_edge_pixels() {
    let model = wedge();
    let counts: Vec<(&str, usize)> = model
        .edges()
        .map(|(_, e)| (e.key.as_str(), e.points.len()))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("1-2", 60),
            ("1-3", 0),
            ("2-4", 120),
            ("3-4", 60),
            ("1-5", 90),
            ("2-5", 90),
            ("3-5", 90),
            ("4-5", 90),
        ]
    );

    // reversed strips run from the higher vertex to the lower one
    let e34 = model.edge("3-4").unwrap();
    assert_eq!(e34.kind, EdgeKind::Reversed);
    assert!(e34.points[0].z < 0.0);
    assert!(e34.points[59].z > 0.0);
}

#[test]
fn test_panels_span_three_vertices() {
    let model = wedge();
    for (pid, panel) in model.panels() {
        let mut ids: Vec<i32> = panel
            .vertices
            .iter()
            .map(|&v| model.vertex_by_handle(v).id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        for &eid in &panel.edges {
            assert!(model.edge_by_handle(eid).panels.contains(&pid));
        }
    }
}

#[test]
fn test_striped_panel() {
    let model = wedge();
    let p1 = model.panel("P1").unwrap();
    let striping = p1.striping.as_ref().unwrap();
    assert_eq!(striping.starting_vertex, 5);
    assert_eq!(striping.row_lengths, vec![7, 6]);
    assert_eq!(striping.before_nudges.len(), striping.row_lengths.len());
    assert_eq!(striping.gaps.len(), striping.row_lengths.len());
    assert_eq!(p1.points.len(), 13);
    // two dark positions precede the second row
    assert_eq!(p1.channel_len(), striping.channel_len());
    assert_eq!(p1.channel_len(), 15);
    assert!(p1.is_lit());

    for id in ["P2", "P3", "P4"] {
        let p = model.panel(id).unwrap();
        assert!(p.striping.is_none());
        assert!(p.points.is_empty());
    }
}

#[test]
fn test_boxes_are_mirrored() {
    let model = wedge();
    let boxes = model.boxes();
    assert_eq!(boxes.len(), 4);
    for pair in boxes.chunks(2) {
        for (a, b) in pair[0].points.iter().zip(&pair[1].points) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.z, -b.z);
        }
    }
}

#[test]
fn test_symmetry_groups_cover_every_edge() {
    let model = wedge();
    let mut seen = 0;
    for (_, group) in model.symmetry_groups() {
        seen += group.edges.len();
    }
    assert_eq!(seen, model.edge_count());
    assert_eq!(model.symmetry_groups().count(), 3);

    let eid = model.graph().edge_id("1-5").unwrap();
    let mut keys: Vec<&str> = model.symmetric_edges(eid).map(|e| e.key.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["1-5", "2-5", "3-5", "4-5"]);
}

#[test]
fn test_boundaries_are_extrema() {
    let model = wedge();
    let b = model.boundaries();
    for axis in Axis::ALL {
        let coords = model.points().iter().map(|p| axis.coord(p));
        let min = coords.clone().fold(f64::INFINITY, f64::min);
        let max = coords.fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(axis.coord(b.min(axis)), min);
        assert_relative_eq!(axis.coord(b.max(axis)), max);
    }
}

#[test]
fn test_sections_and_flavors() {
    let model = wedge();
    let fore: Vec<&str> = model
        .panels_in_section(Section::Fore)
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(fore, vec!["P1", "P3", "P4"]);
    assert_eq!(model.left_panels().count(), 1);
    assert_eq!(model.right_panels().count(), 3);

    assert_eq!(model.panels_of_flavor("solid").count(), 2);
    assert_eq!(model.panels_of_flavor("lit").count(), 1);
    assert_eq!(model.panels_of_flavor("frosted").count(), 1);
}

#[test]
fn test_bindings_replayed_in_load_order() {
    let mut log = BindingLog::default();
    let model = ModelBuilder::new(fixture_dir("wedge"))
        .build_with(&mut log)
        .unwrap();
    let bound: Vec<(String, bool)> = log
        .bindings
        .iter()
        .map(|b| match b.entity {
            BoundEntity::Edge(eid) => (model.edge_by_handle(eid).key.clone(), b.forward),
            BoundEntity::Panel(pid) => (model.panel_by_handle(pid).id.clone(), b.forward),
        })
        .collect();
    assert_eq!(
        bound,
        vec![
            ("1-2".to_string(), true),
            ("3-4".to_string(), false),
            ("P1".to_string(), true),
        ]
    );
}

#[test]
fn test_malformed_edge_id_aborts() {
    let mut files = wedge_files();
    let edges = files["edges.txt"].replace("2-4\t", "2-4-6\t");
    files.insert("edges.txt".into(), edges);

    let mut log = BindingLog::default();
    let err = ModelBuilder::from_memory(files)
        .build_with(&mut log)
        .unwrap_err();
    match err {
        LoadError::BadEdgeId { at, id, .. } => {
            assert_eq!(id, "2-4-6");
            assert_eq!(at.file, "edges.txt");
            assert_eq!(at.line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(log.bindings.is_empty());
}

#[test]
fn test_duplicate_edge_aborts_without_bindings() {
    let mut files = wedge_files();
    let edges = format!("{}1-2\tdefault\t10.0.0.9#1:0\n", files["edges.txt"]);
    files.insert("edges.txt".into(), edges);

    let mut log = BindingLog::default();
    let err = ModelBuilder::from_memory(files)
        .build_with(&mut log)
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::DuplicateId {
            kind: "edge",
            first_line: 1,
            ..
        }
    ));
    assert!(log.bindings.is_empty());
}

#[test]
fn test_unknown_flip_token_aborts() {
    let mut files = wedge_files();
    let panels = files["panels.txt"].replace("flipped\tsolid", "sideways\tsolid");
    files.insert("panels.txt".into(), panels);
    let err = ModelBuilder::from_memory(files).build().unwrap_err();
    assert!(matches!(err, LoadError::UnknownToken { .. }));
}

#[test]
fn test_incomplete_box_aborts() {
    let mut files = wedge_files();
    files.insert("boxes.txt".into(), "1 2 3\n4 5 6\n".into());
    let err = ModelBuilder::from_memory(files).build().unwrap_err();
    assert!(matches!(err, LoadError::IncompleteBox { count: 2, .. }));
}

#[test]
fn test_missing_directory_names_path() {
    let dir = fixture_dir("no-such-model");
    let err = load_model(&dir).unwrap_err();
    match err {
        LoadError::Missing { path } => assert_eq!(path, dir.join("general.txt")),
        other => panic!("unexpected error: {other}"),
    }
}
