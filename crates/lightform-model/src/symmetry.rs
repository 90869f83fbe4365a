//! Symmetry grouping of edges.
//!
//! Edges whose centers share the same quantized `(|y|, |z|)` are mirror
//! images of each other fore/aft or port/starboard. Membership is discovered
//! from geometry; the input files carry no mirroring data.

use std::collections::HashMap;

use lightform_math::{quantize, Point3};
use serde::Serialize;

use crate::graph::{EdgeId, GroupId, Graph};

/// Bucket key of a symmetry group: `(0, |y|, |z|)` rounded to the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymmetryKey {
    /// Always zero; x is the mirrored axis.
    pub x: i64,
    /// Quantized `|y|`.
    pub y: i64,
    /// Quantized `|z|`.
    pub z: i64,
}

impl SymmetryKey {
    /// Key for an edge centered at `center`.
    pub fn for_center(center: &Point3, bucket: f64) -> Self {
        Self {
            x: 0,
            y: quantize(center.y.abs(), bucket),
            z: quantize(center.z.abs(), bucket),
        }
    }
}

/// Edges sharing one symmetry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryGroup {
    /// The shared key.
    pub key: SymmetryKey,
    /// Member edges in load order.
    pub edges: Vec<EdgeId>,
}

/// Group every edge in `graph` and record each edge's group.
pub fn index_symmetry(graph: &mut Graph, bucket: f64) {
    let mut by_key: HashMap<SymmetryKey, GroupId> = HashMap::new();
    let Graph { edges, groups, .. } = graph;

    for (eid, edge) in edges.iter_mut() {
        let key = SymmetryKey::for_center(&edge.center, bucket);
        let gid = *by_key.entry(key).or_insert_with(|| {
            groups.insert(SymmetryGroup {
                key,
                edges: Vec::new(),
            })
        });
        groups[gid].edges.push(eid);
        edge.symmetry_group = gid;
    }
}
