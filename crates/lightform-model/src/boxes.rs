//! 8-point boxes and their mirror images across `z = 0`.

use lightform_math::{point_from_microns, Point3};

use crate::error::{LoadError, Result};
use crate::source::SourceFile;

/// Corners per box.
pub const BOX_CORNERS: usize = 8;

/// An ordered set of eight spatial points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SculptureBox {
    /// Corners in file order.
    pub points: [Point3; BOX_CORNERS],
}

impl SculptureBox {
    /// Reflection across the `z = 0` plane, corner order kept.
    pub fn mirrored_z(&self) -> Self {
        Self {
            points: self.points.map(|p| Point3::new(p.x, p.y, -p.z)),
        }
    }
}

/// Parse the box file: whitespace-separated `x y z` per line, blank lines
/// ignored. Every 8 points yield a box followed by its mirror.
pub fn parse_boxes(file: &SourceFile) -> Result<Vec<SculptureBox>> {
    let mut boxes = Vec::new();
    let mut pending: Vec<Point3> = Vec::with_capacity(BOX_CORNERS);

    for line in file.lines().filter(|l| !l.is_blank()) {
        let fields = line.ws_fields(3)?;
        pending.push(point_from_microns(
            line.int(fields[0])?,
            line.int(fields[1])?,
            line.int(fields[2])?,
        ));
        if let Ok(points) = <[Point3; BOX_CORNERS]>::try_from(pending.as_slice()) {
            let b = SculptureBox { points };
            boxes.push(b);
            boxes.push(b.mirrored_z());
            pending.clear();
        }
    }

    if !pending.is_empty() {
        return Err(LoadError::IncompleteBox {
            file: file.name().to_string(),
            count: pending.len(),
        });
    }
    Ok(boxes)
}
