//! Extreme points of the model's pixel cloud.

use lightform_math::{Axis, Point3};
use serde::Serialize;

use crate::error::{LoadError, Result};

/// The points at the boundaries of the model along each axis.
///
/// Whole points are kept for convenience, but only the coordinate along the
/// respective axis is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundaries {
    /// Point with the smallest x.
    pub min_x: Point3,
    /// Point with the largest x.
    pub max_x: Point3,
    /// Point with the smallest y.
    pub min_y: Point3,
    /// Point with the largest y.
    pub max_y: Point3,
    /// Point with the smallest z.
    pub min_z: Point3,
    /// Point with the largest z.
    pub max_z: Point3,
}

impl Boundaries {
    /// Scan `points` once; ties keep the earliest point.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        let (first, rest) = points.split_first().ok_or(LoadError::EmptyPointCloud)?;
        let mut min = [*first; 3];
        let mut max = [*first; 3];

        for p in rest {
            for (i, axis) in Axis::ALL.into_iter().enumerate() {
                let v = axis.coord(p);
                if v < axis.coord(&min[i]) {
                    min[i] = *p;
                }
                if v > axis.coord(&max[i]) {
                    max[i] = *p;
                }
            }
        }

        Ok(Self {
            min_x: min[0],
            max_x: max[0],
            min_y: min[1],
            max_y: max[1],
            min_z: min[2],
            max_z: max[2],
        })
    }

    /// Point with the smallest coordinate on `axis`.
    pub fn min(&self, axis: Axis) -> &Point3 {
        match axis {
            Axis::X => &self.min_x,
            Axis::Y => &self.min_y,
            Axis::Z => &self.min_z,
        }
    }

    /// Point with the largest coordinate on `axis`.
    pub fn max(&self, axis: Axis) -> &Point3 {
        match axis {
            Axis::X => &self.max_x,
            Axis::Y => &self.max_y,
            Axis::Z => &self.max_z,
        }
    }

    /// Extent `(min, max)` along `axis`.
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        (axis.coord(self.min(axis)), axis.coord(self.max(axis)))
    }
}
