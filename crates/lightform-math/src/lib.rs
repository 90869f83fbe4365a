#![warn(missing_docs)]

//! Math types for lightform sculpture geometry.
//!
//! Thin wrappers around nalgebra. Sculpture coordinates are authored as
//! integer microns and carried as `f64` once loaded.

use nalgebra::{Unit, Vector3};

/// A point in 3D space (microns).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Build a point from integer micron coordinates.
pub fn point_from_microns(x: i32, y: i32, z: i32) -> Point3 {
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Linear interpolation between two points, `t = 0` at `a`.
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Midpoint of a segment.
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    lerp(a, b, 0.5)
}

/// Round `value` to the nearest multiple of `bucket`.
///
/// Halves round away from zero.
pub fn quantize(value: f64, bucket: f64) -> i64 {
    (value / bucket).round() as i64 * bucket as i64
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis (fore/aft).
    X,
    /// Y axis (up).
    Y,
    /// Z axis (port/starboard).
    Z,
}

impl Axis {
    /// All axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The coordinate of `p` along this axis.
    pub fn coord(self, p: &Point3) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
            Axis::Z => p.z,
        }
    }
}

/// A triangle given by three corners in winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corners in winding order.
    pub corners: [Point3; 3],
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { corners: [a, b, c] }
    }

    /// Same corners, opposite winding.
    pub fn flipped(&self) -> Self {
        let [a, b, c] = self.corners;
        Self::new(a, c, b)
    }

    /// Centroid of the corners.
    pub fn centroid(&self) -> Point3 {
        let [a, b, c] = self.corners;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Unit normal following the right-hand rule, `None` if degenerate.
    pub fn normal(&self) -> Option<Dir3> {
        let [a, b, c] = self.corners;
        let n = (b - a).cross(&(c - a));
        Dir3::try_new(n, Tolerance::DEFAULT.linear)
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.corners;
        0.5 * (b - a).cross(&(c - a)).norm()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in microns.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-6 micron).
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_and_midpoint() {
        let a = point_from_microns(0, 0, 0);
        let b = point_from_microns(10, 20, -30);
        let m = midpoint(&a, &b);
        assert_relative_eq!(m.x, 5.0);
        assert_relative_eq!(m.y, 10.0);
        assert_relative_eq!(m.z, -15.0);
        let q = lerp(&a, &b, 0.25);
        assert_relative_eq!(q.y, 5.0);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(149_999.0, 100_000.0), 100_000);
        assert_eq!(quantize(150_000.0, 100_000.0), 200_000);
        assert_eq!(quantize(0.0, 100_000.0), 0);
        assert_eq!(quantize(49_999.0, 100_000.0), 0);
    }

    #[test]
    fn test_axis_coord() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let coords: Vec<f64> = Axis::ALL.iter().map(|a| a.coord(&p)).collect();
        assert_eq!(coords, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_triangle_normal_and_flip() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let n = t.normal().unwrap();
        assert_relative_eq!(n.z, 1.0);
        let f = t.flipped().normal().unwrap();
        assert_relative_eq!(f.z, -1.0);
        assert_relative_eq!(t.area(), 0.5);
    }

    #[test]
    fn test_degenerate_triangle_has_no_normal() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(t.normal().is_none());
    }

    #[test]
    fn test_centroid() {
        let t = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 3.0),
        );
        let c = t.centroid();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
        assert_relative_eq!(c.z, 1.0);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        assert!(!tol.points_equal(&a, &Point3::new(1.001, 2.0, 3.0)));
        assert!(tol.is_zero(1e-9));
    }
}
