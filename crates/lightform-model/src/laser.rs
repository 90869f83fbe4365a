//! Lasers and their aiming behavior.

use std::collections::HashMap;
use std::fmt;

use lightform_math::{point_from_microns, Dir3, Point3, Tolerance};

use crate::error::{LoadError, Result};
use crate::source::SourceFile;

/// Aiming behavior attached to a laser.
pub trait LaserControl: fmt::Debug + Send + Sync {
    /// Where the laser points at `time` seconds.
    fn target(&self, time: f64) -> Point3;

    /// Unit beam direction from `origin` at `time`, `None` if the target
    /// coincides with the origin.
    fn direction(&self, origin: &Point3, time: f64) -> Option<Dir3> {
        Dir3::try_new(self.target(time) - origin, Tolerance::DEFAULT.linear)
    }
}

/// Sweeps the target around a horizontal circle.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingTarget {
    /// Center of the sweep.
    pub center: Point3,
    /// Sweep radius in microns.
    pub radius: f64,
    /// Seconds per revolution.
    pub period: f64,
}

impl Default for MovingTarget {
    fn default() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1_000_000.0,
            period: 10.0,
        }
    }
}

impl LaserControl for MovingTarget {
    fn target(&self, time: f64) -> Point3 {
        let angle = std::f64::consts::TAU * time / self.period;
        let (s, c) = angle.sin_cos();
        Point3::new(
            self.center.x + self.radius * c,
            self.center.y,
            self.center.z + self.radius * s,
        )
    }
}

/// A laser mounted on the sculpture.
#[derive(Debug)]
pub struct Laser {
    /// Laser id.
    pub id: String,
    /// Mount position in microns.
    pub position: Point3,
    /// Aiming behavior.
    pub control: Box<dyn LaserControl>,
}

impl Laser {
    /// Beam direction at `time`.
    pub fn direction(&self, time: f64) -> Option<Dir3> {
        self.control.direction(&self.position, time)
    }
}

/// Parse the laser file: tab-separated `id x y z`, each id once.
pub fn parse_lasers(file: &SourceFile) -> Result<Vec<Laser>> {
    let mut lasers = Vec::new();
    let mut first_lines: HashMap<&str, usize> = HashMap::new();
    for line in file.lines() {
        let fields = line.tab_fields(4)?;
        let id = fields[0];
        if let Some(&first_line) = first_lines.get(id) {
            return Err(LoadError::DuplicateId {
                at: line.location(),
                kind: "laser",
                id: id.to_string(),
                first_line,
            });
        }
        first_lines.insert(id, line.location().line);
        lasers.push(Laser {
            id: id.to_string(),
            position: point_from_microns(
                line.int(fields[1])?,
                line.int(fields[2])?,
                line.int(fields[3])?,
            ),
            control: Box::new(MovingTarget::default()),
        });
    }
    Ok(lasers)
}
