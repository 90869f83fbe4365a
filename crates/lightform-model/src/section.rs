//! Coarse structural zones of the sculpture.

use lightform_math::{Point3, Triangle};
use serde::Serialize;

/// Structural zone a panel belongs to.
///
/// +x is fore, +z is starboard. Panels touching the `z = 0` centerline
/// belong to the fore or aft zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Section {
    /// On the centerline, forward half.
    Fore,
    /// On the centerline, aft half.
    Aft,
    /// Port side, forward half.
    PortFore,
    /// Port side, aft half.
    PortAft,
    /// Starboard side, forward half.
    StarboardFore,
    /// Starboard side, aft half.
    StarboardAft,
}

impl Section {
    /// All sections.
    pub const ALL: [Section; 6] = [
        Section::Fore,
        Section::Aft,
        Section::PortFore,
        Section::PortAft,
        Section::StarboardFore,
        Section::StarboardAft,
    ];

    /// Sections shown on the left when viewing the starboard side.
    ///
    /// There are no single-panel starboard zones; every starboard panel
    /// falls in one of the two halves.
    pub const LEFT: [Section; 2] = [Section::StarboardAft, Section::Aft];

    /// Sections shown on the right when viewing the starboard side.
    pub const RIGHT: [Section; 2] = [Section::StarboardFore, Section::Fore];

    /// Classify a triangle by its corners and centroid.
    pub fn classify(triangle: &Triangle) -> Self {
        let zs = triangle.corners.map(|p: Point3| p.z);
        let min_z = zs.iter().copied().fold(f64::INFINITY, f64::min);
        let max_z = zs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let fore = triangle.centroid().x >= 0.0;

        if min_z <= 0.0 && max_z >= 0.0 {
            if fore {
                Section::Fore
            } else {
                Section::Aft
            }
        } else if min_z > 0.0 {
            if fore {
                Section::StarboardFore
            } else {
                Section::StarboardAft
            }
        } else if fore {
            Section::PortFore
        } else {
            Section::PortAft
        }
    }
}
