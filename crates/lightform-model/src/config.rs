//! Loader configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Names of the input files inside a model directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    /// `name: <value>` metadata.
    pub general: String,
    /// 8-point boxes.
    pub boxes: String,
    /// Vertex catalog.
    pub vertexes: String,
    /// Laser positions.
    pub lasers: String,
    /// Edge list.
    pub edges: String,
    /// Panel signal-path table.
    pub signal_paths: String,
    /// Striping instructions.
    pub striping: String,
    /// Panel list.
    pub panels: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            general: "general.txt".into(),
            boxes: "boxes.txt".into(),
            vertexes: "vertexes.txt".into(),
            lasers: "lasers.txt".into(),
            edges: "edges.txt".into(),
            signal_paths: "panel_signal_paths.tsv".into(),
            striping: "striping-instructions.txt".into(),
            panels: "panels.txt".into(),
        }
    }
}

/// Parameters for loading a sculpture model.
///
/// All distances are in microns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Input file names.
    pub files: FileNames,
    /// Edge strip density (60 LEDs per meter).
    pub leds_per_micron: f64,
    /// Spacing between pixels along a panel row.
    pub pixel_pitch: f64,
    /// Spacing between panel rows.
    pub row_pitch: f64,
    /// Bucket size for symmetry grouping (one decimeter).
    pub symmetry_bucket: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            files: FileNames::default(),
            leds_per_micron: 0.000_06,
            pixel_pitch: 1_000_000.0 / 60.0,
            row_pitch: 50_000.0,
            symmetry_bucket: 100_000.0,
        }
    }
}

impl LoaderConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| LoadError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("leds_per_micron", self.leds_per_micron),
            ("pixel_pitch", self.pixel_pitch),
            ("row_pitch", self.row_pitch),
            ("symmetry_bucket", self.symmetry_bucket),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LoadError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
