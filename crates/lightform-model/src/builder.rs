//! Staged model assembly.
//!
//! Stages run strictly in order, each depending on the last:
//! metadata, boxes, vertices, lasers, edges, signal paths, striping, panels,
//! point aggregation, symmetry, boundaries. The first failure aborts the
//! load and nothing is returned.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::path::{Path, PathBuf};

use lightform_math::{Axis, Point3};

use crate::boundary::Boundaries;
use crate::boxes::parse_boxes;
use crate::config::LoaderConfig;
use crate::edge::load_edges;
use crate::error::{LoadError, Result};
use crate::general::parse_general;
use crate::graph::Graph;
use crate::laser::parse_lasers;
use crate::model::Model;
use crate::output::{BindingLog, OutputBinder};
use crate::panel::load_panels;
use crate::source::SourceFile;
use crate::striping::{parse_signal_paths, parse_striping};
use crate::symmetry::index_symmetry;
use crate::vertex::load_vertexes;

/// Where the input files come from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// A directory holding one file per concern.
    Directory(PathBuf),
    /// In-memory file contents keyed by file name.
    Memory(HashMap<String, String>),
}

impl ModelSource {
    fn fetch(&self, name: &str) -> Result<SourceFile> {
        match self {
            ModelSource::Directory(dir) => SourceFile::read(dir, name),
            ModelSource::Memory(files) => files
                .get(name)
                .map(|text| SourceFile::from_text(name, text.as_str()))
                .ok_or_else(|| LoadError::Missing {
                    path: PathBuf::from(name),
                }),
        }
    }
}

/// Builds a [`Model`] from a set of input files.
///
/// # Example
///
/// ```no_run
/// use lightform_model::ModelBuilder;
///
/// let model = ModelBuilder::new("resources/vehicle").build().unwrap();
/// println!("{} has {} panels", model.name(), model.panel_count());
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    source: ModelSource,
    config: LoaderConfig,
}

impl ModelBuilder {
    /// Load from a model directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: ModelSource::Directory(dir.into()),
            config: LoaderConfig::default(),
        }
    }

    /// Load from in-memory file contents.
    pub fn from_memory<N, T>(files: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            source: ModelSource::Memory(
                files
                    .into_iter()
                    .map(|(n, t)| (n.into(), t.into()))
                    .collect(),
            ),
            config: LoaderConfig::default(),
        }
    }

    /// Replace the loader configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the model, recording controller bindings on it.
    pub fn build(self) -> Result<Model> {
        self.assemble()
    }

    /// Build the model and, once it is complete, replay every controller
    /// binding into `binder` in load order.
    ///
    /// A failed load makes no calls on `binder`.
    pub fn build_with(self, binder: &mut dyn OutputBinder) -> Result<Model> {
        let model = self.assemble()?;
        for b in &model.bindings {
            binder.bind(b.entity, &b.address, b.forward);
        }
        Ok(model)
    }

    fn assemble(self) -> Result<Model> {
        self.config.validate()?;
        let files = &self.config.files;
        let mut bindings = BindingLog::default();

        let name = parse_general(&self.source.fetch(&files.general)?)?;
        let boxes = parse_boxes(&self.source.fetch(&files.boxes)?)?;

        let mut graph = Graph::new();
        load_vertexes(&mut graph, &self.source.fetch(&files.vertexes)?)?;

        let lasers = parse_lasers(&self.source.fetch(&files.lasers)?)?;

        load_edges(
            &mut graph,
            &self.source.fetch(&files.edges)?,
            &self.config,
            &mut bindings,
        )?;

        let start_vertexes = parse_signal_paths(&self.source.fetch(&files.signal_paths)?)?;
        let striping = parse_striping(&self.source.fetch(&files.striping)?, &start_vertexes)?;
        load_panels(
            &mut graph,
            &self.source.fetch(&files.panels)?,
            &striping,
            &self.config,
            &mut bindings,
        )?;

        let (points, edge_pixels, panel_pixels) = aggregate_points(&mut graph);
        index_symmetry(&mut graph, self.config.symmetry_bucket);
        let boundaries = Boundaries::from_points(&points)?;

        let mut sections: BTreeMap<_, Vec<_>> = BTreeMap::new();
        let mut flavors: BTreeMap<String, Vec<_>> = BTreeMap::new();
        for (pid, panel) in &graph.panels {
            sections.entry(panel.section).or_default().push(pid);
            flavors.entry(panel.flavor.clone()).or_default().push(pid);
        }

        let laser_index = lasers
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.clone(), i))
            .collect();

        let model = Model {
            name,
            graph,
            lasers,
            laser_index,
            boxes,
            sections,
            flavors,
            points,
            edge_pixels,
            panel_pixels,
            boundaries,
            bindings: bindings.bindings,
        };
        log_summary(&model);
        Ok(model)
    }
}

/// Load the model in `dir` with default settings.
pub fn load_model(dir: impl AsRef<Path>) -> Result<Model> {
    ModelBuilder::new(dir.as_ref()).build()
}

/// Concatenate edge pixels then panel pixels, assigning each entity its
/// index range.
fn aggregate_points(graph: &mut Graph) -> (Vec<Point3>, Range<usize>, Range<usize>) {
    let mut points = Vec::new();

    for edge in graph.edges.values_mut() {
        let start = points.len();
        points.extend_from_slice(&edge.points);
        edge.pixels = start..points.len();
    }
    let edge_end = points.len();

    for panel in graph.panels.values_mut() {
        let start = points.len();
        points.extend_from_slice(&panel.points);
        panel.pixels = start..points.len();
    }
    let panel_end = points.len();

    (points, 0..edge_end, edge_end..panel_end)
}

fn log_summary(model: &Model) {
    let b = model.boundaries();
    for axis in Axis::ALL {
        let (min, max) = b.range(axis);
        log::info!("{axis:?} boundaries: min {min}, max {max}");
    }
    log::info!(
        "{} loaded. {} vertexes, {} edges, {} panels, {} pixels",
        model.name(),
        model.graph().vertices.len(),
        model.edge_count(),
        model.panel_count(),
        model.points().len()
    );
    for (flavor, count) in model.flavors() {
        log::debug!("Panels of flavor {flavor}: {count}");
    }
}
