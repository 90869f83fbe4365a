//! lightform CLI - inspect and validate sculpture models
//!
//! Loads a model directory and prints a summary, a JSON dump, or just
//! reports whether it loads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightform_math::Axis;
use lightform_model::{LoaderConfig, Model, ModelBuilder, Section};

mod dump;

#[derive(Parser)]
#[command(name = "lightform")]
#[command(about = "Inspect LED sculpture model directories", long_about = None)]
struct Cli {
    /// TOML loader configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a model
    Info {
        /// Model directory
        dir: PathBuf,
    },
    /// Write the loaded model as JSON
    Dump {
        /// Model directory
        dir: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include pixel positions
        #[arg(long)]
        points: bool,
    },
    /// Load a model and report any error
    Check {
        /// Model directory
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => LoaderConfig::default(),
    };

    match cli.command {
        Commands::Info { dir } => {
            let model = load(&dir, config)?;
            show_info(&model);
        }
        Commands::Dump {
            dir,
            output,
            points,
        } => {
            let model = load(&dir, config)?;
            let json = serde_json::to_string_pretty(&dump::ModelDump::new(&model, points))?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Check { dir } => {
            let model = load(&dir, config)?;
            println!("{}: ok", model.name());
        }
    }

    Ok(())
}

fn load(dir: &Path, config: LoaderConfig) -> Result<Model> {
    ModelBuilder::new(dir)
        .with_config(config)
        .build()
        .with_context(|| format!("loading model from {}", dir.display()))
}

fn show_info(model: &Model) {
    println!("Model: {}", model.name());
    println!("  Vertices: {}", model.graph().vertices.len());
    println!(
        "  Edges: {} ({} dark)",
        model.edge_count(),
        model.edges().filter(|(_, e)| e.is_dark()).count()
    );
    println!("  Panels: {}", model.panel_count());
    println!("  Lasers: {}", model.lasers().len());
    println!("  Boxes: {}", model.boxes().len());
    println!("  Symmetry groups: {}", model.symmetry_groups().count());
    println!(
        "  Pixels: {} ({} edge, {} panel)",
        model.points().len(),
        model.edge_points().len(),
        model.panel_points().len()
    );
    println!("  Bindings: {}", model.bindings().len());

    println!();
    println!("Sections:");
    for section in Section::ALL {
        let count = model.panels_in_section(section).count();
        if count > 0 {
            println!("  {section:?}: {count}");
        }
    }

    println!();
    println!("Flavors:");
    for (flavor, count) in model.flavors() {
        println!("  {flavor}: {count}");
    }

    println!();
    println!("Boundaries:");
    for axis in Axis::ALL {
        let (min, max) = model.boundaries().range(axis);
        println!("  {axis:?}: {min} .. {max}");
    }
}
