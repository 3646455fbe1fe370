//! Koala layout CLI
//!
//! Usage:
//!   koala [OPTIONS] <COMMAND>
//!
//! Commands:
//!   layout  Lay out a scene and print every component's bounds
//!   infer   Infer a grid from a scene's component bounds
//!   snap    Print the grid cell a drop at a pixel position targets
//!
//! Options:
//!   -v, --verbose  Log layout decisions (repeat for more detail)
//!   -h, --help     Print help

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use koala_layout::{infer_scene, layout_scene, snap_scene, Point, Scene};

#[derive(Parser)]
#[command(name = "koala")]
#[command(about = "Cell-based grid layout for component scenes")]
struct Cli {
    /// Log layout decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a scene and print every component's bounds
    Layout {
        /// Scene file (TOML)
        scene: PathBuf,
    },
    /// Infer a grid and constraints from the components' current bounds
    Infer {
        /// Scene file (TOML)
        scene: PathBuf,
    },
    /// Print the grid cell a drop at a pixel position targets
    Snap {
        /// Scene file (TOML)
        scene: PathBuf,
        #[arg(short, long, allow_negative_numbers = true)]
        x: i32,
        #[arg(short, long, allow_negative_numbers = true)]
        y: i32,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "koala_layout=debug",
        _ => "koala_layout=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

fn load(path: &Path) -> Scene {
    match Scene::from_file(path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error loading scene '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match &cli.command {
        Command::Layout { scene } => layout_scene(&load(scene)).map(|report| report.to_string()),
        Command::Infer { scene } => infer_scene(&load(scene)).and_then(|inferred| {
            inferred.to_toml().map_err(koala_layout::Error::from)
        }),
        Command::Snap { scene, x, y } => snap_scene(&load(scene), Point::new(*x, *y))
            .map(|cell| format!("column={} row={}", cell.column, cell.row)),
    };

    match output {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
