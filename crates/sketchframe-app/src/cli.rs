//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchframe", about = "Headless SketchFrame canvas: replay input, list and export frames")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Feed a JSON-lines event script through an editor session.
    Replay {
        /// One session event per line; blank lines and `#` comments are skipped.
        script: PathBuf,
        /// Project to start from instead of an empty canvas.
        #[arg(long)]
        project: Option<PathBuf>,
        /// Where to write the resulting project. Printed to stdout when absent.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Editor configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Autosave into this directory while replaying.
        #[arg(long)]
        autosave_dir: Option<PathBuf>,
        /// Project id used for autosave files.
        #[arg(long, default_value = "untitled")]
        project_id: String,
    },
    /// Rasterize one frame of a project to PNG.
    Export {
        project: PathBuf,
        frame_id: String,
        out: PathBuf,
    },
    /// List the frames of a project.
    Frames {
        project: PathBuf,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}
