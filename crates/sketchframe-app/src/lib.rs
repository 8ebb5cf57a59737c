//! SketchFrame headless shell.
//!
//! Binds the interaction engine to files: replays recorded input scripts,
//! lists frames and exports them as PNG.

mod cli;
pub mod project;
pub mod replay;

pub use cli::{Cli, Command};

use sketchframe_core::scheduler::{Duration, Instant};
use sketchframe_core::storage::{AutoSaveManager, FileStorage, MemoryStorage, StorageError};
use sketchframe_core::{ConfigError, EditorConfig, EditorSession};
use sketchframe_render::{RenderError, export_frame_png};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },
    #[error("Invalid project {path}: {source}")]
    Project { path: String, source: serde_json::Error },
    #[error("Invalid event on line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Output failed: {0}")]
    Output(#[from] std::io::Error),
}

/// Execute a parsed command, writing human-readable results to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<(), AppError> {
    match cli.command {
        Command::Replay {
            script,
            project,
            out: project_out,
            config,
            autosave_dir,
            project_id,
        } => run_replay(
            &script,
            project.as_deref(),
            project_out.as_deref(),
            config.as_deref(),
            autosave_dir,
            project_id,
            out,
        ),
        Command::Export {
            project,
            frame_id,
            out: png_out,
        } => {
            let document = project::load_document(&project)?;
            let png = export_frame_png(&document, &frame_id)?;
            project::write_file(&png_out, &png)?;
            writeln!(out, "wrote {} bytes to {}", png.len(), png_out.display())?;
            Ok(())
        }
        Command::Frames { project, json } => {
            let document = project::load_document(&project)?;
            let frames = project::frame_summaries(&document);
            if json {
                let text = serde_json::to_string_pretty(&frames).map_err(|source| AppError::Project {
                    path: project.display().to_string(),
                    source,
                })?;
                writeln!(out, "{text}")?;
            } else {
                for frame in &frames {
                    writeln!(
                        out,
                        "{}\t{}\t{}x{}\t{} shapes",
                        frame.id,
                        frame.label,
                        frame.bounds.width(),
                        frame.bounds.height(),
                        frame.contained
                    )?;
                }
            }
            Ok(())
        }
    }
}

fn run_replay(
    script: &Path,
    project_in: Option<&Path>,
    project_out: Option<&Path>,
    config_path: Option<&Path>,
    autosave_dir: Option<PathBuf>,
    project_id: String,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let config = match config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let debounce = Duration::from_millis(config.autosave_debounce_ms);
    let mut session = match project_in {
        Some(path) => EditorSession::from_snapshot(config, project::read_project(path)?),
        None => EditorSession::new(config),
    };

    let text = std::fs::read_to_string(script).map_err(|source| AppError::Read {
        path: script.display().to_string(),
        source,
    })?;
    let events = replay::parse_script(&text)?;

    let report = match autosave_dir {
        Some(dir) => {
            let mut manager = AutoSaveManager::new(Arc::new(FileStorage::new(dir)?));
            manager.set_debounce(debounce);
            manager.set_project_id(project_id);
            replay::replay(&mut session, events, Some(&mut manager), Instant::now())?
        }
        None => replay::replay::<MemoryStorage>(&mut session, events, None, Instant::now())?,
    };

    let snapshot = session.snapshot();
    match project_out {
        Some(path) => {
            project::write_project(path, &snapshot)?;
            writeln!(
                out,
                "replayed {} events ({} autosaves), {} shapes written to {}",
                report.events,
                report.autosaves,
                session.document().len(),
                path.display()
            )?;
        }
        None => {
            let json = snapshot.to_json_pretty().map_err(|source| AppError::Project {
                path: "<stdout>".to_string(),
                source,
            })?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
