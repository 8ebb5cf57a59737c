//! Event script replay.

use crate::AppError;
use sketchframe_core::scheduler::Instant;
use sketchframe_core::storage::{AutoSaveManager, Storage};
use sketchframe_core::{EditorSession, SessionEvent};

/// Parse a JSON-lines event script. Blank lines and lines starting with `#`
/// are skipped; line numbers in errors are 1-based.
pub fn parse_script(script: &str) -> Result<Vec<SessionEvent>, AppError> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_number, line)| {
            serde_json::from_str(line).map_err(|source| AppError::Script {
                line: line_number,
                source,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub events: usize,
    pub autosaves: usize,
    pub revision: u64,
}

/// Drive `session` with `events`, starting the session clock at `clock`.
///
/// With an autosave manager, every state change is reported to it and due
/// saves are written as the clock advances. The session is torn down at the
/// end, so a gesture still in progress is dropped, and the final state is
/// flushed.
pub fn replay<S: Storage>(
    session: &mut EditorSession,
    events: impl IntoIterator<Item = SessionEvent>,
    mut autosave: Option<&mut AutoSaveManager<S>>,
    mut clock: Instant,
) -> Result<ReplayReport, AppError> {
    let mut report = ReplayReport::default();
    let mut seen_revision = session.revision();

    for event in events {
        session.handle_event(event, &mut clock);
        report.events += 1;

        if let Some(manager) = autosave.as_deref_mut() {
            if session.revision() != seen_revision {
                seen_revision = session.revision();
                manager.notify_changed(session.snapshot(), clock);
            }
            if pollster::block_on(manager.maybe_flush(clock))? {
                report.autosaves += 1;
            }
        }
    }

    session.teardown();
    if let Some(manager) = autosave {
        manager.notify_changed(session.snapshot(), clock);
        if pollster::block_on(manager.flush())? {
            report.autosaves += 1;
        }
    }
    report.revision = session.revision();
    log::info!(
        "replayed {} events, {} autosaves, {} shapes",
        report.events,
        report.autosaves,
        session.document().len()
    );
    Ok(report)
}
