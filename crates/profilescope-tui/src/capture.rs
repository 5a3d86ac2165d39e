// Snapshot capture of the result card
use std::path::{Path, PathBuf};

use anyhow::Context;
use ratatui::buffer::Buffer;
use tracing::{info, warn};

use crate::{ui, App};

/// Turns a rendered surface into a file the user can keep
pub trait SurfaceCapture {
    fn capture(&mut self, surface: &Buffer) -> anyhow::Result<PathBuf>;
}

/// Writes the surface as plain text rows
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SurfaceCapture for SnapshotWriter {
    fn capture(&mut self, surface: &Buffer) -> anyhow::Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let mut contents = ui::buffer_lines(surface).join("\n");
        contents.push('\n');

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(self.path.clone())
    }
}

/// Render the card without its chrome and hand it to the capture
///
/// The chrome comes back once the capture returns, whatever the outcome.
/// The result is reported on the status line.
pub fn export_snapshot(app: &mut App, capture: &mut dyn SurfaceCapture) {
    if !app.can_export() {
        app.status_message = Some("Nothing to export yet".to_string());
        return;
    }

    let result = {
        let guard = app.hide_chrome();
        let surface = ui::render_offscreen(&guard);
        capture.capture(&surface)
    };

    app.status_message = Some(match result {
        Ok(path) => {
            info!("Snapshot written to {}", path.display());
            format!("Snapshot saved to {}", path.display())
        }
        Err(e) => {
            warn!("Snapshot failed: {:#}", e);
            format!("Snapshot failed: {:#}", e)
        }
    });
}
