//! File I/O operations (save, load, new, export) for designer state.

use std::path::{Path, PathBuf};

use chrono::Utc;

use cabinetkit_core::Result;

use super::DesignerState;
use crate::placement::PlacementEngine;
use crate::renderer::SceneChange;
use crate::serialization::{DesignFile, LoadedDesign, PhotoUpdate};
use crate::snapshot::{
    design_file_name, encode_png, render_elevation, save_snapshot, snapshot_file_name, SnapshotError,
};

impl DesignerState {
    /// Captures the session as a design document.
    pub fn to_design_file(&self) -> DesignFile {
        DesignFile::capture(&self.engine, &self.room)
    }

    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.to_design_file().save_to_file(&path)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Saves into `dir` under a fresh timestamped name and returns the path.
    pub fn save_to_dir(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir
            .as_ref()
            .join(design_file_name(&self.settings.file_stem, Utc::now()));
        self.save_to_file(&path)?;
        Ok(path)
    }

    /// Replaces the session with a parsed document.
    ///
    /// The document is fully validated before anything changes, so a
    /// failed load leaves the current design as it was.
    pub fn load_document(&mut self, design: &DesignFile) -> Result<usize> {
        let loaded = design.restore()?;
        Ok(self.apply_loaded(loaded))
    }

    /// Replaces the session with a JSON design document.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let design = DesignFile::from_json(json)?;
        self.load_document(&design)
    }

    /// Load design from file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let design = DesignFile::load_from_file(&path).map_err(|e| {
            tracing::warn!("Failed to load {}: {}", path.as_ref().display(), e);
            e
        })?;
        let count = self.load_document(&design)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        tracing::info!("Loaded {} cabinets from {}", count, path.as_ref().display());
        Ok(count)
    }

    fn apply_loaded(&mut self, loaded: LoadedDesign) -> usize {
        let count = loaded.cabinets.len();
        self.engine.replace_all(loaded.cabinets);
        match loaded.room_photo {
            PhotoUpdate::Keep => {}
            PhotoUpdate::Clear => {
                self.room.clear_photo();
            }
            PhotoUpdate::Replace(photo) => {
                self.room.install_photo(photo);
            }
        }
        if let Some(feet) = loaded.ceiling_height_ft {
            // already validated while staging
            if let Err(e) = self.room.set_ceiling_height(feet) {
                tracing::warn!("Keeping ceiling height: {}", e);
            }
        }
        self.engine.queue(SceneChange::Room);
        self.sync_form();
        count
    }

    /// Starts over with a single default cabinet. The room photo is
    /// dropped; ceiling height and room visibility are kept.
    pub fn new_design(&mut self) {
        self.engine = PlacementEngine::new();
        self.engine.queue(SceneChange::Cleared);
        if self.room.clear_photo() {
            self.engine.queue(SceneChange::Room);
        }
        self.form = self.settings.cabinet_defaults.clone();
        self.add_initial_cabinet();
        self.current_file_path = None;
        self.is_modified = false;
    }

    /// Mark design as modified.
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Get display name for the design.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Renders the session's snapshot as PNG bytes.
    pub fn snapshot_png(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
        let image = render_elevation(self.engine.cabinets(), &self.room, &self.settings.snapshot)?;
        encode_png(&image)
    }

    /// Exports a PNG snapshot to `path`.
    pub fn export_snapshot(&self, path: impl AsRef<Path>) -> std::result::Result<(), SnapshotError> {
        save_snapshot(path, self.engine.cabinets(), &self.room, &self.settings.snapshot)
    }

    /// Exports a PNG snapshot into `dir` under a fresh timestamped name.
    pub fn export_snapshot_to_dir(
        &self,
        dir: impl AsRef<Path>,
    ) -> std::result::Result<PathBuf, SnapshotError> {
        let path = dir
            .as_ref()
            .join(snapshot_file_name(&self.settings.file_stem, Utc::now()));
        self.export_snapshot(&path)?;
        Ok(path)
    }
}
