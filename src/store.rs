//! The save slot: one JSON file holding the last game state.

use derive_more::{Display, Error};
use derive_new::new;
use sholo_core::{Snapshot, TurnEngine};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Failure writing the save slot.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A single named file the game is saved to and reloaded from.
#[derive(Debug, Clone, new)]
pub struct SaveSlot {
    #[new(into)]
    path: PathBuf,
}

impl SaveSlot {
    /// Location of the slot on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `snapshot` to the slot, replacing what was there.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        std::fs::write(&self.path, snapshot.to_json())
            .map_err(|e| StoreError::new(format!("Failed to write save slot: {}", e)))?;
        debug!(pieces = snapshot.pieces().len(), "Game saved");
        Ok(())
    }

    /// Reads the slot. Missing or unparsable data yields `None`.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "No saved game");
                return None;
            }
        };
        match Snapshot::from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "Ignoring corrupt save slot");
                None
            }
        }
    }

    /// Restores the saved game into `engine`, or resets it when the slot is
    /// empty, corrupt or does not fit the board. Returns true if a saved
    /// game was loaded.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load_into(&self, engine: &mut TurnEngine) -> bool {
        match self.load() {
            Some(snapshot) => {
                let restored = engine.restore_or_reset(&snapshot);
                if restored {
                    info!(player = %engine.current_player(), "Saved game loaded");
                }
                restored
            }
            None => {
                engine.reset();
                false
            }
        }
    }

    /// Saves, logging instead of failing. Used after every state change.
    pub fn save_quietly(&self, snapshot: &Snapshot) {
        if let Err(e) = self.save(snapshot) {
            warn!(error = %e, "Could not save game");
        }
    }
}
