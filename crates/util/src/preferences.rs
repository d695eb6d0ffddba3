//! Shortcut preference persistence for storynav.
//!
//! Users can rebind sidebar shortcuts; the bindings are stored in a small JSON
//! file under the standard configuration directory
//! (`~/.config/storynav/shortcuts.json` on most platforms). The store is safe to
//! read and write from multiple threads thanks to the internal `Mutex`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use storynav_types::{KeyCombo, ShortcutAction, ShortcutKeys};
use thiserror::Error;
use tracing::{debug, warn};

use crate::expand_tilde;

/// Environment variable allowing callers to override the shortcuts file path.
pub const SHORTCUTS_PATH_ENV: &str = "STORYNAV_SHORTCUTS_PATH";

/// Default filename for the JSON payload.
pub const SHORTCUTS_FILE_NAME: &str = "shortcuts.json";

/// Error surfaced when reading or writing shortcut preferences fails.
#[derive(Debug, Error)]
pub enum ShortcutPreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("shortcut preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("shortcut preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted shortcut bindings. Actions missing from the file keep their defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct ShortcutsPayload {
    #[serde(default)]
    shortcuts: ShortcutKeys,
}

/// Thread-safe shortcut store backed by a JSON file.
#[derive(Debug, Default)]
pub struct ShortcutPreferences {
    path: PathBuf,
    payload: Mutex<ShortcutsPayload>,
    persist_to_disk: bool,
}

impl ShortcutPreferences {
    /// Opens the store at the default location, honoring [`SHORTCUTS_PATH_ENV`].
    pub fn new() -> Result<Self, ShortcutPreferencesError> {
        Self::open(default_shortcuts_path())
    }

    /// Opens the store at an explicit path.
    pub fn open(path: PathBuf) -> Result<Self, ShortcutPreferencesError> {
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(ShortcutsPayload::default()),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current bindings: defaults with the user's overrides applied.
    pub fn shortcut_keys(&self) -> ShortcutKeys {
        self.payload.lock().expect("shortcut preferences lock poisoned").shortcuts.clone()
    }

    /// Rebinds one action and persists the result.
    pub fn set_shortcut(&self, action: ShortcutAction, combo: KeyCombo) -> Result<(), ShortcutPreferencesError> {
        debug!(action = %action, combo = %combo, "rebinding shortcut");
        self.update(|payload| payload.shortcuts.set(action, combo))
    }

    /// Drops every override and persists the default table.
    pub fn restore_defaults(&self) -> Result<(), ShortcutPreferencesError> {
        self.update(|payload| payload.shortcuts = ShortcutKeys::default())
    }

    /// Applies `change` to a copy of the payload; memory only moves forward once
    /// the copy is on disk.
    fn update(&self, change: impl FnOnce(&mut ShortcutsPayload)) -> Result<(), ShortcutPreferencesError> {
        let mut payload = self.payload.lock().expect("shortcut preferences lock poisoned");
        let mut next = payload.clone();
        change(&mut next);
        self.persist(&next)?;
        *payload = next;
        Ok(())
    }

    fn persist(&self, payload: &ShortcutsPayload) -> Result<(), ShortcutPreferencesError> {
        if !self.persist_to_disk {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn default_shortcuts_path() -> PathBuf {
    if let Ok(path) = env::var(SHORTCUTS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storynav")
        .join(SHORTCUTS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<ShortcutsPayload, ShortcutPreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse shortcuts file; using defaults"
                );
                Ok(ShortcutsPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(ShortcutsPayload::default()),
        Err(error) => Err(ShortcutPreferencesError::Io(error)),
    }
}
