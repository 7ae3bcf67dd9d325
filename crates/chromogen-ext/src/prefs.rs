//! Persistent user preferences, stored as JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Preferences that survive between sessions.
///
/// Missing fields fall back to their defaults, so older files keep loading
/// as new options are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Master switch. When off, the transform action is refused.
    pub enable_extension: bool,
    /// General-purpose integer option exposed in the extension's panel.
    pub num_option: i32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enable_extension: true,
            num_option: 1,
        }
    }
}

impl Preferences {
    /// Load preferences from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no preferences at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(PrefsError::Io(e)),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Write preferences to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        tracing::debug!("saved preferences to {}", path.display());
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed preferences: {0}")]
    Parse(#[from] serde_json::Error),
}
