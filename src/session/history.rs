use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    foundation::error::{MandalaError, MandalaResult},
    hash::digest::Digest,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub digest: Digest,
    pub timestamp: DateTime<Utc>,
}

/// Stored intentions, newest first. Persisted as a JSON array.
#[derive(Clone, Debug, Default)]
pub struct History {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// History that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file is an empty history.
    pub fn load(path: impl Into<PathBuf>) -> MandalaResult<Self> {
        let path = path.into();
        let text = match std::fs::read_to_string(&path) {
            Ok(v) => v,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    path: Some(path),
                    entries: Vec::new(),
                });
            }
            Err(err) => {
                return Err(MandalaError::persistence(format!(
                    "read history '{}': {err}",
                    path.display()
                )));
            }
        };
        let entries = serde_json::from_str(&text).map_err(|e| {
            MandalaError::persistence(format!("parse history '{}': {e}", path.display()))
        })?;
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry. An exact repeat of the newest entry's text is skipped; returns
    /// whether anything was added.
    pub fn record(&mut self, text: &str, digest: Digest, timestamp: DateTime<Utc>) -> bool {
        if self.entries.first().is_some_and(|e| e.text == text) {
            return false;
        }
        self.entries.insert(
            0,
            HistoryEntry {
                text: text.to_string(),
                digest,
                timestamp,
            },
        );
        true
    }

    pub fn delete(&mut self, index: usize) -> MandalaResult<HistoryEntry> {
        if index >= self.entries.len() {
            return Err(MandalaError::validation(format!(
                "history index {index} out of range (len {})",
                self.entries.len()
            )));
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write to the backing file via a temp file and rename. No-op for in-memory history.
    pub fn save(&self) -> MandalaResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                MandalaError::persistence(format!("create '{}': {e}", parent.display()))
            })?;
        }

        let body = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| MandalaError::serde(e.to_string()))?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, body).map_err(|e| {
            MandalaError::persistence(format!("write '{}': {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, path).map_err(|e| {
            MandalaError::persistence(format!("rename to '{}': {e}", path.display()))
        })
    }
}

/// `<data_local_dir>/intention-mandala/history.json` for the current platform.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("intention-mandala").join("history.json"))
}

#[cfg(test)]
#[path = "../../tests/unit/session/history.rs"]
mod tests;
