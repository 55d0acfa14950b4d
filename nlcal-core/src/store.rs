use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::event::EventRecord;

/// Events kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonEventStore {
    path: PathBuf,
}

impl JsonEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored event. A missing file is an empty calendar.
    pub fn load(&self) -> Result<Vec<EventRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no events file yet");
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&s).with_context(|| format!("parsing {}", self.path.display()))
    }

    /// Replaces the stored events, creating parent directories as needed.
    pub fn save(&self, records: &[EventRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }
        let mut s = serde_json::to_string_pretty(records).context("serializing events")?;
        s.push('\n');
        fs::write(&self.path, s).with_context(|| format!("writing {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = records.len(), "saved events");
        Ok(())
    }
}
