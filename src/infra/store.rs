// src/infra/store.rs — Persisted session snapshot (single JSON slot)

use std::fs;
use std::path::PathBuf;

use crate::core::state::SessionSnapshot;
use crate::infra::errors::FicharError;
use crate::infra::paths;

/// One named slot holding the serialized snapshot. Read once at startup,
/// written after every successful transition commit.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default() -> Self {
        Self::new(paths::state_file_path())
    }

    /// A missing file is a fresh install and yields the Outside defaults;
    /// a file that exists but does not parse is a persistence error.
    pub fn load(&self) -> Result<SessionSnapshot, FicharError> {
        if !self.path.exists() {
            return Ok(SessionSnapshot::default());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            FicharError::Persistence(format!(
                "corrupt state file {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Write-to-temp then rename, so a crash mid-write never corrupts the
    /// last committed snapshot.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), FicharError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| FicharError::Persistence(format!("serialize snapshot: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
