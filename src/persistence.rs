//! Persistence: the whole coaster collection as one JSON file.
//!
//! Every save rewrites the file. Writes go to a sibling temp file that is renamed over
//! the target, so readers see either the old document or the new one.

use crate::error::{RegistryError, RegistryResult};
use crate::types::Coaster;
use log::{debug, warn};
use rand::Rng;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-based store: one JSON array of coasters. A missing file is an empty store.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all coasters. Returns an empty vec if the file does not exist.
    pub fn load(&self) -> RegistryResult<Vec<Coaster>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data).map_err(|source| {
            warn!("corrupt store path={} error={}", self.path.display(), source);
            RegistryError::CorruptData {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Save all coasters, replacing the file contents.
    pub fn save(&self, coasters: &[Coaster]) -> RegistryResult<()> {
        let json = serde_json::to_string_pretty(coasters).map_err(RegistryError::Serialize)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.temp_path();
        let written = write_synced(&tmp, json.as_bytes())
            .and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!("store saved path={} coasters={}", self.path.display(), coasters.len());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("coasters.json");
        let suffix: u64 = rand::thread_rng().gen();
        self.path.with_file_name(format!("{}.{:016x}.tmp", name, suffix))
    }
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
