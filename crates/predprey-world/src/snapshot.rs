//! Save and restore grid state.

use crate::grid::Grid;
use predprey_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Steps completed when the snapshot was taken
    pub step: u64,
    pub seed: u64,
    pub grid: Grid,
}

impl Snapshot {
    pub fn new(step: u64, seed: u64, grid: Grid) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            step,
            seed,
            grid,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::Validation(format!(
                "Unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        snapshot.grid.validate()?;
        Ok(snapshot)
    }

    /// Write the snapshot, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        info!(path = %path.display(), step = self.step, "Snapshot written");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let snapshot = Self::from_bytes(&bytes)?;
        info!(path = %path.display(), step = snapshot.step, "Snapshot loaded");
        Ok(snapshot)
    }
}
