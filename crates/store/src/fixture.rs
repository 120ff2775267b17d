//! JSON fixture loading for tests and offline development.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::row::{LotRow, MaterialRow, MovementRow};
use crate::snapshot::Snapshot;

/// On-disk fixture shape: one JSON document holding all three row arrays.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub materials: Vec<MaterialRow>,
    #[serde(default)]
    pub lots: Vec<LotRow>,
    #[serde(default)]
    pub movements: Vec<MovementRow>,
}

impl FixtureFile {
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::from_rows(self.materials, self.lots, self.movements, Utc::now())
    }
}

/// Parse a fixture from a JSON string.
pub fn snapshot_from_json(json: &str) -> anyhow::Result<Snapshot> {
    let fixture: FixtureFile =
        serde_json::from_str(json).context("failed to parse snapshot fixture JSON")?;
    Ok(fixture.into_snapshot())
}

/// Load a fixture from disk.
pub fn snapshot_from_file(path: impl AsRef<Path>) -> anyhow::Result<Snapshot> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot fixture at {}", path.display()))?;
    snapshot_from_json(&raw)
}
