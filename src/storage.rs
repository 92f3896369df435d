// File: ./src/storage.rs
// Manages dataset persistence on disk.
//
// ⚠️ VERSION BUMP REQUIRED:
// Breaking changes to TimetableDataset or its nested types require
// incrementing DATASET_VERSION below so stale files are detectable.
use crate::model::item::TimetableDataset;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Version history:
// - v1: initial format (generatedAt + groups, "HH:MM" session starts)
pub const DATASET_VERSION: u32 = 1;

#[derive(Serialize)]
struct DatasetFileRef<'a> {
    version: u32,
    #[serde(flatten)]
    dataset: &'a TimetableDataset,
}

#[derive(Deserialize)]
struct DatasetFile {
    #[serde(default)]
    version: u32,
    #[serde(flatten)]
    dataset: TimetableDataset,
}

pub struct DatasetStore;

impl DatasetStore {
    /// Writes the dataset as pretty-printed JSON. The write is atomic (tmp
    /// sibling + rename) so a crash never leaves a half-written dataset.
    pub fn save(path: &Path, dataset: &TimetableDataset) -> Result<()> {
        let file = DatasetFileRef {
            version: DATASET_VERSION,
            dataset,
        };
        let json = serde_json::to_string_pretty(&file)?;
        Self::atomic_write(path, json)
            .with_context(|| format!("Failed to write dataset to {}", path.display()))
    }

    pub fn load(path: &Path) -> Result<TimetableDataset> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset from {}", path.display()))?;
        let file: DatasetFile = serde_json::from_str(&json)
            .with_context(|| format!("{} is not a valid dataset", path.display()))?;
        if file.version > DATASET_VERSION {
            bail!(
                "Dataset version {} is newer than the supported version {}",
                file.version,
                DATASET_VERSION
            );
        }
        Ok(file.dataset)
    }

    fn atomic_write<C: AsRef<[u8]>>(path: &Path, contents: C) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
