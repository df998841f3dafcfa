use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::Result;
use crate::types::AlbumRecord;

/// A dataset reader for line-delimited JSON album snapshots.
///
/// Each non-blank line is one [`AlbumRecord`].
#[derive(Debug)]
pub struct JsonlDataset {
    path: PathBuf,
}

impl JsonlDataset {
    /// Create a new dataset reader for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this reader points at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate over records in the dataset.
    pub fn iter(&self) -> Result<impl Iterator<Item = Result<AlbumRecord>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        Ok(reader
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|line| {
                let line = line?;
                let record: AlbumRecord = serde_json::from_str(&line)?;
                Ok(record)
            }))
    }

    /// Read every record into memory.
    pub fn load(&self) -> Result<Vec<AlbumRecord>> {
        let records = self.iter()?.collect::<Result<Vec<_>>>()?;
        info!("Loaded {} album rows from {}", records.len(), self.path.display());
        Ok(records)
    }
}

/// Where album rows come from: an in-memory table or a named file.
#[derive(Debug)]
pub enum DatasetSource {
    /// Rows already in memory.
    Records(Vec<AlbumRecord>),
    /// A JSONL snapshot on disk.
    Jsonl(PathBuf),
}

impl DatasetSource {
    /// Materialize the rows.
    pub fn load(self) -> Result<Vec<AlbumRecord>> {
        match self {
            DatasetSource::Records(records) => Ok(records),
            DatasetSource::Jsonl(path) => JsonlDataset::new(path).load(),
        }
    }
}

impl From<Vec<AlbumRecord>> for DatasetSource {
    fn from(records: Vec<AlbumRecord>) -> Self {
        DatasetSource::Records(records)
    }
}

impl From<PathBuf> for DatasetSource {
    fn from(path: PathBuf) -> Self {
        DatasetSource::Jsonl(path)
    }
}
