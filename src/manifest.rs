//! Append-only record of the actions taken by organizing runs.
//!
//! The manifest is a JSON Lines file: one [`ActionRecord`] per line, e.g.
//!
//! ```text
//! {"timestamp":"2026-10-16T09:12:03.118Z","source":"/dl/report.pdf","destination":"/dl/Documents/report.pdf","category":"Documents","mode":"applied"}
//! ```
//!
//! Records are collected during a run and written in one pass at the end.
//! Existing content is never rewritten; later runs append.

use crate::error::{OrganizeError, OrganizeResult};
use crate::organizer::ActionRecord;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default manifest file name, created inside the target directory.
pub const MANIFEST_FILE_NAME: &str = ".folder-sorter-manifest.jsonl";

/// Records collected for one run, plus where they will be written.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    records: Vec<ActionRecord>,
}

impl Manifest {
    /// Creates an empty manifest that will be written to `path`.
    ///
    /// Nothing touches the filesystem until [`Manifest::write`].
    ///
    /// # Example
    ///
    /// ```
    /// use folder_sorter::Manifest;
    ///
    /// let manifest = Manifest::new("/tmp/actions.jsonl");
    /// assert!(manifest.is_empty());
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Returns the default manifest location for a target directory.
    pub fn default_path(target: &Path) -> PathBuf {
        target.join(MANIFEST_FILE_NAME)
    }

    /// Where the records will be appended.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records collected so far, in processing order.
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    /// Queues a record for the next [`Manifest::write`].
    pub fn push(&mut self, record: ActionRecord) {
        self.records.push(record);
    }

    /// Number of queued records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends all collected records to the manifest file, creating it if
    /// needed. Returns the number of records written.
    pub fn write(&self) -> OrganizeResult<usize> {
        self.write_records().map_err(|source| OrganizeError::ManifestWrite {
            path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            records = self.records.len(),
            "Manifest written"
        );
        Ok(self.records.len())
    }

    fn write_records(&self) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        for record in &self.records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Reads every record from an existing manifest file.
    ///
    /// Blank lines are ignored; any malformed line is an error.
    pub fn read(path: &Path) -> OrganizeResult<Vec<ActionRecord>> {
        let content = fs::read_to_string(path).map_err(|e| OrganizeError::ManifestRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| OrganizeError::ManifestRead {
                    path: path.to_path_buf(),
                    reason: format!("line {}: {}", index + 1, e),
                })
            })
            .collect()
    }
}
