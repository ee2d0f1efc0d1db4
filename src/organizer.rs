//! Sorting the direct children of a directory into category subfolders.
//!
//! Each regular file goes through the same linear pipeline:
//! classify → (create category directory) → (move | record only).
//!
//! Files are handled one at a time in file-name order. A failure that only
//! concerns one file is recorded in the [`RunReport`] and the run moves on;
//! anything else aborts.

use crate::category::{Category, CategoryMap, extension_of};
use crate::config::{CompiledConfig, CompiledFilters};
use crate::error::{OrganizeError, OrganizeResult};
use crate::manifest::MANIFEST_FILE_NAME;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Whether files are actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Create category directories and move files.
    #[serde(rename = "applied")]
    Apply,
    /// Compute and report the moves without touching the filesystem.
    #[serde(rename = "dry-run")]
    DryRun,
}

impl Mode {
    /// Returns true if files are only planned, not moved.
    ///
    /// # Example
    ///
    /// ```
    /// use folder_sorter::Mode;
    ///
    /// assert!(Mode::DryRun.is_dry_run());
    /// assert!(!Mode::Apply.is_dry_run());
    /// ```
    pub fn is_dry_run(self) -> bool {
        self == Mode::DryRun
    }
}

/// A regular file found directly inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// The file name, without any directory component.
    pub name: String,
    /// The full path to the file.
    pub path: PathBuf,
    /// Lower-cased extension, if the name has one.
    pub extension: Option<String>,
    /// The resolved category.
    pub category: Category,
}

/// One processed file: where it came from, where it went (or would go).
///
/// Serialized as one manifest line, e.g.
/// `{"timestamp":"...","source":"/d/a.pdf","destination":"/d/Documents/a.pdf","category":"Documents","mode":"applied"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// When the file was processed (UTC, RFC 3339 in the manifest).
    pub timestamp: DateTime<Utc>,
    /// Original location, directly inside the target.
    pub source: PathBuf,
    /// `<target>/<category>/<file name>`.
    pub destination: PathBuf,
    /// Category the file was sorted into.
    pub category: Category,
    /// Whether the move happened or was only planned.
    pub mode: Mode,
}

impl ActionRecord {
    /// Returns true if this record describes a planned, not performed, move.
    pub fn is_dry_run(&self) -> bool {
        self.mode.is_dry_run()
    }
}

/// A file that could not be organized.
#[derive(Debug)]
pub struct FileFailure {
    /// The file that was left in place.
    pub path: PathBuf,
    /// Why it was skipped; always [`OrganizeError::is_recoverable`].
    pub error: OrganizeError,
}

/// Outcome of one organizing run.
#[derive(Debug)]
pub struct RunReport {
    /// Mode the run was performed in.
    pub mode: Mode,
    /// Files moved, or that would be moved in dry-run.
    pub records: Vec<ActionRecord>,
    /// Files skipped because of a per-file error.
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of files considered in this run.
    pub fn total_processed(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Returns true if every file was organized.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Successful actions per category, sorted by category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category).or_insert(0) += 1;
        }
        counts
    }
}

/// Sorts files into category subdirectories.
#[derive(Debug, Default)]
pub struct Organizer {
    filters: CompiledFilters,
    categories: CategoryMap,
    ignored: Vec<PathBuf>,
}

impl Organizer {
    /// Creates an organizer from compiled configuration.
    pub fn new(config: CompiledConfig) -> Self {
        Self {
            filters: config.filters,
            categories: config.categories,
            ignored: Vec::new(),
        }
    }

    /// Never treats `path` as a candidate, e.g. a manifest stored inside the
    /// target directory under a custom name.
    pub fn ignore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignored.push(path.into());
        self
    }

    /// Checks that `target` exists and is a directory.
    pub fn validate_target(target: &Path) -> OrganizeResult<()> {
        let metadata = fs::metadata(target).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                OrganizeError::TargetNotFound(target.to_path_buf())
            } else {
                OrganizeError::ReadDir {
                    path: target.to_path_buf(),
                    source,
                }
            }
        })?;

        if !metadata.is_dir() {
            return Err(OrganizeError::NotADirectory(target.to_path_buf()));
        }
        Ok(())
    }

    /// Lists the regular files directly inside `target` that pass the
    /// filters, sorted by file name.
    ///
    /// Subdirectories and symlinks are never candidates.
    ///
    /// # Errors
    ///
    /// [`OrganizeError::TargetNotFound`] or [`OrganizeError::NotADirectory`]
    /// for a bad target, [`OrganizeError::ReadDir`] if it cannot be listed.
    pub fn scan(&self, target: &Path) -> OrganizeResult<Vec<FileEntry>> {
        let entries = fs::read_dir(target).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => OrganizeError::TargetNotFound(target.to_path_buf()),
            io::ErrorKind::NotADirectory => OrganizeError::NotADirectory(target.to_path_buf()),
            _ => OrganizeError::ReadDir {
                path: target.to_path_buf(),
                source,
            },
        })?;

        let ignored: Vec<PathBuf> = self
            .ignored
            .iter()
            .filter_map(|path| fs::canonicalize(path).ok())
            .collect();

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(
                        "Skipping unreadable directory entry in {}: {}",
                        target.display(),
                        e
                    );
                    continue;
                }
            };

            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            if entry.file_name() == MANIFEST_FILE_NAME {
                continue;
            }
            if !ignored.is_empty()
                && fs::canonicalize(&path).is_ok_and(|canonical| ignored.contains(&canonical))
            {
                continue;
            }
            if !self.filters.should_include(&path) {
                debug!("Filtered out {}", path.display());
                continue;
            }

            files.push(self.classify(path));
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Resolves the extension and category of a file.
    pub fn classify(&self, path: PathBuf) -> FileEntry {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&path);
        let category = self.categories.categorize(extension.as_deref());

        FileEntry {
            name,
            path,
            extension,
            category,
        }
    }

    /// Computes the destination of a file: `<target>/<category>/<name>`.
    pub fn destination(target: &Path, entry: &FileEntry) -> PathBuf {
        let file_name = entry
            .path
            .file_name()
            .map(Path::new)
            .unwrap_or_else(|| Path::new(&entry.name));
        target.join(entry.category.dir_name()).join(file_name)
    }

    /// Builds the record for `entry` without touching the filesystem.
    pub fn plan(&self, target: &Path, entry: &FileEntry, mode: Mode) -> ActionRecord {
        ActionRecord {
            timestamp: Utc::now(),
            source: entry.path.clone(),
            destination: Self::destination(target, entry),
            category: entry.category,
            mode,
        }
    }

    /// Organizes every candidate file of `target`.
    ///
    /// # Errors
    ///
    /// Fails before touching anything if `target` is missing or not a
    /// directory. Unexpected I/O errors abort the run; per-file errors are
    /// collected in the returned report.
    pub fn organize(&self, target: &Path, mode: Mode) -> OrganizeResult<RunReport> {
        self.organize_with_progress(target, mode, |_, _| {})
    }

    /// Same as [`Organizer::organize`], calling `on_file` after each file.
    pub fn organize_with_progress<F>(
        &self,
        target: &Path,
        mode: Mode,
        on_file: F,
    ) -> OrganizeResult<RunReport>
    where
        F: FnMut(&FileEntry, Result<&ActionRecord, &OrganizeError>),
    {
        let entries = self.scan(target)?;
        self.organize_entries(target, &entries, mode, on_file)
    }

    /// Runs the pipeline over `entries` from an earlier [`Organizer::scan`]
    /// of `target`, calling `on_file` after each file.
    ///
    /// # Arguments
    ///
    /// * `target` - The directory the entries were scanned from
    /// * `entries` - Candidates, processed in the given order
    /// * `mode` - Whether to move files or only plan the moves
    /// * `on_file` - Receives each entry with its record or per-file error
    ///
    /// # Errors
    ///
    /// Aborts on the first error that is not [`OrganizeError::is_recoverable`].
    pub fn organize_entries<F>(
        &self,
        target: &Path,
        entries: &[FileEntry],
        mode: Mode,
        mut on_file: F,
    ) -> OrganizeResult<RunReport>
    where
        F: FnMut(&FileEntry, Result<&ActionRecord, &OrganizeError>),
    {
        info!(
            target = %target.display(),
            files = entries.len(),
            dry_run = mode.is_dry_run(),
            "Organizing directory"
        );

        // Sources a dry-run has already planned to move away.
        let mut vacated = HashSet::new();
        let mut report = RunReport::new(mode);
        for entry in entries {
            match self.process_file(target, entry, mode, &vacated) {
                Ok(record) => {
                    debug!(
                        "{} -> {}",
                        record.source.display(),
                        record.destination.display()
                    );
                    if mode.is_dry_run() {
                        vacated.insert(record.source.clone());
                    }
                    on_file(entry, Ok(&record));
                    report.records.push(record);
                }
                Err(error) if error.is_recoverable() => {
                    warn!("Skipping {}: {}", entry.path.display(), error);
                    on_file(entry, Err(&error));
                    report.failures.push(FileFailure {
                        path: entry.path.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }

    /// Runs the pipeline for a single file.
    ///
    /// Dry-run performs the same checks as apply mode, so a conflict that
    /// would stop the move is reported in both. `vacated` holds files a
    /// dry-run treats as already moved.
    fn process_file(
        &self,
        target: &Path,
        entry: &FileEntry,
        mode: Mode,
        vacated: &HashSet<PathBuf>,
    ) -> OrganizeResult<ActionRecord> {
        let record = self.plan(target, entry, mode);
        let category_dir = target.join(entry.category.dir_name());

        if !vacated.contains(&category_dir) {
            check_category_dir(&category_dir)?;
        }

        if fs::symlink_metadata(&record.destination).is_ok() {
            return Err(OrganizeError::Conflict {
                file: record.source.clone(),
                destination: record.destination.clone(),
            });
        }

        if mode == Mode::Apply {
            fs::create_dir_all(&category_dir).map_err(|source| {
                OrganizeError::DirectoryCreation {
                    path: category_dir.clone(),
                    source,
                }
            })?;

            fs::rename(&record.source, &record.destination).map_err(|source| {
                OrganizeError::MoveFailed {
                    from: record.source.clone(),
                    to: record.destination.clone(),
                    source,
                }
            })?;
        }

        Ok(record)
    }
}

/// Fails when the category path is taken by something other than a
/// directory.
fn check_category_dir(category_dir: &Path) -> OrganizeResult<()> {
    match fs::metadata(category_dir) {
        Ok(metadata) if !metadata.is_dir() => Err(OrganizeError::DirectoryCreation {
            path: category_dir.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            ),
        }),
        _ => Ok(()),
    }
}
