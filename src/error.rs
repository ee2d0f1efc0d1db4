//! Error types for configuration loading and directory organization.
//!
//! Errors fall into three groups:
//! - bad input (missing target, target is not a directory, broken configuration),
//!   raised before any file is touched
//! - per-file failures (name conflicts, permission problems) that are reported
//!   and skipped
//! - unexpected I/O failures that abort the run

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or compiling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A glob pattern in the filter rules failed to parse.
    #[error("Invalid glob pattern '{0}': expected *.ext or dir/**")]
    InvalidGlobPattern(String),

    /// A regex in the filter rules failed to compile.
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },

    /// A `[mappings]` entry names a category that does not exist.
    #[error("Unknown category '{category}' for extension '{extension}'")]
    UnknownCategory { extension: String, category: String },

    /// The configuration file exists but could not be read.
    #[error("IO error reading configuration {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Errors that can occur while organizing a directory.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The target path does not exist.
    #[error("Target path does not exist: {}", .0.display())]
    TargetNotFound(PathBuf),

    /// The target path exists but is not a directory.
    #[error("Target path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The target directory could not be inspected or listed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    /// A file with the same name already exists at the destination.
    #[error("Destination already exists: {}", .destination.display())]
    Conflict { file: PathBuf, destination: PathBuf },

    /// A category subdirectory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreation { path: PathBuf, source: io::Error },

    /// A file could not be moved into its category subdirectory.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// The manifest could not be written.
    #[error("Failed to write manifest {}: {source}", .path.display())]
    ManifestWrite { path: PathBuf, source: io::Error },

    /// The manifest could not be read back or contains a malformed record.
    #[error("Failed to read manifest {}: {reason}", .path.display())]
    ManifestRead { path: PathBuf, reason: String },
}

impl OrganizeError {
    /// Returns true for errors raised while validating input, before any
    /// file is processed.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            Self::TargetNotFound(_) | Self::NotADirectory(_) | Self::Config(_)
        )
    }

    /// Returns true when the error concerns a single file and the run may
    /// continue with the remaining files.
    ///
    /// Anything not listed here (disk full, read-only filesystem, ...) is
    /// treated as unexpected and aborts the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Conflict { .. } => true,
            Self::DirectoryCreation { source, .. } | Self::MoveFailed { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::NotFound
                    | io::ErrorKind::AlreadyExists
                    | io::ErrorKind::NotADirectory
                    | io::ErrorKind::IsADirectory
                    | io::ErrorKind::InvalidInput
            ),
            _ => false,
        }
    }
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;
