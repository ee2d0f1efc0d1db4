//! folder-sorter - sort the files of a directory into category subfolders
//!
//! This library classifies the regular files directly inside a directory by
//! extension, moves them into one subfolder per category (or only reports the
//! moves in dry-run mode), and can append a manifest of the actions taken.
//! Filtering rules and extra extension mappings come from TOML configuration.

pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod organizer;
pub mod output;

pub use category::{Category, CategoryMap};
pub use config::{CompiledConfig, CompiledFilters, OrganizerConfig};
pub use error::{ConfigError, OrganizeError, OrganizeResult};
pub use manifest::Manifest;
pub use organizer::{ActionRecord, FileEntry, FileFailure, Mode, Organizer, RunReport};

pub use cli::{RunOptions, run, run_cli};
