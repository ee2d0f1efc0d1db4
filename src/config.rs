//! Configuration for file filtering and extra extension mappings.
//!
//! Configuration is stored in TOML:
//!
//! ```toml
//! [filters]
//! enable_hidden_files = true
//!
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["tmp"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//!
//! [mappings]
//! log = "Documents"
//! ```
//!
//! Filters decide which direct children of the target are considered at all.
//! Mappings extend the built-in extension table before the run starts.

use crate::category::{Category, CategoryMap};
use crate::error::ConfigError;
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".folder-sorter.toml";

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    /// Rules deciding which files are organized.
    pub filters: FilterRules,

    /// Extra extension → category name mappings.
    pub mappings: BTreeMap<String, String>,
}

/// Root-level filter rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    /// Whether to organize hidden files (starting with "."). Defaults to true.
    pub enable_hidden_files: bool,

    /// Rules for excluding files.
    pub exclude: ExcludeRules,

    /// Rules for including files (whitelist, overrides exclude rules).
    pub include: IncludeRules,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            enable_hidden_files: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }
    }
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., ".DS_Store", "Thumbs.db").
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.tmp").
    pub patterns: Vec<String>,

    /// File extensions to exclude (e.g., "bak", "tmp", "log").
    pub extensions: Vec<String>,

    /// Regex patterns matched against the file name.
    pub regex: Vec<String>,
}

/// Rules for including files, overriding exclude rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludeRules {
    /// Glob patterns that override exclude rules.
    pub patterns: Vec<String>,
}

impl OrganizerConfig {
    /// Loads configuration, falling back to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if provided (must exist)
    /// 2. `.folder-sorter.toml` in the current directory
    /// 3. `folder-sorter/config.toml` in the user configuration directory
    /// 4. built-in defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        match Self::discover() {
            Some(path) => Self::load_from_file(&path),
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Finds the configuration file [`OrganizerConfig::load`] would read when
    /// no explicit path is given.
    pub fn discover() -> Option<PathBuf> {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.is_file() {
            return Some(local_config);
        }

        Self::user_config_path().filter(|path| path.is_file())
    }

    /// Returns `<config dir>/folder-sorter/config.toml`, if the platform has
    /// a configuration directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folder-sorter").join("config.toml"))
    }

    /// Loads configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Compiles filters and mappings into their matching structures.
    ///
    /// # Errors
    ///
    /// Fails on invalid glob or regex patterns, empty extensions, and
    /// mappings naming an unknown category.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let mut categories = CategoryMap::default();
        for (extension, name) in &self.mappings {
            let ext = extension.trim().trim_start_matches('.');
            if ext.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "empty extension in [mappings] for category '{}'",
                    name
                )));
            }
            let category =
                Category::from_name(name).ok_or_else(|| ConfigError::UnknownCategory {
                    extension: extension.clone(),
                    category: name.clone(),
                })?;
            categories.add_extension_mapping(ext, category);
        }

        Ok(CompiledConfig {
            filters: CompiledFilters::new(self.filters)?,
            categories,
        })
    }
}

/// Configuration ready to drive an organizer.
#[derive(Debug, Default)]
pub struct CompiledConfig {
    pub filters: CompiledFilters,
    pub categories: CategoryMap,
}

/// Pre-compiled filter rules.
#[derive(Debug, Default)]
pub struct CompiledFilters {
    skip_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = compile_globs(&rules.exclude.patterns)?;
        let include_patterns = compile_globs(&rules.include.patterns)?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_hidden_files: !rules.enable_hidden_files,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Checks whether a file should be organized.
    ///
    /// Globs are matched against the file name, since only direct children of
    /// the target are ever considered. Order, first match wins:
    /// 1. include patterns → include
    /// 2. hidden file while `enable_hidden_files` is off → exclude
    /// 3. exact filename, extension, glob, regex → exclude
    /// 4. include
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.matches_any(&self.include_patterns, &file_name) {
            return true;
        }

        if self.skip_hidden_files && file_name.starts_with('.') {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = crate::category::extension_of(file_path)
            && self.exclude_extensions.contains(&ext)
        {
            return false;
        }

        if self.matches_any(&self.exclude_patterns, &file_name) {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
    }

    fn matches_any(&self, patterns: &[Pattern], file_name: &str) -> bool {
        patterns.iter().any(|pattern| pattern.matches(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(rules: FilterRules) -> CompiledFilters {
        CompiledFilters::new(rules).unwrap()
    }

    #[test]
    fn test_default_config_organizes_hidden_files() {
        let config = OrganizerConfig::default();
        assert!(config.filters.enable_hidden_files);
        assert!(config.mappings.is_empty());
    }

    #[test]
    fn test_hidden_file_included_by_default() {
        let compiled = filters(FilterRules::default());

        assert!(compiled.should_include(Path::new(".bashrc")));
        assert!(compiled.should_include(Path::new("/tmp/x/.env.pdf")));
        assert!(compiled.should_include(Path::new("report.pdf")));

        assert!(CompiledFilters::default().should_include(Path::new(".bashrc")));
    }

    #[test]
    fn test_hidden_file_excluded_when_disabled() {
        let compiled = filters(FilterRules {
            enable_hidden_files: false,
            ..Default::default()
        });

        assert!(!compiled.should_include(Path::new(".DS_Store")));
        assert!(!compiled.should_include(Path::new("/tmp/x/.gitignore")));
        assert!(compiled.should_include(Path::new("report.pdf")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let compiled = filters(FilterRules {
            exclude: ExcludeRules {
                filenames: vec!["Thumbs.db".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(!compiled.should_include(Path::new("Thumbs.db")));
        assert!(compiled.should_include(Path::new("image.jpg")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let compiled = filters(FilterRules {
            exclude: ExcludeRules {
                extensions: vec!["bak".to_string(), ".TMP".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(!compiled.should_include(Path::new("file.bak")));
        assert!(!compiled.should_include(Path::new("file.BAK")));
        assert!(!compiled.should_include(Path::new("file.tmp")));
        assert!(compiled.should_include(Path::new("file.txt")));
    }

    #[test]
    fn test_exclude_glob_matches_file_name_only() {
        let compiled = filters(FilterRules {
            exclude: ExcludeRules {
                patterns: vec!["*.part".to_string(), "[0-9]*.log".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(!compiled.should_include(Path::new("/downloads/movie.mkv.part")));
        assert!(!compiled.should_include(Path::new("1debug.log")));
        assert!(compiled.should_include(Path::new("debug.log")));
    }

    #[test]
    fn test_include_overrides_exclude() {
        let compiled = filters(FilterRules {
            exclude: ExcludeRules {
                extensions: vec!["env".to_string()],
                ..Default::default()
            },
            include: IncludeRules {
                patterns: vec![".keep*".to_string()],
            },
            enable_hidden_files: false,
        });

        assert!(compiled.should_include(Path::new(".keepme")));
        assert!(!compiled.should_include(Path::new(".other")));
    }

    #[test]
    fn test_exclude_regex() {
        let compiled = filters(FilterRules {
            exclude: ExcludeRules {
                regex: vec![r"^~\$".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(!compiled.should_include(Path::new("~$budget.xlsx")));
        assert!(compiled.should_include(Path::new("budget.xlsx")));
    }

    #[test]
    fn test_invalid_patterns_return_errors() {
        let bad_regex = OrganizerConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    regex: vec!["[invalid(".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            bad_regex.compile(),
            Err(ConfigError::InvalidRegexPattern { .. })
        ));

        let bad_glob = OrganizerConfig {
            filters: FilterRules {
                exclude: ExcludeRules {
                    patterns: vec!["[invalid".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            bad_glob.compile(),
            Err(ConfigError::InvalidGlobPattern(_))
        ));
    }

    #[test]
    fn test_parse_toml_with_mappings() {
        let config = OrganizerConfig::from_toml(
            r#"
            [filters]
            enable_hidden_files = false

            [filters.exclude]
            extensions = ["tmp"]

            [mappings]
            ".LOG" = "documents"
            "#,
        )
        .unwrap();

        assert!(!config.filters.enable_hidden_files);
        assert_eq!(config.filters.exclude.extensions, vec!["tmp".to_string()]);

        let compiled = config.compile().unwrap();
        assert_eq!(
            compiled.categories.extension_to_category("log"),
            Some(Category::Documents)
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = OrganizerConfig::from_toml("").unwrap();
        assert!(config.filters.enable_hidden_files);
        assert!(config.filters.exclude.filenames.is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let config = OrganizerConfig::from_toml("[mappings]\nlog = \"Logs\"\n").unwrap();
        assert!(matches!(
            config.compile(),
            Err(ConfigError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            OrganizerConfig::from_toml("[filters"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let result = OrganizerConfig::load(Some(Path::new("/non/existent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[filters.exclude]\nfilenames = [\"Thumbs.db\"]\n")
            .expect("Failed to write config");

        let config = OrganizerConfig::load(Some(&path)).expect("Failed to load config");
        assert_eq!(config.filters.exclude.filenames, vec!["Thumbs.db".to_string()]);
    }
}
