//! File categorization by extension.
//!
//! Every file is assigned exactly one [`Category`]. The mapping from extension
//! to category is a static table, optionally extended through configuration
//! before a run starts. Extensions that match nothing fall into
//! [`Category::Other`].
//!
//! # Examples
//!
//! ```
//! use folder_sorter::category::{Category, CategoryMap};
//!
//! let map = CategoryMap::default();
//! assert_eq!(map.extension_to_category("pdf"), Some(Category::Documents));
//! assert_eq!(map.categorize(Some("JPG")), Category::Images);
//! assert_eq!(map.categorize(Some("xyz")), Category::Other);
//! ```
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A named bucket of file extensions.
///
/// The directory name a category sorts into is its label, e.g. `Documents/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// PDF, word processor and plain text files
    Documents,
    /// PNG, JPG, GIF, etc.
    Images,
    /// MP4, MKV, AVI, etc.
    Videos,
    /// MP3, WAV, FLAC, etc.
    Audio,
    /// ZIP, RAR, 7Z, etc.
    Archives,
    /// Source code and structured data files
    Code,
    /// XLSX, CSV, ODS, etc.
    Spreadsheets,
    /// PPTX, ODP, etc.
    Presentations,
    /// TTF, OTF, WOFF, etc.
    Fonts,
    /// Catch-all for unmatched or missing extensions
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 10] = [
        Category::Documents,
        Category::Images,
        Category::Videos,
        Category::Audio,
        Category::Archives,
        Category::Code,
        Category::Spreadsheets,
        Category::Presentations,
        Category::Fonts,
        Category::Other,
    ];

    /// Returns the subdirectory name for this category.
    ///
    /// ```
    /// use folder_sorter::category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Other.dir_name(), "Other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Spreadsheets => "Spreadsheets",
            Category::Presentations => "Presentations",
            Category::Fonts => "Fonts",
            Category::Other => "Other",
        }
    }

    /// Looks up a category by its label, ignoring case.
    ///
    /// ```
    /// use folder_sorter::category::Category;
    ///
    /// assert_eq!(Category::from_name("images"), Some(Category::Images));
    /// assert_eq!(Category::from_name("Pictures"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Category> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.dir_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Built-in extension table.
const STANDARD_EXTENSIONS: &[(Category, &[&str])] = &[
    (
        Category::Documents,
        &[
            "pdf", "txt", "doc", "docx", "rtf", "odt", "md", "html", "htm", "tex", "epub",
        ],
    ),
    (
        Category::Images,
        &[
            "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tif", "tiff", "ico", "heic",
            "heif",
        ],
    ),
    (
        Category::Videos,
        &["mp4", "mkv", "avi", "mov", "flv", "wmv", "webm", "m4v", "mpeg", "mpg", "3gp"],
    ),
    (
        Category::Audio,
        &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma", "opus"],
    ),
    (
        Category::Archives,
        &["zip", "rar", "7z", "tar", "gz", "tgz", "bz2", "xz", "zst"],
    ),
    (
        Category::Code,
        &[
            "py", "java", "c", "cpp", "h", "hpp", "js", "ts", "rs", "go", "rb", "php", "sh",
            "bash", "json", "xml", "yaml", "yml", "toml", "css", "sql",
        ],
    ),
    (Category::Spreadsheets, &["csv", "tsv", "xls", "xlsx", "ods"]),
    (Category::Presentations, &["ppt", "pptx", "odp", "key"]),
    (Category::Fonts, &["ttf", "otf", "woff", "woff2"]),
];

/// Maps file extensions to categories.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    extension_map: HashMap<String, Category>,
}

impl CategoryMap {
    /// Creates a map holding the built-in extension table.
    pub fn new() -> Self {
        let mut map = Self {
            extension_map: HashMap::new(),
        };
        map.populate_standard_mappings();
        map
    }

    fn populate_standard_mappings(&mut self) {
        for (category, extensions) in STANDARD_EXTENSIONS {
            for ext in *extensions {
                self.add_extension_mapping(ext, *category);
            }
        }
    }

    /// Adds or replaces an extension mapping.
    ///
    /// A leading dot is ignored, so `".log"` and `"log"` are equivalent.
    pub fn add_extension_mapping(&mut self, ext: &str, category: Category) {
        self.extension_map
            .insert(ext.trim_start_matches('.').to_lowercase(), category);
    }

    /// Maps a file extension to a category, ignoring case.
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        self.extension_map.get(&ext.to_lowercase()).copied()
    }

    /// Resolves the category for an optional extension, falling back to
    /// [`Category::Other`].
    pub fn categorize(&self, ext: Option<&str>) -> Category {
        ext.and_then(|ext| self.extension_to_category(ext))
            .unwrap_or(Category::Other)
    }

    /// Returns the number of known extensions.
    pub fn len(&self) -> usize {
        self.extension_map.len()
    }

    /// Returns true if no extension is mapped.
    pub fn is_empty(&self) -> bool {
        self.extension_map.is_empty()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the lower-cased extension of a file name.
///
/// Names without a dot, names ending in a bare dot, and dotfiles such as
/// `.bashrc` have no extension.
///
/// ```
/// use folder_sorter::category::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("Report.PDF")), Some("pdf".to_string()));
/// assert_eq!(extension_of(Path::new("notes.")), None);
/// assert_eq!(extension_of(Path::new(".bashrc")), None);
/// ```
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Documents.dir_name(), "Documents");
        assert_eq!(Category::Images.dir_name(), "Images");
        assert_eq!(Category::Videos.dir_name(), "Videos");
        assert_eq!(Category::Audio.dir_name(), "Audio");
        assert_eq!(Category::Archives.dir_name(), "Archives");
        assert_eq!(Category::Code.dir_name(), "Code");
        assert_eq!(Category::Other.dir_name(), "Other");
    }

    #[test]
    fn test_from_name_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.dir_name()), Some(category));
            assert_eq!(
                Category::from_name(&category.dir_name().to_uppercase()),
                Some(category)
            );
        }
        assert_eq!(Category::from_name("unknown"), None);
    }

    #[test]
    fn test_extension_to_category() {
        let map = CategoryMap::default();
        assert_eq!(map.extension_to_category("pdf"), Some(Category::Documents));
        assert_eq!(map.extension_to_category("mp3"), Some(Category::Audio));
        assert_eq!(map.extension_to_category("rs"), Some(Category::Code));
        assert_eq!(map.extension_to_category("zip"), Some(Category::Archives));
        assert_eq!(map.extension_to_category("mkv"), Some(Category::Videos));
    }

    #[test]
    fn test_extension_to_category_case_insensitive() {
        let map = CategoryMap::default();
        assert_eq!(map.extension_to_category("PDF"), Some(Category::Documents));
        assert_eq!(map.extension_to_category("Jpg"), Some(Category::Images));
    }

    #[test]
    fn test_categorize_defaults_to_other() {
        let map = CategoryMap::default();
        assert_eq!(map.categorize(None), Category::Other);
        assert_eq!(map.categorize(Some("xyz")), Category::Other);
    }

    #[test]
    fn test_standard_table_has_no_duplicate_extensions() {
        let total: usize = STANDARD_EXTENSIONS.iter().map(|(_, exts)| exts.len()).sum();
        assert_eq!(CategoryMap::default().len(), total);
    }

    #[test]
    fn test_custom_mapping_overrides_builtin() {
        let mut map = CategoryMap::default();
        map.add_extension_mapping(".LOG", Category::Documents);
        map.add_extension_mapping("json", Category::Documents);

        assert_eq!(map.extension_to_category("log"), Some(Category::Documents));
        assert_eq!(map.extension_to_category("json"), Some(Category::Documents));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("photo.jpg")), Some("jpg".into()));
        assert_eq!(extension_of(Path::new("archive.tar.GZ")), Some("gz".into()));
        assert_eq!(extension_of(Path::new("Makefile")), None);
        assert_eq!(extension_of(Path::new("trailing.")), None);
        assert_eq!(extension_of(Path::new(".gitignore")), None);
    }
}
