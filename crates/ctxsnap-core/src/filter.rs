//! Extension-based inclusion filter.

use crate::config::{normalize_extension, RunConfig};
use std::path::Path;

/// Decides per-file inclusion from the configured extension lists.
///
/// The decision is a pure function of the path's extension: included
/// iff the lowercased extension is on the allow list and not on the
/// deny list. The deny list is checked first and wins on conflict.
/// Files without an extension are never included.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl ExtensionFilter {
    /// Build a filter from raw extension lists (normalized on entry).
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: include
                .iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
            exclude: exclude
                .iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
        }
    }

    /// Build a filter from a resolved run configuration.
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(&config.include_extensions, &config.exclude_extensions)
    }

    /// Whether the file at `path` belongs in the snapshot.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = format!(".{}", ext.to_string_lossy().to_lowercase());

        if self.exclude.iter().any(|e| *e == ext) {
            return false;
        }
        self.include.iter().any(|e| *e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn default_filter() -> ExtensionFilter {
        let config = RunConfig::new(PathBuf::from("/p"));
        ExtensionFilter::from_config(&config)
    }

    #[test]
    fn test_included_extensions() {
        let filter = default_filter();
        assert!(filter.matches(Path::new("src/App.vue")));
        assert!(filter.matches(Path::new("src/main.js")));
        assert!(filter.matches(Path::new("styles/site.scss")));
        assert!(filter.matches(Path::new("index.html")));
    }

    #[test]
    fn test_excluded_extensions() {
        let filter = default_filter();
        assert!(!filter.matches(Path::new("README.md")));
        assert!(!filter.matches(Path::new("debug.log")));
        assert!(!filter.matches(Path::new("project_context_2024-03-01_09-05-30.txt")));
    }

    #[test]
    fn test_unlisted_extension_rejected() {
        let filter = default_filter();
        assert!(!filter.matches(Path::new("image.png")));
        assert!(!filter.matches(Path::new("lib.rs")));
    }

    #[test]
    fn test_no_extension_rejected() {
        let filter = default_filter();
        assert!(!filter.matches(Path::new("Makefile")));
        assert!(!filter.matches(Path::new(".gitignore")));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = default_filter();
        assert!(filter.matches(Path::new("App.VUE")));
        assert!(filter.matches(Path::new("MAIN.Js")));
        assert!(!filter.matches(Path::new("README.MD")));
    }

    #[test]
    fn test_exclude_overrides_include() {
        // Engineered overlap: .js on both lists
        let filter = ExtensionFilter::new(&[".js", ".ts"], &[".js"]);
        assert!(!filter.matches(Path::new("main.js")));
        assert!(filter.matches(Path::new("main.ts")));
    }

    #[test]
    fn test_decision_is_stable() {
        let filter = default_filter();
        let path = Path::new("src/main.js");
        assert_eq!(filter.matches(path), filter.matches(path));
    }
}
