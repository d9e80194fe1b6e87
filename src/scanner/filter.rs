//! Inclusion predicates applied to every entry below the scan root.

use std::path::Path;

use super::options::ScanRules;

impl ScanRules {
    /// Whether a directory is descended into. `rel_path` is relative to the
    /// scan root and `/`-separated.
    pub fn keeps_dir(&self, name: &str, rel_path: &str) -> bool {
        if self.is_hidden_excluded(name) || self.matches_exclude_regex(name, rel_path) {
            return false;
        }

        !self.excluded_dirs.iter().any(|needle| {
            if needle.contains('/') {
                rel_path == needle || rel_path.ends_with(&format!("/{}", needle))
            } else {
                name == needle
            }
        })
    }

    /// Whether a file is listed in the tree at all.
    pub fn keeps_file(&self, name: &str, rel_path: &str) -> bool {
        !self.is_hidden_excluded(name) && !self.matches_exclude_regex(name, rel_path)
    }

    /// Whether a listed file gets line and token counts.
    pub fn is_counted(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| {
                let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
                self.counted_extensions.contains(&ext)
            })
            .unwrap_or(false)
    }

    fn is_hidden_excluded(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }

    fn matches_exclude_regex(&self, name: &str, rel_path: &str) -> bool {
        self.exclude_regexes
            .iter()
            .any(|re| re.is_match(rel_path) || re.is_match(name))
    }
}

/// Root-relative, `/`-separated form of `path`.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
