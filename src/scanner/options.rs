//! Scan configuration: the user-facing options and their validated form.

use std::collections::BTreeSet;
use std::path::PathBuf;

use regex::Regex;

use super::ConfigError;

/// Directories that are never scanned, in addition to user exclusions.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".idea",
    ".cursor",
    ".local-dev",
    ".ruff_cache",
    "node_modules",
    "vendor",
    "var",
    "ext",
    "venv",
    "GraphQL2/Schema",
    "wp-content",
    "swagger-ui",
];

/// Path regexes that are always applied, in addition to user patterns.
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[r".*jquery.*", r".*min\.js$", r".*android.js$"];

/// Extensions whose contents are counted when none are configured.
pub const DEFAULT_CODE_EXTENSIONS: &[&str] = &[
    ".php", ".py", ".js", ".sh", ".twig", ".phtml", ".tf", ".yaml", ".yml", ".cpp",
];

pub const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Configuration options for a scan, as given by the user.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// The root path to start scanning from
    pub root_path: PathBuf,
    /// Extensions whose files get line and token counts
    pub counted_extensions: BTreeSet<String>,
    /// Count blank and whitespace-only lines too
    pub include_blank_lines: bool,
    /// Bytes per estimated token
    pub chars_per_token: f64,
    /// Directory names or root-relative paths to skip
    pub exclude_dirs: Vec<String>,
    /// Regexes matched against the relative path or the basename
    pub exclude_path_regex: Vec<String>,
    /// Keep dot-prefixed entries
    pub include_hidden: bool,
    /// Drop directories with nothing listed and nothing counted
    pub prune_empty: bool,
    /// Whether to cross filesystem mount points
    pub cross_mount: bool,
}

impl ScanOptions {
    /// Create new scan options with default values
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            counted_extensions: DEFAULT_CODE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            include_blank_lines: false,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            exclude_dirs: Vec::new(),
            exclude_path_regex: Vec::new(),
            include_hidden: false,
            prune_empty: false,
            cross_mount: true,
        }
    }

    /// Set counted extensions from a comma-separated list
    pub fn with_extensions(mut self, raw: &str) -> Self {
        let parsed = normalize_extensions(raw);
        if !parsed.is_empty() {
            self.counted_extensions = parsed;
        }
        self
    }

    pub fn with_include_blank_lines(mut self, include: bool) -> Self {
        self.include_blank_lines = include;
        self
    }

    pub fn with_chars_per_token(mut self, ratio: f64) -> Self {
        self.chars_per_token = ratio;
        self
    }

    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_exclude_path_regex(mut self, patterns: Vec<String>) -> Self {
        self.exclude_path_regex = patterns;
        self
    }

    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn with_prune_empty(mut self, prune: bool) -> Self {
        self.prune_empty = prune;
        self
    }

    pub fn with_cross_mount(mut self, cross: bool) -> Self {
        self.cross_mount = cross;
        self
    }

    /// Validate the options and compile them into rules for the walker.
    pub fn compile(&self) -> Result<ScanRules, ConfigError> {
        if !(self.chars_per_token.is_finite() && self.chars_per_token > 0.0) {
            return Err(ConfigError::InvalidCharsPerToken(self.chars_per_token));
        }

        let exclude_regexes = DEFAULT_EXCLUDED_PATHS
            .iter()
            .copied()
            .chain(self.exclude_path_regex.iter().map(String::as_str))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                Regex::new(p).map_err(|source| ConfigError::InvalidRegex {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut excluded_dirs: Vec<String> = DEFAULT_EXCLUDED_DIRS
            .iter()
            .copied()
            .chain(self.exclude_dirs.iter().map(String::as_str))
            .filter_map(normalize_dir_needle)
            .collect();
        excluded_dirs.sort();
        excluded_dirs.dedup();

        Ok(ScanRules {
            counted_extensions: self
                .counted_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            include_blank_lines: self.include_blank_lines,
            chars_per_token: self.chars_per_token,
            excluded_dirs,
            exclude_regexes,
            include_hidden: self.include_hidden,
            prune_empty: self.prune_empty,
            cross_mount: self.cross_mount,
        })
    }
}

/// Validated, ready-to-match form of [`ScanOptions`].
#[derive(Debug, Clone)]
pub struct ScanRules {
    pub counted_extensions: BTreeSet<String>,
    pub include_blank_lines: bool,
    pub chars_per_token: f64,
    pub excluded_dirs: Vec<String>,
    pub exclude_regexes: Vec<Regex>,
    pub include_hidden: bool,
    pub prune_empty: bool,
    pub cross_mount: bool,
}

/// Parse a comma-separated extension list into lower-cased, dot-prefixed
/// entries.
pub fn normalize_extensions(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .map(|item| {
            if item.starts_with('.') {
                item
            } else {
                format!(".{}", item)
            }
        })
        .collect()
}

fn normalize_dir_needle(raw: &str) -> Option<String> {
    let needle = raw.trim().replace('\\', "/");
    let needle = needle.trim_matches('/');
    if needle.is_empty() {
        None
    } else {
        Some(needle.to_string())
    }
}
