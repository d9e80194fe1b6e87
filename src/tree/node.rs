use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Line, token and byte counts for a file or an aggregate of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub lines: u64,
    pub tokens: u64,
    pub size_bytes: u64,
}

impl Metrics {
    pub fn new(lines: u64, tokens: u64, size_bytes: u64) -> Self {
        Self {
            lines,
            tokens,
            size_bytes,
        }
    }

    /// Metrics for a file whose contents are not counted.
    pub fn size_only(size_bytes: u64) -> Self {
        Self {
            lines: 0,
            tokens: 0,
            size_bytes,
        }
    }

    #[allow(dead_code)]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for Metrics {
    type Output = Metrics;

    fn add(self, other: Metrics) -> Metrics {
        Metrics {
            lines: self.lines.saturating_add(other.lines),
            tokens: self.tokens.saturating_add(other.tokens),
            size_bytes: self.size_bytes.saturating_add(other.size_bytes),
        }
    }
}

impl AddAssign for Metrics {
    fn add_assign(&mut self, other: Metrics) {
        *self = *self + other;
    }
}

impl Sum for Metrics {
    fn sum<I: Iterator<Item = Metrics>>(iter: I) -> Self {
        iter.fold(Metrics::default(), Add::add)
    }
}

/// A listed file. Immutable once built by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    pub name: String,
    /// Lower-cased extension including the leading dot, if any.
    pub extension: Option<String>,
    pub metrics: Metrics,
    pub counted: bool,
}

impl FileNode {
    pub fn new(name: impl Into<String>, metrics: Metrics, counted: bool) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        // Uncounted files keep their size and nothing else.
        let metrics = if counted {
            metrics
        } else {
            Metrics::size_only(metrics.size_bytes)
        };

        Self {
            name,
            extension,
            metrics,
            counted,
        }
    }
}

/// A directory with its derived `root`, `subdirs` and `total` metrics.
///
/// The three aggregates are computed once in [`DirNode::new`] from the
/// children and cannot be set from outside, so `total == root + subdirs`
/// holds for every directory in a built tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DirNode {
    pub name: String,
    pub path: PathBuf,
    root: Metrics,
    subdirs: Metrics,
    total: Metrics,
    children: Vec<TreeNode>,
}

impl DirNode {
    /// Build a directory node and aggregate its metrics from `children`.
    pub fn new(name: impl Into<String>, path: PathBuf, children: Vec<TreeNode>) -> Self {
        let mut root = Metrics::default();
        let mut subdirs = Metrics::default();

        for child in &children {
            match child {
                TreeNode::File(file) => root += file.metrics,
                TreeNode::Dir(dir) => subdirs += dir.total,
            }
        }

        Self {
            name: name.into(),
            path,
            root,
            subdirs,
            total: root + subdirs,
            children,
        }
    }

    /// Build a node named after the last component of `path`.
    pub fn at_path(path: &Path, children: Vec<TreeNode>) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self::new(name, path.to_path_buf(), children)
    }

    /// Metrics of the files directly inside this directory.
    pub fn root(&self) -> Metrics {
        self.root
    }

    /// Sum of the totals of the direct subdirectories.
    pub fn subdirs(&self) -> Metrics {
        self.subdirs
    }

    pub fn total(&self) -> Metrics {
        self.total
    }

    /// Children in scan order: directories first, then files, each by name.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    #[allow(dead_code)]
    pub fn dirs(&self) -> impl Iterator<Item = &DirNode> {
        self.children.iter().filter_map(|c| match c {
            TreeNode::Dir(d) => Some(d),
            TreeNode::File(_) => None,
        })
    }

    #[allow(dead_code)]
    pub fn files(&self) -> impl Iterator<Item = &FileNode> {
        self.children.iter().filter_map(|c| match c {
            TreeNode::File(f) => Some(f),
            TreeNode::Dir(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of files listed anywhere below this directory.
    pub fn file_count(&self) -> u64 {
        self.children
            .iter()
            .map(|c| match c {
                TreeNode::File(_) => 1,
                TreeNode::Dir(d) => d.file_count(),
            })
            .sum()
    }

    #[allow(dead_code)]
    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name() == name)
    }

    #[allow(dead_code)]
    /// Follow a `/`-separated chain of directory names below this node.
    pub fn descend(&self, rel: &str) -> Option<&DirNode> {
        rel.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |dir, part| dir.child(part)?.as_dir())
    }
}

/// A node of the aggregation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Dir(DirNode),
    File(FileNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Dir(d) => &d.name,
            TreeNode::File(f) => &f.name,
        }
    }

    /// The metric a node is ranked by: `total` for directories, the
    /// file's own metrics otherwise.
    pub fn metrics(&self) -> Metrics {
        match self {
            TreeNode::Dir(d) => d.total,
            TreeNode::File(f) => f.metrics,
        }
    }

    #[allow(dead_code)]
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir(_))
    }

    pub fn as_dir(&self) -> Option<&DirNode> {
        match self {
            TreeNode::Dir(d) => Some(d),
            TreeNode::File(_) => None,
        }
    }

    #[allow(dead_code)]
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            TreeNode::File(f) => Some(f),
            TreeNode::Dir(_) => None,
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, lines: u64, tokens: u64, size: u64, counted: bool) -> TreeNode {
        TreeNode::File(FileNode::new(name, Metrics::new(lines, tokens, size), counted))
    }

    #[test]
    fn test_metrics_add() {
        let a = Metrics::new(1, 2, 3);
        let b = Metrics::new(10, 20, 30);
        assert_eq!(a + b, Metrics::new(11, 22, 33));

        let sum: Metrics = vec![a, b, a].into_iter().sum();
        assert_eq!(sum, Metrics::new(12, 24, 36));
    }

    #[test]
    fn test_uncounted_file_keeps_size_only() {
        let node = FileNode::new("readme.md", Metrics::new(7, 9, 100), false);
        assert!(!node.counted);
        assert_eq!(node.metrics, Metrics::size_only(100));
        assert_eq!(node.extension.as_deref(), Some(".md"));
    }

    #[test]
    fn test_extension_extraction() {
        let node = FileNode::new("Main.PY", Metrics::default(), true);
        assert_eq!(node.extension.as_deref(), Some(".py"));

        let node = FileNode::new("Makefile", Metrics::default(), false);
        assert_eq!(node.extension, None);
    }

    #[test]
    fn test_dir_aggregation() {
        let sub = DirNode::new(
            "d",
            PathBuf::from("/r/d"),
            vec![file("c.py", 5, 5, 20, true)],
        );
        let root = DirNode::new(
            "r",
            PathBuf::from("/r"),
            vec![
                TreeNode::Dir(sub),
                file("a.py", 10, 10, 40, true),
                file("readme.md", 0, 0, 100, false),
            ],
        );

        assert_eq!(root.root(), Metrics::new(10, 10, 140));
        assert_eq!(root.subdirs(), Metrics::new(5, 5, 20));
        assert_eq!(root.total(), Metrics::new(15, 15, 160));
        assert_eq!(root.total(), root.root() + root.subdirs());
        assert_eq!(root.file_count(), 3);
    }

    #[test]
    fn test_empty_dir_is_zero() {
        let dir = DirNode::new("empty", PathBuf::from("/empty"), Vec::new());
        assert!(dir.is_empty());
        assert!(dir.total().is_zero());
        assert!(dir.root().is_zero());
        assert!(dir.subdirs().is_zero());
    }

    #[test]
    fn test_descend() {
        let inner = DirNode::new("b", PathBuf::from("/r/a/b"), Vec::new());
        let a = DirNode::new("a", PathBuf::from("/r/a"), vec![TreeNode::Dir(inner)]);
        let root = DirNode::new(
            "r",
            PathBuf::from("/r"),
            vec![TreeNode::Dir(a), file("x.py", 1, 1, 1, true)],
        );

        assert_eq!(root.descend("a/b").map(|d| d.name.as_str()), Some("b"));
        assert_eq!(root.descend("").map(|d| d.name.as_str()), Some("r"));
        assert!(root.descend("x.py").is_none());
        assert!(root.descend("missing").is_none());
    }
}
