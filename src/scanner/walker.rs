//! Directory walker that builds the aggregation tree bottom-up.

use std::cmp::Ordering;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use walkdir::{DirEntry, WalkDir};

use crate::tree::{DirNode, FileNode, Metrics, TreeNode};

use super::counter::count_file_metrics;
use super::filter::relative_path;
use super::options::{ScanOptions, ScanRules};
use super::progress::ScanProgress;
use super::{EntryError, ScanError};

/// A directory whose subtree is still being walked.
struct PendingDir {
    path: PathBuf,
    depth: usize,
    dirs: Vec<TreeNode>,
    files: Vec<TreeNode>,
    failed: bool,
}

impl PendingDir {
    fn new(path: &Path, depth: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            depth,
            dirs: Vec::new(),
            files: Vec::new(),
            failed: false,
        }
    }

    fn finish(self) -> DirNode {
        let mut children = self.dirs;
        children.extend(self.files);
        DirNode::at_path(&self.path, children)
    }
}

/// Directory scanner that walks the filesystem and builds a [`DirNode`].
pub struct Scanner {
    options: ScanOptions,
    progress_tx: Sender<ScanProgress>,
}

impl Scanner {
    /// Create a new scanner with the given options and progress sender.
    pub fn new(options: ScanOptions, progress_tx: Sender<ScanProgress>) -> Self {
        Self {
            options,
            progress_tx,
        }
    }

    /// Perform the directory scan and return the root directory node.
    pub fn scan(&self) -> Result<DirNode, ScanError> {
        let rules = self.options.compile()?;
        let root_path = self.validate_root()?;

        let _ = self.progress_tx.send(ScanProgress::Started {
            root: root_path.clone(),
        });

        let root_device = if rules.cross_mount {
            None
        } else {
            std::fs::metadata(&root_path).ok().and_then(|m| device_of(&m))
        };

        // Entries arrive depth-first in name order, so a directory's subtree
        // is complete as soon as an entry at the same or a shallower depth
        // shows up.
        let walker = WalkDir::new(&root_path)
            .follow_links(false)
            .same_file_system(!rules.cross_mount)
            .sort_by(|a, b| name_order(a.file_name(), b.file_name()))
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || (keeps_entry(&rules, &root_path, e) && !crosses_mount(e, root_device))
            });

        let mut stack: Vec<PendingDir> = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf);
                    match path {
                        Some(path) if path == root_path => {
                            let source = err
                                .into_io_error()
                                .unwrap_or_else(|| std::io::Error::other("unreadable root"));
                            return Err(ScanError::from_io(path, source));
                        }
                        Some(path) => {
                            if let Some(pending) = stack.iter_mut().find(|d| d.path == path) {
                                pending.failed = true;
                            }
                            self.report(path, err.into());
                        }
                        None => self.report(root_path.clone(), err.into()),
                    }
                    continue;
                }
            };

            let depth = entry.depth();
            if depth == 0 {
                stack.push(PendingDir::new(entry.path(), 0));
                continue;
            }

            close_dirs(&mut stack, depth, &rules);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                stack.push(PendingDir::new(entry.path(), depth));
            } else if file_type.is_file() {
                match self.read_file(&entry, &rules) {
                    Ok(node) => {
                        if let Some(parent) = stack.last_mut() {
                            parent.files.push(TreeNode::File(node));
                        }
                    }
                    Err(err) => self.report(entry.path().to_path_buf(), err),
                }
            }
        }

        close_dirs(&mut stack, 1, &rules);
        let root = stack
            .pop()
            .map(PendingDir::finish)
            .unwrap_or_else(|| DirNode::at_path(&root_path, Vec::new()));

        let _ = self.progress_tx.send(ScanProgress::Completed {
            total_files: root.file_count(),
            total: root.total(),
        });

        Ok(root)
    }

    fn validate_root(&self) -> Result<PathBuf, ScanError> {
        let root_path = &self.options.root_path;

        if !root_path.exists() {
            return Err(ScanError::PathNotFound {
                path: root_path.clone(),
            });
        }

        let metadata = std::fs::metadata(root_path)
            .map_err(|e| ScanError::from_io(root_path.clone(), e))?;

        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root_path.clone(),
            });
        }

        Ok(root_path.clone())
    }

    fn read_file(&self, entry: &DirEntry, rules: &ScanRules) -> Result<FileNode, EntryError> {
        let size_bytes = entry.metadata()?.len();
        let name = entry.file_name().to_string_lossy().to_string();
        let counted = rules.is_counted(&name);

        let metrics = if counted {
            count_file_metrics(
                entry.path(),
                size_bytes,
                rules.chars_per_token,
                rules.include_blank_lines,
            )?
        } else {
            Metrics::size_only(size_bytes)
        };

        Ok(FileNode::new(name, metrics, counted))
    }

    fn report(&self, path: PathBuf, error: EntryError) {
        let _ = self.progress_tx.send(ScanProgress::Error { path, error });
    }
}

/// Entry predicate used while walking. Symlinks and special files never
/// make it into the tree.
fn keeps_entry(rules: &ScanRules, root: &Path, entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    let name = entry.file_name().to_string_lossy();
    let rel_path = relative_path(entry.path(), root);

    if file_type.is_dir() {
        rules.keeps_dir(&name, &rel_path)
    } else if file_type.is_file() {
        rules.keeps_file(&name, &rel_path)
    } else {
        false
    }
}

/// Case-insensitive name order, with the exact name as tiebreak.
fn name_order(a: &std::ffi::OsStr, b: &std::ffi::OsStr) -> Ordering {
    let a_lossy = a.to_string_lossy();
    let b_lossy = b.to_string_lossy();
    a_lossy
        .to_lowercase()
        .cmp(&b_lossy.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(unix)]
fn device_of(metadata: &Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.dev())
}

#[cfg(not(unix))]
fn device_of(_metadata: &Metadata) -> Option<u64> {
    None
}

/// True for a directory that lives on another filesystem than the root.
/// walkdir's `same_file_system` only stops descent, the entry itself would
/// still be listed.
fn crosses_mount(entry: &DirEntry, root_device: Option<u64>) -> bool {
    let Some(root_device) = root_device else {
        return false;
    };
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .metadata()
        .ok()
        .and_then(|m| device_of(&m))
        .is_some_and(|device| device != root_device)
}

/// Pop every pending directory at `depth` or deeper and attach it to its
/// parent. Directories that failed to read are dropped whole.
fn close_dirs(stack: &mut Vec<PendingDir>, depth: usize, rules: &ScanRules) {
    while stack.last().is_some_and(|d| d.depth >= depth) {
        let Some(pending) = stack.pop() else { break };
        if pending.failed {
            continue;
        }

        let node = pending.finish();
        if rules.prune_empty && node.is_empty() && node.total().lines == 0 && node.total().tokens == 0 {
            continue;
        }

        if let Some(parent) = stack.last_mut() {
            parent.dirs.push(TreeNode::Dir(node));
        }
    }
}
