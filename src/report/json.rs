use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::tree::{DirNode, Metrics, TreeNode};

/// Represents a node in the exported tree structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportNode {
    pub path: String,
    pub name: String,
    pub is_dir: bool,
    /// Own metrics for files, total for directories
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub root: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subdirs: Option<Metrics>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub counted: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ExportNode>,
}

/// Options for customizing the JSON export
pub struct ExportOptions {
    /// If Some(n), flatten the tree and return the top n files by tokens.
    /// If None, export the full tree structure.
    pub top_n: Option<usize>,
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Recursively convert a directory to an ExportNode. Paths are relative to
/// the exported root.
pub fn dir_to_export_node(dir: &DirNode, rel_path: &str) -> ExportNode {
    let children = dir
        .children()
        .iter()
        .map(|child| {
            let child_path = join(rel_path, child.name());
            match child {
                TreeNode::Dir(sub) => dir_to_export_node(sub, &child_path),
                TreeNode::File(file) => ExportNode {
                    path: child_path,
                    name: file.name.clone(),
                    is_dir: false,
                    metrics: file.metrics,
                    root: None,
                    subdirs: None,
                    counted: Some(file.counted),
                    children: Vec::new(),
                },
            }
        })
        .collect();

    ExportNode {
        path: rel_path.to_string(),
        name: dir.name.clone(),
        is_dir: true,
        metrics: dir.total(),
        root: Some(dir.root()),
        subdirs: Some(dir.subdirs()),
        counted: None,
        children,
    }
}

/// Flatten the files of a tree into ExportNodes (without children)
fn flatten_files(node: ExportNode, result: &mut Vec<ExportNode>) {
    if node.is_dir {
        for child in node.children {
            flatten_files(child, result);
        }
    } else {
        result.push(node);
    }
}

/// Export the aggregation tree to JSON format
///
/// # Arguments
/// * `root` - The scanned root directory
/// * `options` - Export options (top_n for flattening, None for full tree)
/// * `writer` - Output writer for the JSON
pub fn export_json(
    root: &DirNode,
    options: &ExportOptions,
    writer: &mut impl Write,
) -> Result<(), std::io::Error> {
    let export_tree = dir_to_export_node(root, "");

    match options.top_n {
        Some(n) => {
            let mut flattened = Vec::new();
            flatten_files(export_tree, &mut flattened);

            flattened.sort_by(|a, b| {
                b.metrics
                    .tokens
                    .cmp(&a.metrics.tokens)
                    .then_with(|| a.path.cmp(&b.path))
            });
            flattened.truncate(n);

            serde_json::to_writer_pretty(writer, &flattened).map_err(std::io::Error::from)
        }
        None => serde_json::to_writer_pretty(writer, &export_tree).map_err(std::io::Error::from),
    }
}
