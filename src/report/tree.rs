//! Static text rendering of the aggregation tree.

use crate::tree::{DirNode, FileNode, TreeNode};

use super::format::format_metrics;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Render the tree with box-drawing branches, one line per node.
pub fn render_tree(root: &DirNode) -> String {
    let mut lines = Vec::new();
    lines.push(format!(".{}", dir_suffix(root)));
    walk(root, "", &mut lines);
    lines.join("\n")
}

fn walk(dir: &DirNode, prefix: &str, lines: &mut Vec<String>) {
    let children = dir.children();
    for (index, child) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();
        let branch = if is_last { LAST_BRANCH } else { BRANCH };

        match child {
            TreeNode::Dir(sub) => {
                lines.push(format!("{}{}{}{}", prefix, branch, sub.name, dir_suffix(sub)));
                let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
                walk(sub, &child_prefix, lines);
            }
            TreeNode::File(file) => {
                lines.push(format!(
                    "{}{}{} ({})",
                    prefix,
                    branch,
                    file.name,
                    describe_file(file)
                ));
            }
        }
    }
}

fn dir_suffix(dir: &DirNode) -> String {
    format!(
        " (root: {}; subdirs: {}; total: {})",
        format_metrics(&dir.root()),
        format_metrics(&dir.subdirs()),
        format_metrics(&dir.total())
    )
}

/// Metrics of a file, flagged when its extension is not counted.
pub fn describe_file(file: &FileNode) -> String {
    if file.counted {
        format_metrics(&file.metrics)
    } else {
        format!(
            "{}; excluded extension ({})",
            format_metrics(&file.metrics),
            file.extension.as_deref().unwrap_or("<no-ext>")
        )
    }
}
