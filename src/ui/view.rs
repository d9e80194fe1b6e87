//! View model for the browser table: sorted rows with precomputed bars.

use std::cmp::Ordering;

use crate::app::App;
use crate::tree::{DirNode, TreeNode};

use super::input::SortKey;

/// One table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub node: &'a TreeNode,
    /// Filled cells of the lines bar.
    pub loc_bar: usize,
    /// Filled cells of the tokens bar.
    pub token_bar: usize,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct ViewModel<'a> {
    pub current: &'a DirNode,
    pub depth: usize,
    pub sort_key: SortKey,
    pub ascending: bool,
    pub rows: Vec<Row<'a>>,
    pub cursor: usize,
    pub bar_width: usize,
}

impl<'a> ViewModel<'a> {
    /// Build the view of the app's current directory with bars `bar_width`
    /// cells wide.
    pub fn build(app: &App<'a>, bar_width: usize) -> Self {
        let rows = app.rows();
        let max_lines = rows.iter().map(|n| n.metrics().lines).max().unwrap_or(0);
        let max_tokens = rows.iter().map(|n| n.metrics().tokens).max().unwrap_or(0);

        let rows = rows
            .iter()
            .map(|&node| {
                let m = node.metrics();
                Row {
                    node,
                    loc_bar: bar_len(m.lines, max_lines, bar_width),
                    token_bar: bar_len(m.tokens, max_tokens, bar_width),
                }
            })
            .collect();

        Self {
            current: app.current(),
            depth: app.depth(),
            sort_key: app.sort_key,
            ascending: app.ascending,
            rows,
            cursor: app.cursor,
            bar_width,
        }
    }

    pub fn sort_label(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{} ({})", self.sort_key.label(), direction)
    }
}

/// Filled cells for `value` relative to `max`: proportional and rounded,
/// at least one cell for any non-zero value, none when `max` is zero.
pub fn bar_len(value: u64, max: u64, width: usize) -> usize {
    if width == 0 || max == 0 || value == 0 {
        return 0;
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    filled.clamp(1, width)
}

/// Children of `dir` ordered for display. Ties always fall back to name
/// ascending, whatever the direction of the primary key.
pub fn sorted_children(dir: &DirNode, key: SortKey, ascending: bool) -> Vec<&TreeNode> {
    let mut rows: Vec<&TreeNode> = dir.children().iter().collect();
    rows.sort_by(|a, b| {
        let primary = match key {
            SortKey::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortKey::Tokens => a.metrics().tokens.cmp(&b.metrics().tokens),
            SortKey::Lines => a.metrics().lines.cmp(&b.metrics().lines),
            SortKey::Size => a.metrics().size_bytes.cmp(&b.metrics().size_bytes),
        };
        let primary = if ascending { primary } else { primary.reverse() };
        primary.then_with(|| name_order(a, b))
    });
    rows
}

fn name_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}
