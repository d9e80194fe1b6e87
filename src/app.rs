//! Browser state machine.
//!
//! The app holds only navigation and sort state; the tree it browses is a
//! read-only snapshot borrowed for the app's whole lifetime. Each command is
//! applied completely by [`App::handle_command`] before the next one, and the
//! renderer reads the result through [`crate::ui::ViewModel`].

use crate::tree::{DirNode, TreeNode};
use crate::ui::{sorted_children, Command, SortKey};

/// Application state
#[derive(Debug, Clone)]
pub struct App<'a> {
    // Core data
    current: &'a DirNode,
    path_stack: Vec<&'a DirNode>,
    rows: Vec<&'a TreeNode>,

    // View state
    pub cursor: usize,
    pub scroll_offset: usize,
    pub page_size: usize,
    pub sort_key: SortKey,
    pub ascending: bool,

    // Flags
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Start browsing at `root`, sorted by tokens.
    pub fn new(root: &'a DirNode) -> Self {
        let sort_key = SortKey::default();
        let ascending = sort_key.default_ascending();

        Self {
            current: root,
            path_stack: Vec::new(),
            rows: sorted_children(root, sort_key, ascending),
            cursor: 0,
            scroll_offset: 0,
            page_size: 1,
            sort_key,
            ascending,
            should_quit: false,
        }
    }

    pub fn current(&self) -> &'a DirNode {
        self.current
    }

    /// Visible rows of the current directory, in display order.
    pub fn rows(&self) -> &[&'a TreeNode] {
        &self.rows
    }

    /// Number of directories between the root and the current one.
    pub fn depth(&self) -> usize {
        self.path_stack.len()
    }

    pub fn selected(&self) -> Option<&'a TreeNode> {
        self.rows.get(self.cursor).copied()
    }

    /// Handle a command from input
    pub fn handle_command(&mut self, cmd: Command) {
        if self.should_quit {
            return;
        }

        match cmd {
            Command::MoveUp => self.move_by(-1),
            Command::MoveDown => self.move_by(1),
            Command::PageUp => self.move_by(-(self.page_size.max(1) as isize)),
            Command::PageDown => self.move_by(self.page_size.max(1) as isize),
            Command::GotoTop => self.cursor = 0,
            Command::GotoBottom => self.cursor = self.rows.len().saturating_sub(1),
            Command::Open => self.open(),
            Command::Back => self.up(),
            Command::CycleSort => self.cycle_sort(),
            Command::ReverseSort => self.reverse_sort(),
            Command::Quit => self.should_quit = true,
            Command::Noop => {}
        }
    }

    /// Move the cursor by `delta` rows, clamped to the visible rows.
    pub fn move_by(&mut self, delta: isize) {
        let last = self.rows.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Enter the directory under the cursor. Files are left alone.
    pub fn open(&mut self) {
        if let Some(TreeNode::Dir(dir)) = self.selected() {
            self.path_stack.push(self.current);
            self.current = dir;
            self.cursor = 0;
            self.scroll_offset = 0;
            self.refresh_rows();
        }
    }

    /// Return to the parent directory with the cursor on the directory just
    /// left. No-op at the root.
    pub fn up(&mut self) {
        let Some(parent) = self.path_stack.pop() else {
            return;
        };

        let exited = self.current;
        self.current = parent;
        self.refresh_rows();
        self.cursor = self
            .rows
            .iter()
            .position(|node| node.as_dir().is_some_and(|d| std::ptr::eq(d, exited)))
            .unwrap_or(0);
    }

    /// Advance to the next sort key in its natural direction.
    pub fn cycle_sort(&mut self) {
        self.sort_key = self.sort_key.next();
        self.ascending = self.sort_key.default_ascending();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.refresh_rows();
    }

    /// Flip the direction of the current sort key.
    pub fn reverse_sort(&mut self) {
        self.ascending = !self.ascending;
        self.cursor = 0;
        self.scroll_offset = 0;
        self.refresh_rows();
    }

    /// Adjust the scroll offset so the cursor row is inside a window of
    /// `visible_height` rows.
    pub fn ensure_visible(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }

        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor + 1 - visible_height;
        }
    }

    fn refresh_rows(&mut self) {
        self.rows = sorted_children(self.current, self.sort_key, self.ascending);
    }
}
