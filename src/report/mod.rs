//! Non-interactive output: the text tree report, JSON export and the
//! formatting helpers the browser shares with them.

pub mod format;
mod json;
mod tree;

pub use json::{export_json, ExportOptions};
pub use tree::render_tree;
