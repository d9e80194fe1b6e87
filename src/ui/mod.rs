pub mod colors;
mod input;
mod layout;
mod view;

pub use colors::ColorScheme;
pub use input::{handle_key, Command, SortKey};
pub use layout::render_ui;
pub use view::sorted_children;
