mod node;

pub use node::{DirNode, FileNode, Metrics, TreeNode};
