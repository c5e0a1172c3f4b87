//! Data transfer objects shared by the server, the repositories and the tree.
//!
//! These structs are serialized to JSON on the wire.
//! - `record`: FlatRecord and the rename/move request bodies
//! - `tree`: TreeNode, the nested view built from records

pub mod record;
pub mod tree;

pub use record::*;
pub use tree::*;
