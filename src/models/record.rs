//! Backend record DTOs.
//!
//! - `FlatRecord`: One parent-linked entry of the authoritative flat list
//! - `RenameRequest`, `MoveRequest`: Request bodies for the mutation endpoints

use serde::{Deserialize, Serialize};

pub type NodeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub name: String,
    /// `None` marks a file, `Some` (possibly empty) a directory.
    pub children_ids: Option<Vec<NodeId>>,
    /// Can this record be moved elsewhere?
    pub movable: bool,
    /// Can this record be renamed (or deleted when nested)?
    pub editable: bool,
    /// Can other records be moved into this one?
    pub writable: bool,
}

impl FlatRecord {
    pub fn is_directory(&self) -> bool {
        self.children_ids.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub destination_id: NodeId,
}
