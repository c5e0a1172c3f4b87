//! Nested tree DTOs.
//!
//! - `TreeNode`: Recursive node derived from `FlatRecord`s (file tree view)
//! - The synthetic root is a `TreeNode` with no id, see `TreeNode::root`

use serde::{Deserialize, Serialize};

use crate::models::{FlatRecord, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// `None` only for the synthetic root.
    pub id: Option<NodeId>,
    pub parent_id: Option<NodeId>,
    pub name: String,
    /// `None` means a file, an empty list an empty directory.
    pub children: Option<Vec<TreeNode>>,
    pub is_collapsed: bool,
    pub movable: bool,
    pub editable: bool,
    pub writable: bool,
}

impl TreeNode {
    /// The anchor for all top-level records. Never stored by the backend.
    pub fn root() -> Self {
        Self {
            id: None,
            parent_id: None,
            name: String::new(),
            children: Some(Vec::new()),
            is_collapsed: false,
            movable: false,
            editable: false,
            writable: true,
        }
    }

    pub fn from_record(record: &FlatRecord, children: Option<Vec<TreeNode>>) -> Self {
        Self {
            id: Some(record.id),
            parent_id: record.parent_id,
            name: record.name.clone(),
            children,
            is_collapsed: false,
            movable: record.movable,
            editable: record.editable,
            writable: record.writable,
        }
    }

    /// Copy of this node's own fields with a replacement child list.
    pub fn with_children(&self, children: Option<Vec<TreeNode>>) -> Self {
        Self {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name.clone(),
            children,
            is_collapsed: self.is_collapsed,
            movable: self.movable,
            editable: self.editable,
            writable: self.writable,
        }
    }

    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        if self.id == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        if self.id == Some(id) {
            return Some(self);
        }
        self.children
            .as_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Ids of every node below this one in pre-order.
    pub fn descendant_ids(&self) -> Vec<NodeId> {
        fn collect(node: &TreeNode, out: &mut Vec<NodeId>) {
            for child in node.children() {
                if let Some(id) = child.id {
                    out.push(id);
                }
                collect(child, out);
            }
        }

        let mut ids = Vec::new();
        collect(self, &mut ids);
        ids
    }
}
