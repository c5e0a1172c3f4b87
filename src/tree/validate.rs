use crate::models::{NodeId, TreeNode};

/// Client-side check that `node_id` may be moved under `destination_id`.
///
/// Rejects unknown nodes, moves onto the node itself and moves to the node's
/// current parent. A directory is only movable if each of its children is,
/// recursively, against the same destination. In a tree produced by
/// `build_tree` this rules out every destination inside the moved subtree.
/// The backend remains the final authority.
pub fn can_move(node_id: NodeId, destination_id: NodeId, tree: &TreeNode) -> bool {
    let Some(node) = tree.find(node_id) else {
        return false;
    };

    if node_id == destination_id {
        return false;
    }

    if node.parent_id == Some(destination_id) {
        return false;
    }

    match &node.children {
        Some(children) => children.iter().all(|child| {
            child
                .id
                .is_some_and(|child_id| can_move(child_id, destination_id, tree))
        }),
        None => true,
    }
}
