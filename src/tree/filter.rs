use crate::models::TreeNode;

/// Restrict `tree` to the nodes whose subtree contains `term`.
///
/// A node is kept when its name contains `term` (case-sensitive substring) or
/// when it is a directory with at least one kept child; kept directories only
/// list their kept children. The root is always kept. An empty or missing
/// term returns the tree unchanged.
pub fn filter_tree(tree: &TreeNode, term: Option<&str>) -> TreeNode {
    let term = match term {
        Some(term) if !term.is_empty() => term,
        _ => return tree.clone(),
    };

    let filtered = tree.with_children(
        tree.children
            .as_ref()
            .map(|children| filter_children(children, term)),
    );
    tracing::debug!(
        "Filtered tree for {:?}: {} of {} nodes kept",
        term,
        filtered.node_count(),
        tree.node_count()
    );
    filtered
}

/// Whether `node` or anything below it contains `term`.
pub fn matches(node: &TreeNode, term: &str) -> bool {
    node.name.contains(term) || node.children().iter().any(|child| matches(child, term))
}

fn filter_children(children: &[TreeNode], term: &str) -> Vec<TreeNode> {
    children.iter().filter_map(|child| prune(child, term)).collect()
}

fn prune(node: &TreeNode, term: &str) -> Option<TreeNode> {
    match &node.children {
        None => node.name.contains(term).then(|| node.clone()),
        Some(children) => {
            let kept = filter_children(children, term);
            (node.name.contains(term) || !kept.is_empty())
                .then(|| node.with_children(Some(kept)))
        }
    }
}
