use std::collections::{HashMap, HashSet};

use crate::models::{FlatRecord, NodeId, TreeNode};

/// Build the nested tree for a flat record list.
///
/// Records are grouped by parent id in one pass, then assembled top-down from
/// the synthetic root. Anything not reachable from the root (dangling parent,
/// parent that is a file, duplicate id) is left out. Children keep input order.
pub fn build_tree(records: &[FlatRecord]) -> TreeNode {
    let mut by_parent: HashMap<Option<NodeId>, Vec<&FlatRecord>> = HashMap::new();
    let mut seen: HashSet<NodeId> = HashSet::with_capacity(records.len());

    for record in records {
        if !seen.insert(record.id) {
            tracing::warn!("Dropping record with duplicate id {}", record.id);
            continue;
        }
        by_parent.entry(record.parent_id).or_default().push(record);
    }

    fn attach(
        parent_id: Option<NodeId>,
        by_parent: &HashMap<Option<NodeId>, Vec<&FlatRecord>>,
    ) -> Vec<TreeNode> {
        let Some(records) = by_parent.get(&parent_id) else {
            return Vec::new();
        };

        records
            .iter()
            .map(|record| {
                let children = if record.is_directory() {
                    Some(attach(Some(record.id), by_parent))
                } else {
                    None
                };
                TreeNode::from_record(record, children)
            })
            .collect()
    }

    let mut root = TreeNode::root();
    root.children = Some(attach(None, &by_parent));

    let attached = root.node_count() - 1;
    if attached < records.len() {
        tracing::debug!(
            "Built tree with {} of {} records ({} discarded)",
            attached,
            records.len(),
            records.len() - attached
        );
    } else {
        tracing::debug!("Built tree with {} records", attached);
    }

    root
}
