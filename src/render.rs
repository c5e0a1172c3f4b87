//! Plain-text rendering of a display tree for the command line.

use std::fmt;

use crate::models::TreeNode;

/// Draw every visible node below `root`, one per line, indented by depth.
///
/// Directories show `▾` when expanded, `▸` when collapsed and `-` when empty;
/// collapsed directories hide their children. Locked nodes (not editable) are
/// marked with `[ro]`.
pub fn render_tree(root: &TreeNode) -> String {
    TreeView(root).to_string()
}

/// `Display` adapter over a display tree, as drawn by [`render_tree`].
pub struct TreeView<'a>(pub &'a TreeNode);

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.0.children() {
            write_node(f, child, 0)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &TreeNode, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let id = node.id.map(|id| id.to_string()).unwrap_or_default();
    let lock = if node.editable { "" } else { " [ro]" };

    match &node.children {
        None => writeln!(f, "{}  {}{}  #{}", indent, node.name, lock, id),
        Some(children) => {
            let marker = if children.is_empty() {
                "-"
            } else if node.is_collapsed {
                "▸"
            } else {
                "▾"
            };
            writeln!(f, "{}{} {}/{}  #{}", indent, marker, node.name, lock, id)?;
            if !node.is_collapsed {
                for child in children {
                    write_node(f, child, depth + 1)?;
                }
            }
            Ok(())
        }
    }
}
