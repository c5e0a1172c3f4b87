//! Initial record lists for `InMemoryRepository`.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{FlatRecord, NodeId};

/// Load a JSON array of `FlatRecord`s.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<FlatRecord>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let records: Vec<FlatRecord> = serde_json::from_str(&contents)?;
    tracing::info!(
        "Loaded {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

fn entry(
    id: NodeId,
    parent_id: Option<NodeId>,
    name: &str,
    children_ids: Option<Vec<NodeId>>,
    unlocked: bool,
) -> FlatRecord {
    FlatRecord {
        id,
        parent_id,
        name: name.to_string(),
        children_ids,
        movable: unlocked,
        editable: unlocked,
        writable: unlocked,
    }
}

/// Small demo tree served when no seed file is given.
///
/// The two top-level records are locked; everything below them is fully
/// editable except `LICENSE`, which cannot be renamed or deleted.
pub fn demo_records() -> Vec<FlatRecord> {
    let mut records = vec![
        entry(1, None, "workspace", Some(vec![2, 3, 4]), false),
        entry(100, None, "archive", Some(vec![]), false),
        entry(2, Some(1), "src", Some(vec![5, 6]), true),
        entry(3, Some(1), "docs", Some(vec![7]), true),
        entry(4, Some(1), "LICENSE", None, true),
        entry(5, Some(2), "main.rs", None, true),
        entry(6, Some(2), "lib.rs", None, true),
        entry(7, Some(3), "guide.md", None, true),
    ];
    if let Some(license) = records.iter_mut().find(|record| record.id == 4) {
        license.editable = false;
    }
    records
}
