use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::Repository;
use crate::error::{AppError, Result};
use crate::models::{FlatRecord, NodeId};

/// Record list kept in process memory.
///
/// Every operation runs under one lock, so each call sees and leaves a
/// consistent list.
pub struct InMemoryRepository {
    records: Mutex<Vec<FlatRecord>>,
}

impl InMemoryRepository {
    pub fn new(records: Vec<FlatRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn with_records<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<FlatRecord>) -> Result<T>,
    {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        f(&mut records)
    }
}

fn position(records: &[FlatRecord], id: NodeId) -> Option<usize> {
    records.iter().position(|record| record.id == id)
}

/// Whether `ancestor` appears on the parent chain of `id`.
fn has_ancestor(records: &[FlatRecord], id: NodeId, ancestor: NodeId) -> bool {
    let parent_of = |id: NodeId| position(records, id).and_then(|i| records[i].parent_id);

    let mut current = parent_of(id);
    // Bounded so malformed, cyclic data cannot hang the walk.
    for _ in 0..records.len() {
        match current {
            Some(parent) if parent == ancestor => return true,
            Some(parent) => current = parent_of(parent),
            None => return false,
        }
    }
    false
}

fn subtree_ids(records: &[FlatRecord], id: NodeId) -> HashSet<NodeId> {
    let mut ids = HashSet::from([id]);
    loop {
        let before = ids.len();
        for record in records {
            if record.parent_id.is_some_and(|parent| ids.contains(&parent)) {
                ids.insert(record.id);
            }
        }
        if ids.len() == before {
            return ids;
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn fetch_all(&self) -> Result<Vec<FlatRecord>> {
        self.with_records(|records| Ok(records.clone()))
    }

    async fn rename(&self, id: NodeId, name: &str) -> Result<FlatRecord> {
        self.with_records(|records| {
            let index = position(records, id)
                .ok_or_else(|| AppError::NotFound(format!("record {}", id)))?;
            records[index].name = name.to_string();
            tracing::info!("Renamed record {} to {:?}", id, name);
            Ok(records[index].clone())
        })
    }

    async fn move_to(&self, id: NodeId, destination_id: NodeId) -> Result<FlatRecord> {
        self.with_records(|records| {
            if id == destination_id {
                return Err(AppError::Validation(format!(
                    "cannot move record {} into itself",
                    id
                )));
            }

            let index = position(records, id)
                .ok_or_else(|| AppError::NotFound(format!("record {}", id)))?;
            let old_parent = records[index].parent_id;
            if old_parent == Some(destination_id) {
                return Ok(records[index].clone());
            }

            let dest_index = position(records, destination_id)
                .ok_or_else(|| AppError::NotFound(format!("destination {}", destination_id)))?;

            if !records[index].movable {
                return Err(AppError::Permission(format!("record {} is not movable", id)));
            }
            if !records[dest_index].writable {
                return Err(AppError::Permission(format!(
                    "destination {} is not writable",
                    destination_id
                )));
            }
            if !records[dest_index].is_directory() {
                return Err(AppError::Structural(format!(
                    "destination {} is not a directory",
                    destination_id
                )));
            }
            if has_ancestor(records, destination_id, id) {
                return Err(AppError::Validation(format!(
                    "cannot move record {} into its own subtree",
                    id
                )));
            }

            if let Some(children) = records[dest_index].children_ids.as_mut() {
                children.push(id);
            }
            if let Some(old_index) = old_parent.and_then(|parent| position(records, parent)) {
                if let Some(children) = records[old_index].children_ids.as_mut() {
                    children.retain(|child| *child != id);
                }
            }
            records[index].parent_id = Some(destination_id);

            tracing::info!("Moved record {} under {}", id, destination_id);
            Ok(records[index].clone())
        })
    }

    async fn delete(&self, id: NodeId) -> Result<()> {
        self.with_records(|records| {
            let index = position(records, id)
                .ok_or_else(|| AppError::NotFound(format!("record {}", id)))?;
            let parent_id = records[index].parent_id;

            // Top-level records are always deletable.
            if parent_id.is_some() && !records[index].editable {
                return Err(AppError::Permission(format!("record {} is not editable", id)));
            }

            let doomed = subtree_ids(records, id);
            records.retain(|record| !doomed.contains(&record.id));
            if let Some(parent_index) = parent_id.and_then(|parent| position(records, parent)) {
                if let Some(children) = records[parent_index].children_ids.as_mut() {
                    children.retain(|child| *child != id);
                }
            }

            tracing::info!("Deleted record {} ({} records removed)", id, doomed.len());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: NodeId,
        parent_id: Option<NodeId>,
        children: Option<&[NodeId]>,
        editable: bool,
        writable: bool,
    ) -> FlatRecord {
        FlatRecord {
            id,
            parent_id,
            name: format!("node-{id}"),
            children_ids: children.map(<[NodeId]>::to_vec),
            movable: parent_id.is_some(),
            editable,
            writable,
        }
    }

    //  1 (top-level, locked)
    //  ├── 2 ── 5, 6
    //  ├── 3 ── 7, 9
    //  ├── 4 (file)
    //  └── 8 (read-only dir)
    fn repo() -> InMemoryRepository {
        InMemoryRepository::new(vec![
            record(1, None, Some(&[2, 3, 4, 8]), false, false),
            record(2, Some(1), Some(&[5, 6]), true, true),
            record(3, Some(1), Some(&[7, 9]), true, true),
            record(4, Some(1), None, true, true),
            record(5, Some(2), None, true, true),
            record(6, Some(2), None, false, true),
            record(7, Some(3), None, true, true),
            record(8, Some(1), Some(&[]), true, false),
            record(9, Some(3), Some(&[]), true, true),
        ])
    }

    fn get(repo: &InMemoryRepository, id: NodeId) -> Option<FlatRecord> {
        repo.with_records(|records| Ok(records.iter().find(|r| r.id == id).cloned()))
            .unwrap()
    }

    #[tokio::test]
    async fn rename_updates_the_stored_record() {
        let repo = repo();
        let renamed = repo.rename(5, "notes.md").await.unwrap();
        assert_eq!(renamed.name, "notes.md");
        assert_eq!(get(&repo, 5).unwrap().name, "notes.md");
    }

    #[tokio::test]
    async fn rename_of_unknown_record_is_not_found() {
        let err = repo().rename(99, "x").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn move_relinks_both_parents() {
        let repo = repo();
        let moved = repo.move_to(5, 3).await.unwrap();
        assert_eq!(moved.parent_id, Some(3));
        assert_eq!(get(&repo, 3).unwrap().children_ids, Some(vec![7, 9, 5]));
        assert_eq!(get(&repo, 2).unwrap().children_ids, Some(vec![6]));
    }

    #[tokio::test]
    async fn move_to_current_parent_is_a_no_op() {
        let repo = repo();
        let moved = repo.move_to(5, 2).await.unwrap();
        assert_eq!(moved.parent_id, Some(2));
        assert_eq!(get(&repo, 2).unwrap().children_ids, Some(vec![5, 6]));
    }

    #[tokio::test]
    async fn move_rejections() {
        let repo = repo();
        assert!(matches!(repo.move_to(5, 5).await, Err(AppError::Validation(_))));
        assert!(matches!(repo.move_to(99, 3).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.move_to(5, 99).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.move_to(1, 2).await, Err(AppError::Permission(_))));
        assert!(matches!(repo.move_to(5, 8).await, Err(AppError::Permission(_))));
        assert!(matches!(repo.move_to(5, 4).await, Err(AppError::Structural(_))));
        assert!(matches!(repo.move_to(3, 9).await, Err(AppError::Validation(_))));
        assert_eq!(get(&repo, 5).unwrap().parent_id, Some(2));
    }

    #[tokio::test]
    async fn delete_top_level_ignores_editable() {
        let repo = repo();
        repo.delete(1).await.unwrap();
        assert!(repo.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_nested_requires_editable() {
        let repo = repo();
        let err = repo.delete(6).await.unwrap_err();
        assert!(matches!(err, AppError::Permission(_)));
        assert!(get(&repo, 6).is_some());
    }

    #[tokio::test]
    async fn delete_removes_subtree_and_parent_link() {
        let repo = repo();
        repo.delete(3).await.unwrap();
        assert!(get(&repo, 3).is_none());
        assert!(get(&repo, 7).is_none());
        assert!(get(&repo, 9).is_none());
        assert_eq!(get(&repo, 1).unwrap().children_ids, Some(vec![2, 4, 8]));
        assert_eq!(repo.fetch_all().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn delete_of_unknown_record_is_not_found() {
        assert!(matches!(repo().delete(99).await, Err(AppError::NotFound(_))));
    }
}
