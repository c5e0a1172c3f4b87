//! End-user scenarios driven through the public API with the in-memory
//! backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use file_tree::backend::{InMemoryRepository, Repository};
use file_tree::models::{FlatRecord, NodeId};
use file_tree::tree::{build_tree, can_move, filter_tree};
use file_tree::{AppError, LoadState, Result, TreeStateManager};

fn record(
    id: NodeId,
    parent_id: Option<NodeId>,
    name: &str,
    children: Option<Vec<NodeId>>,
) -> FlatRecord {
    FlatRecord {
        id,
        parent_id,
        name: name.to_string(),
        children_ids: children,
        movable: true,
        editable: true,
        writable: true,
    }
}

/// Wraps a repository and counts every call that reaches it.
struct Spy<R> {
    inner: R,
    calls: AtomicUsize,
}

impl<R> Spy<R> {
    fn new(inner: R) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Repository> Repository for Spy<R> {
    async fn fetch_all(&self) -> Result<Vec<FlatRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_all().await
    }

    async fn rename(&self, id: NodeId, name: &str) -> Result<FlatRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.rename(id, name).await
    }

    async fn move_to(&self, id: NodeId, destination_id: NodeId) -> Result<FlatRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.move_to(id, destination_id).await
    }

    async fn delete(&self, id: NodeId) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

#[test]
fn search_keeps_ancestor_of_match_and_drops_unmatched_directory() {
    let records = vec![
        record(1, None, "root", Some(vec![2, 3])),
        record(2, Some(1), "dir1", Some(vec![])),
        record(3, Some(1), "a.txt", None),
    ];
    let tree = build_tree(&records);
    let filtered = filter_tree(&tree, Some("a"));

    assert!(filtered.find(1).is_some());
    assert!(filtered.find(3).is_some());
    assert!(filtered.find(2).is_none());
}

#[tokio::test]
async fn rename_of_locked_node_is_refused_locally() {
    let mut locked = record(2, Some(1), "readonly.txt", None);
    locked.editable = false;
    let repo = Spy::new(InMemoryRepository::new(vec![
        record(1, None, "root", Some(vec![2])),
        locked,
    ]));

    let mut manager = TreeStateManager::new(repo.clone());
    manager.fetch().await.unwrap();
    let calls = repo.calls();

    let err = manager.rename(2, "writable.txt").await.unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));
    assert_eq!(repo.calls(), calls);
    assert_eq!(manager.state(), LoadState::Ready);
}

#[tokio::test]
async fn directory_cannot_move_into_its_descendant() {
    let records = vec![
        record(1, None, "root", Some(vec![2])),
        record(2, Some(1), "dir", Some(vec![5])),
        record(5, Some(2), "inner", Some(vec![])),
    ];
    let tree = build_tree(&records);
    assert!(!can_move(2, 5, &tree));

    let repo = Spy::new(InMemoryRepository::new(records));
    let mut manager = TreeStateManager::new(repo.clone());
    manager.fetch().await.unwrap();
    let calls = repo.calls();

    let err = manager.move_node(2, 5).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(repo.calls(), calls);
}

#[tokio::test]
async fn top_level_node_is_deletable_even_when_locked() {
    let mut top = record(1, None, "root", Some(vec![2]));
    top.editable = false;
    let mut manager = TreeStateManager::new(InMemoryRepository::new(vec![
        top,
        record(2, Some(1), "child.txt", None),
        record(3, None, "other", Some(vec![])),
    ]));
    manager.fetch().await.unwrap();

    manager.delete(1).await.unwrap();
    let tree = manager.tree().unwrap();
    assert!(tree.find(1).is_none());
    assert!(tree.find(2).is_none());
    assert_eq!(tree.descendant_ids(), vec![3]);
}

#[tokio::test]
async fn browse_search_and_edit_session() {
    let mut manager = TreeStateManager::new(InMemoryRepository::new(vec![
        record(1, None, "project", Some(vec![2, 3])),
        record(2, Some(1), "src", Some(vec![4])),
        record(3, Some(1), "docs", Some(vec![])),
        record(4, Some(2), "main.rs", None),
    ]));
    manager.fetch().await.unwrap();

    manager.set_search_term(Some(".rs".into()));
    assert_eq!(manager.display_tree().unwrap().descendant_ids(), vec![1, 2, 4]);

    manager.move_node(4, 3).await.unwrap();
    assert_eq!(manager.search_term(), Some(".rs"));
    assert_eq!(manager.display_tree().unwrap().descendant_ids(), vec![1, 3, 4]);

    manager.rename(4, "guide.md").await.unwrap();
    assert!(manager.display_tree().unwrap().descendant_ids().is_empty());

    manager.set_search_term(Some(String::new()));
    assert_eq!(manager.display_tree(), manager.tree());
    assert_eq!(manager.tree().unwrap().find(4).unwrap().parent_id, Some(3));
}
