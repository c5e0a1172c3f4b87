//! Tree state owned by a UI consumer.
//!
//! `TreeStateManager` keeps the authoritative record list fetched from a
//! `Repository`, the canonical tree built from it and the display tree
//! filtered by the current search term. Every change to the record list
//! rebuilds both trees from scratch, so collapse flags reset to expanded
//! after each fetch or mutation.
//!
//! Used by: the `show`/`rename`/`move`/`delete` commands in main.rs

use crate::backend::Repository;
use crate::error::{AppError, Result};
use crate::models::{FlatRecord, NodeId, TreeNode};
use crate::tree::{build_tree, can_move, filter_tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing fetched yet.
    Uninitialized,
    /// A repository call is in flight.
    Loading,
    /// Trees reflect the last successful repository response.
    Ready,
}

pub struct TreeStateManager<R> {
    repository: R,
    records: Option<Vec<FlatRecord>>,
    tree: Option<TreeNode>,
    search_term: Option<String>,
    filtered: Option<TreeNode>,
    state: LoadState,
    revision: u64,
}

impl<R: Repository> TreeStateManager<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            records: None,
            tree: None,
            search_term: None,
            filtered: None,
            state: LoadState::Uninitialized,
            revision: 0,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Bumped whenever the display tree may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn records(&self) -> Option<&[FlatRecord]> {
        self.records.as_deref()
    }

    /// Canonical tree, unaffected by the search term.
    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Tree to render: the canonical tree restricted by the search term.
    pub fn display_tree(&self) -> Option<&TreeNode> {
        self.filtered.as_ref()
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub async fn fetch(&mut self) -> Result<()> {
        let previous = self.begin_loading();
        self.reload(previous).await
    }

    /// Fetch the full list. On failure the state falls back to `previous`,
    /// the state held before the operation that asked for the reload.
    async fn reload(&mut self, previous: LoadState) -> Result<()> {
        self.state = LoadState::Loading;
        match self.repository.fetch_all().await {
            Ok(records) => {
                tracing::debug!("Fetched {} records", records.len());
                self.set_records(records);
                Ok(())
            }
            Err(e) => {
                self.state = previous;
                Err(e)
            }
        }
    }

    /// Replace the record list and rebuild both trees.
    pub fn set_records(&mut self, records: Vec<FlatRecord>) {
        self.tree = Some(build_tree(&records));
        self.records = Some(records);
        self.state = LoadState::Ready;
        self.refilter();
    }

    pub fn set_search_term(&mut self, term: Option<String>) {
        self.search_term = term;
        self.refilter();
    }

    /// Flip the collapse flag of a canonical node. Returns false if no node
    /// has this id.
    pub fn toggle_collapsed(&mut self, id: NodeId) -> bool {
        let Some(node) = self.tree.as_mut().and_then(|tree| tree.find_mut(id)) else {
            return false;
        };
        node.is_collapsed = !node.is_collapsed;
        self.refilter();
        true
    }

    pub async fn rename(&mut self, id: NodeId, name: &str) -> Result<()> {
        if let Some(node) = self.find(id) {
            if !node.editable {
                tracing::warn!("Rename of {} rejected: not editable", id);
                return Err(AppError::Permission(format!("record {} is not editable", id)));
            }
        }

        let previous = self.begin_loading();
        let result = self.repository.rename(id, name).await;
        let record = self.settle(previous, result)?;
        self.merge(previous, record).await
    }

    /// Delete on the backend, which decides whether the record may go, then
    /// refetch.
    pub async fn delete(&mut self, id: NodeId) -> Result<()> {
        let previous = self.begin_loading();
        let result = self.repository.delete(id).await;
        self.settle(previous, result)?;
        tracing::info!("Deleted record {}", id);
        self.reload(previous).await
    }

    pub async fn move_node(&mut self, id: NodeId, destination_id: NodeId) -> Result<()> {
        let allowed = self
            .tree
            .as_ref()
            .is_some_and(|tree| can_move(id, destination_id, tree));
        if !allowed {
            tracing::warn!("Move of {} to {} rejected", id, destination_id);
            return Err(AppError::Validation(format!(
                "cannot move record {} into {}",
                id, destination_id
            )));
        }

        let previous = self.begin_loading();
        let result = self.repository.move_to(id, destination_id).await;
        let record = self.settle(previous, result)?;
        self.merge(previous, record).await
    }

    fn find(&self, id: NodeId) -> Option<&TreeNode> {
        self.tree.as_ref().and_then(|tree| tree.find(id))
    }

    fn begin_loading(&mut self) -> LoadState {
        std::mem::replace(&mut self.state, LoadState::Loading)
    }

    /// Restore the pre-call state if the repository call failed.
    fn settle<T>(&mut self, previous: LoadState, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.state = previous;
        }
        result
    }

    /// Swap a returned record into the list by id and rebuild. Without a
    /// list to merge into, fetch the full one instead.
    async fn merge(&mut self, previous: LoadState, record: FlatRecord) -> Result<()> {
        let Some(mut records) = self.records.take() else {
            return self.reload(previous).await;
        };

        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        }
        self.set_records(records);
        Ok(())
    }

    fn refilter(&mut self) {
        self.filtered = self
            .tree
            .as_ref()
            .map(|tree| filter_tree(tree, self.search_term.as_deref()));
        self.revision += 1;
    }
}
