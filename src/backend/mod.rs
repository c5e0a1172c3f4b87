//! Backend access for the flat record list.
//!
//! - `Repository`: The four operations the tree manager needs
//! - `memory`: Mutex-guarded in-memory implementation (tests, `serve`)
//! - `http`: Client for the JSON API served by `routes`
//! - `seed`: Demo records and JSON seed file loading

pub mod http;
pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FlatRecord, NodeId};

pub use http::HttpRepository;
pub use memory::InMemoryRepository;

/// Authoritative store of `FlatRecord`s.
///
/// Implementations enforce their own rejection rules; the tree manager only
/// performs advisory checks before calling in.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Every record, in storage order.
    async fn fetch_all(&self) -> Result<Vec<FlatRecord>>;

    /// Rename a record and return its new state.
    async fn rename(&self, id: NodeId, name: &str) -> Result<FlatRecord>;

    /// Re-parent a record under `destination_id` and return its new state.
    async fn move_to(&self, id: NodeId, destination_id: NodeId) -> Result<FlatRecord>;

    /// Remove a record together with everything below it.
    async fn delete(&self, id: NodeId) -> Result<()>;
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn fetch_all(&self) -> Result<Vec<FlatRecord>> {
        (**self).fetch_all().await
    }

    async fn rename(&self, id: NodeId, name: &str) -> Result<FlatRecord> {
        (**self).rename(id, name).await
    }

    async fn move_to(&self, id: NodeId, destination_id: NodeId) -> Result<FlatRecord> {
        (**self).move_to(id, destination_id).await
    }

    async fn delete(&self, id: NodeId) -> Result<()> {
        (**self).delete(id).await
    }
}

pub type SharedRepository = Arc<dyn Repository>;
