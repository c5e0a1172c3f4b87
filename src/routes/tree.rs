//! Read-only nested view of the stored records.
//!
//! - GET /api/v1/tree?search=
//!   Builds the tree from the current records and filters it by `search`.
//!   Returns the synthetic root (no id) with top-level records as children.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::backend::{Repository, SharedRepository};
use crate::error::Result;
use crate::models::TreeNode;
use crate::tree::{build_tree, filter_tree};

pub fn routes(repo: SharedRepository) -> Router {
    Router::new()
        .route("/api/v1/tree", get(get_tree))
        .with_state(repo)
}

#[derive(Debug, Deserialize)]
struct TreeQuery {
    search: Option<String>,
}

async fn get_tree(
    State(repo): State<SharedRepository>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<TreeNode>> {
    let records = repo.fetch_all().await?;
    let tree = build_tree(&records);
    Ok(Json(filter_tree(&tree, query.search.as_deref())))
}
