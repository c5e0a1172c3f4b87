//! Flat record endpoints backing `HttpRepository`.
//!
//! - GET /api/v1/files
//!   Returns every record in storage order.
//!
//! - POST /api/v1/files/{id}/rename { name: string }
//!   Renames a record, returns the updated record. 404 for unknown ids.
//!
//! - POST /api/v1/files/{id}/move { destination_id: number }
//!   Re-parents a record, returns the updated record.
//!   400 self/subtree move, 403 locked source or destination,
//!   404 unknown id, 422 destination is a file.
//!
//! - DELETE /api/v1/files/{id}
//!   Removes a record and its subtree. 403 for locked nested records.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};

use crate::backend::{Repository, SharedRepository};
use crate::error::Result;
use crate::models::{FlatRecord, MoveRequest, NodeId, RenameRequest};

pub fn routes(repo: SharedRepository) -> Router {
    Router::new()
        .route("/api/v1/files", get(list_files))
        .route("/api/v1/files/{id}", delete(delete_file))
        .route("/api/v1/files/{id}/rename", post(rename_file))
        .route("/api/v1/files/{id}/move", post(move_file))
        .with_state(repo)
}

async fn list_files(State(repo): State<SharedRepository>) -> Result<Json<Vec<FlatRecord>>> {
    let records = repo.fetch_all().await?;
    Ok(Json(records))
}

async fn rename_file(
    State(repo): State<SharedRepository>,
    Path(id): Path<NodeId>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<FlatRecord>> {
    let record = repo.rename(id, &request.name).await?;
    Ok(Json(record))
}

async fn move_file(
    State(repo): State<SharedRepository>,
    Path(id): Path<NodeId>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<FlatRecord>> {
    let record = repo.move_to(id, request.destination_id).await?;
    Ok(Json(record))
}

async fn delete_file(
    State(repo): State<SharedRepository>,
    Path(id): Path<NodeId>,
) -> Result<Json<()>> {
    repo.delete(id).await?;
    Ok(Json(()))
}
