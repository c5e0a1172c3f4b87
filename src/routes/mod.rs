//! API route handlers - maps HTTP endpoints to repository operations.
//!
//! Each submodule defines routes for a feature area:
//! - `files`: Flat record listing and the rename/move/delete mutations
//! - `tree`: Nested, optionally filtered view built server-side

pub mod files;
pub mod tree;

use axum::Router;

use crate::backend::SharedRepository;

pub fn create_router(repo: SharedRepository) -> Router {
    Router::new()
        .merge(files::routes(repo.clone()))
        .merge(tree::routes(repo))
}
