//! File tree browser core.
//!
//! Converts a backend's flat, parent-linked record list into a nested tree,
//! filters it by search term and runs rename/move/delete against the backend
//! with client-side permission and move checks.
//!
//! - `state`: `TreeStateManager`, the owned state a UI drives
//! - `tree`: Pure build/filter/validate algorithms
//! - `backend`: `Repository` trait with in-memory and HTTP implementations
//! - `routes`: Axum router exposing an in-memory store as JSON
//! - `render`: Text rendering of display trees

pub mod backend;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
pub mod tree;

pub use error::{AppError, Result};
pub use state::{LoadState, TreeStateManager};
