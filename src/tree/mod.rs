//! Pure tree algorithms over `FlatRecord`s and `TreeNode`s.
//!
//! - `builder`: Flat record list to nested tree under a synthetic root
//! - `filter`: Search-term view that keeps ancestors of matches
//! - `validate`: Client-side legality check for moves

pub mod builder;
pub mod filter;
pub mod validate;

pub use builder::build_tree;
pub use filter::filter_tree;
pub use validate::can_move;
