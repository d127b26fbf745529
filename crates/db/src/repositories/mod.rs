//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod project_repo;
pub mod screen_repo;

pub use project_repo::ProjectRepo;
pub use screen_repo::{CommentAppend, ScreenRepo};
