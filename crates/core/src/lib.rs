//! Domain types and pure logic for the design-review backend.
//!
//! Nothing in this crate performs I/O. The vision mapping, the model-output
//! parser and the role filter are all plain functions so they can be tested
//! in isolation from the HTTP clients and the database.

pub mod error;
pub mod feedback;
pub mod roles;
pub mod suggestions;
pub mod types;
pub mod upload;
pub mod vision;
