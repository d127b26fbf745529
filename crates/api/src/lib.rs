//! DesignSight API server library.
//!
//! Exposes config, state, error handling, the router builder and the route
//! tree so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
