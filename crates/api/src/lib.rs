//! HTTP adapter for the Encore request queue.
//!
//! Exposed as a library so integration tests can build the exact router
//! and middleware stack the binary runs.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
