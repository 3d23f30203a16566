//! Domain logic for the Encore request queue.
//!
//! This crate has zero internal dependencies so the state machine and
//! admission rules can be used by the repository layer, the API layer,
//! and any future CLI or scheduled tooling.

pub mod error;
pub mod queue;
pub mod types;
