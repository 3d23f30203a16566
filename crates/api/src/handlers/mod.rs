//! Request handlers, one module per resource.

pub mod queue;
pub mod requests;
pub mod sessions;
pub mod tracks;
pub mod venues;
