//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. `RequestRepo` owns the two
//! venue-scoped transactional operations (submit, transition);
//! `QueueViewRepo` owns the read-only projections.

pub mod queue_view_repo;
pub mod request_repo;
pub mod session_repo;
pub mod track_repo;
pub mod venue_repo;

pub use queue_view_repo::QueueViewRepo;
pub use request_repo::RequestRepo;
pub use session_repo::SessionRepo;
pub use track_repo::TrackRepo;
pub use venue_repo::VenueRepo;
