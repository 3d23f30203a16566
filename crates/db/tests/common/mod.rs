//! Shared seeding helpers for repository integration tests.

use sqlx::PgPool;

use encore_core::types::DbId;
use encore_db::models::session::OpenSession;
use encore_db::models::track::CreateTrack;
use encore_db::models::venue::{CreateVenue, Venue};
use encore_db::repositories::{SessionRepo, TrackRepo, VenueRepo};

/// Create a venue with the given admission caps.
pub async fn venue(pool: &PgPool, max_per_patron: i16, queue_limit: i32) -> Venue {
    VenueRepo::create(
        pool,
        &CreateVenue {
            name: "The Velvet Room".into(),
            slug: format!("velvet-{}", uuid::Uuid::new_v4()),
            max_requests_per_patron: Some(max_per_patron),
            queue_limit: Some(queue_limit),
        },
    )
    .await
    .expect("failed to seed venue")
}

/// Add an active track to the venue's catalog.
pub async fn track(pool: &PgPool, venue_id: DbId, title: &str) -> DbId {
    TrackRepo::create(
        pool,
        venue_id,
        &CreateTrack {
            title: title.into(),
            artist: Some("Test Artist".into()),
            duration_secs: Some(200),
        },
    )
    .await
    .expect("failed to seed track")
    .id
}

/// Open an anonymous patron session at the venue.
pub async fn patron(pool: &PgPool, venue_id: DbId, table_tag: &str) -> DbId {
    SessionRepo::open(
        pool,
        venue_id,
        &OpenSession {
            account_ref: None,
            table_tag: Some(table_tag.into()),
        },
        12,
    )
    .await
    .expect("failed to seed patron session")
    .id
}
