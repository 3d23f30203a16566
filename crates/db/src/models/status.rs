//! Status helper enum mapping to the SMALLSERIAL `request_statuses` lookup
//! table. Variant discriminants match the seed data order (1-based).
//!
//! The transition rules themselves live in `encore_core::queue`; this enum
//! is the typed bridge between database rows and those rules.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Request playback status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending = 1,
    Playing = 2,
    Completed = 3,
    Cancelled = 4,
}

impl RequestStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// The lowercase name used in the API and the seed data.
    pub fn name(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Playing => "playing",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Parse an API-facing status name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pending" => Some(RequestStatus::Pending),
            "playing" => Some(RequestStatus::Playing),
            "completed" => Some(RequestStatus::Completed),
            "cancelled" => Some(RequestStatus::Cancelled),
            _ => None,
        }
    }
}

impl From<RequestStatus> for StatusId {
    fn from(value: RequestStatus) -> Self {
        value as StatusId
    }
}
