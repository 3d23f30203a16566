//! Request queue rules: playback state machine, admission checks, and the
//! wait-estimate heuristic.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the repository layer and any future scheduled tooling. Status IDs
//! are duplicated from the `db` crate's `RequestStatus` enum for the same
//! reason; both match the 1-based `request_statuses` seed data.

use crate::error::{CoreError, LimitScope};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status IDs
// ---------------------------------------------------------------------------

/// Initial status of every admitted request.
pub const STATUS_PENDING: i16 = 1;

/// The request is currently being played.
pub const STATUS_PLAYING: i16 = 2;

/// Terminal: playback finished.
pub const STATUS_COMPLETED: i16 = 3;

/// Terminal: withdrawn by the patron or staff.
pub const STATUS_CANCELLED: i16 = 4;

/// Human-readable name for a status ID (for error messages and logs).
pub fn status_name(id: i16) -> &'static str {
    match id {
        STATUS_PENDING => "pending",
        STATUS_PLAYING => "playing",
        STATUS_COMPLETED => "completed",
        STATUS_CANCELLED => "cancelled",
        _ => "unknown",
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

pub mod state_machine {
    use super::*;

    /// Returns the set of valid target status IDs reachable from `from`.
    ///
    /// Terminal states (completed, cancelled) return an empty slice because
    /// no further transitions are allowed.
    pub fn valid_transitions(from: i16) -> &'static [i16] {
        match from {
            STATUS_PENDING => &[STATUS_PLAYING, STATUS_CANCELLED],
            STATUS_PLAYING => &[STATUS_COMPLETED, STATUS_CANCELLED],
            // Terminal states and unknown IDs: no transitions allowed.
            _ => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: i16, to: i16) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a state transition, returning `InvalidTransition` for
    /// illegal ones.
    pub fn validate_transition(from: i16, to: i16) -> Result<(), CoreError> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: status_name(from),
                to: status_name(to),
            })
        }
    }

    /// Whether applying `from -> to` removes the request from the pending
    /// set and therefore requires renumbering the positions behind it.
    pub fn vacates_pending(from: i16, to: i16) -> bool {
        from == STATUS_PENDING && to != STATUS_PENDING
    }
}

// ---------------------------------------------------------------------------
// Admission rules
// ---------------------------------------------------------------------------

/// The two per-venue admission caps, read from the venue record.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionLimits {
    /// Maximum simultaneous pending requests per patron.
    pub max_requests_per_patron: i16,
    /// Maximum pending requests in the whole venue queue.
    pub queue_limit: i32,
}

/// A consistent snapshot of the venue's queue state, taken under the
/// per-venue lock by the caller.
#[derive(Debug, Clone, Copy)]
pub struct QueueSnapshot {
    /// The submitting patron's current pending count in this venue.
    pub patron_pending: i64,
    /// The venue's total pending count.
    pub venue_pending: i64,
    /// Whether this patron already holds a pending or playing request for
    /// the submitted track.
    pub outstanding_for_track: bool,
}

/// Apply the admission rules in order, short-circuiting on the first
/// failure. The caller is responsible for having taken the snapshot under
/// the venue lock; these checks are pure.
///
/// Venue/track existence and activity are checked by the caller before the
/// snapshot is taken (they surface as `NotFound`).
pub fn check_admission(
    limits: AdmissionLimits,
    snapshot: QueueSnapshot,
    track_id: DbId,
) -> Result<(), CoreError> {
    if snapshot.patron_pending >= i64::from(limits.max_requests_per_patron) {
        return Err(CoreError::LimitExceeded {
            scope: LimitScope::Patron,
        });
    }
    if snapshot.venue_pending >= i64::from(limits.queue_limit) {
        return Err(CoreError::LimitExceeded {
            scope: LimitScope::Queue,
        });
    }
    if snapshot.outstanding_for_track {
        return Err(CoreError::Duplicate { track_id });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wait estimate
// ---------------------------------------------------------------------------

/// Fallback average track length when the venue has no playback history.
pub const DEFAULT_TRACK_SECS: f64 = 240.0;

/// Display-only wait estimate for a request at `position` (1-based).
///
/// `(position - 1) * avg_track_secs`: the head of the queue plays next, so
/// it waits zero. Monotonic in position; not a correctness property.
pub fn estimated_wait_secs(position: i32, avg_track_secs: Option<f64>) -> i64 {
    let avg = avg_track_secs.unwrap_or(DEFAULT_TRACK_SECS);
    let ahead = i64::from(position.saturating_sub(1)).max(0);
    (ahead as f64 * avg).round() as i64
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;
    use super::*;
    use assert_matches::assert_matches;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_playing() {
        assert!(can_transition(STATUS_PENDING, STATUS_PLAYING));
    }

    #[test]
    fn pending_to_cancelled() {
        assert!(can_transition(STATUS_PENDING, STATUS_CANCELLED));
    }

    #[test]
    fn playing_to_completed() {
        assert!(can_transition(STATUS_PLAYING, STATUS_COMPLETED));
    }

    #[test]
    fn playing_to_cancelled() {
        assert!(can_transition(STATUS_PLAYING, STATUS_CANCELLED));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_cannot_skip_to_completed() {
        assert!(!can_transition(STATUS_PENDING, STATUS_COMPLETED));
    }

    #[test]
    fn playing_cannot_return_to_pending() {
        assert!(!can_transition(STATUS_PLAYING, STATUS_PENDING));
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for terminal in [STATUS_COMPLETED, STATUS_CANCELLED] {
            assert!(valid_transitions(terminal).is_empty());
            for to in [STATUS_PENDING, STATUS_PLAYING, STATUS_COMPLETED, STATUS_CANCELLED] {
                assert!(!can_transition(terminal, to));
            }
        }
    }

    #[test]
    fn unknown_status_allows_nothing() {
        assert!(valid_transitions(0).is_empty());
        assert!(valid_transitions(99).is_empty());
    }

    #[test]
    fn no_self_transitions() {
        for s in [STATUS_PENDING, STATUS_PLAYING, STATUS_COMPLETED, STATUS_CANCELLED] {
            assert!(!can_transition(s, s));
        }
    }

    #[test]
    fn validate_transition_names_both_states() {
        let err = validate_transition(STATUS_COMPLETED, STATUS_PLAYING).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition {
                from: "completed",
                to: "playing"
            }
        );
    }

    // -----------------------------------------------------------------------
    // Pending-set membership
    // -----------------------------------------------------------------------

    #[test]
    fn leaving_pending_vacates_a_position() {
        assert!(vacates_pending(STATUS_PENDING, STATUS_PLAYING));
        assert!(vacates_pending(STATUS_PENDING, STATUS_CANCELLED));
    }

    #[test]
    fn leaving_playing_does_not_vacate() {
        assert!(!vacates_pending(STATUS_PLAYING, STATUS_COMPLETED));
        assert!(!vacates_pending(STATUS_PLAYING, STATUS_CANCELLED));
    }

    // -----------------------------------------------------------------------
    // Admission rules
    // -----------------------------------------------------------------------

    fn limits() -> AdmissionLimits {
        AdmissionLimits {
            max_requests_per_patron: 2,
            queue_limit: 50,
        }
    }

    fn clear_snapshot() -> QueueSnapshot {
        QueueSnapshot {
            patron_pending: 0,
            venue_pending: 0,
            outstanding_for_track: false,
        }
    }

    #[test]
    fn admission_passes_under_all_limits() {
        assert!(check_admission(limits(), clear_snapshot(), 7).is_ok());
    }

    #[test]
    fn admission_passes_one_below_each_cap() {
        let snapshot = QueueSnapshot {
            patron_pending: 1,
            venue_pending: 49,
            ..clear_snapshot()
        };
        assert!(check_admission(limits(), snapshot, 7).is_ok());
    }

    #[test]
    fn patron_cap_rejects() {
        let snapshot = QueueSnapshot {
            patron_pending: 2,
            ..clear_snapshot()
        };
        assert_matches!(
            check_admission(limits(), snapshot, 7),
            Err(CoreError::LimitExceeded {
                scope: LimitScope::Patron
            })
        );
    }

    #[test]
    fn queue_cap_rejects() {
        let snapshot = QueueSnapshot {
            venue_pending: 50,
            ..clear_snapshot()
        };
        assert_matches!(
            check_admission(limits(), snapshot, 7),
            Err(CoreError::LimitExceeded {
                scope: LimitScope::Queue
            })
        );
    }

    #[test]
    fn duplicate_rejects() {
        let snapshot = QueueSnapshot {
            outstanding_for_track: true,
            ..clear_snapshot()
        };
        assert_matches!(
            check_admission(limits(), snapshot, 7),
            Err(CoreError::Duplicate { track_id: 7 })
        );
    }

    #[test]
    fn patron_cap_checked_before_queue_cap() {
        // Both caps violated: the patron cap short-circuits first.
        let snapshot = QueueSnapshot {
            patron_pending: 2,
            venue_pending: 50,
            outstanding_for_track: true,
        };
        assert_matches!(
            check_admission(limits(), snapshot, 7),
            Err(CoreError::LimitExceeded {
                scope: LimitScope::Patron
            })
        );
    }

    #[test]
    fn queue_cap_checked_before_duplicate() {
        let snapshot = QueueSnapshot {
            patron_pending: 0,
            venue_pending: 50,
            outstanding_for_track: true,
        };
        assert_matches!(
            check_admission(limits(), snapshot, 7),
            Err(CoreError::LimitExceeded {
                scope: LimitScope::Queue
            })
        );
    }

    // -----------------------------------------------------------------------
    // Wait estimate
    // -----------------------------------------------------------------------

    #[test]
    fn head_of_queue_waits_zero() {
        assert_eq!(estimated_wait_secs(1, Some(180.0)), 0);
    }

    #[test]
    fn wait_scales_with_position() {
        assert_eq!(estimated_wait_secs(3, Some(180.0)), 360);
    }

    #[test]
    fn wait_uses_default_without_history() {
        assert_eq!(estimated_wait_secs(2, None), DEFAULT_TRACK_SECS as i64);
    }

    #[test]
    fn wait_is_monotonic_in_position() {
        let mut last = -1;
        for position in 1..=20 {
            let wait = estimated_wait_secs(position, Some(201.5));
            assert!(wait >= last);
            last = wait;
        }
    }
}
