//! Mutation timestamp rule shared by the storage adapters.

use chrono::{DateTime, TimeDelta, Utc};

/// Returns the `updated_at` value stored for a mutation at `now`.
///
/// The result is never earlier than one microsecond after `previous`, so
/// `updated_at` strictly increases even when the clock stalls or steps back.
#[must_use]
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + TimeDelta::microseconds(1))
}
