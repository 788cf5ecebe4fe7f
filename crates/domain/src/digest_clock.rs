use crate::{day_mask::DayMask, time_of_day::TimeOfDay};
use chrono::{prelude::*, Duration};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no weekday is enabled in the digest day mask")]
pub struct InvalidScheduleError;

/// Outcome of asking the clock when a schedule fires next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextDigest {
    /// The schedule has no enabled weekdays: deliver as soon as a new
    /// item arrives instead of waiting for a batch window.
    Instant,
    At(DateTime<Utc>),
}

/// Computes the earliest timestamp at or after `now` whose weekday bit
/// is set in `days` and whose wall-clock time equals `time`.
///
/// This is the single source of truth for digest timing. It is pure:
/// the only clock it sees is the `now` parameter. The weekday/bit
/// contract (bit 0 = Monday) is documented on [`DayMask`].
///
/// If today's bit is set and `time` has not yet passed today (an exact
/// match with `now` counts), the result is today at `time`. Otherwise
/// the scan wraps forward through the week, at most 7 days, so a
/// schedule enabled only for today fires today next week once today's
/// time has passed.
pub fn next_fire_time(
    days: DayMask,
    time: TimeOfDay,
    now: DateTime<Utc>,
) -> Result<NextDigest, InvalidScheduleError> {
    if days.is_instant() {
        return Ok(NextDigest::Instant);
    }

    let today_at = now.date().and_hms(time.hours(), time.minutes(), 0);
    if days.contains(now.weekday()) && today_at >= now {
        return Ok(NextDigest::At(today_at));
    }

    for offset in 1..=7 {
        let candidate = today_at + Duration::days(offset);
        if days.contains(candidate.weekday()) {
            return Ok(NextDigest::At(candidate));
        }
    }

    // Unreachable for a non-empty mask, kept as a hard failure so a
    // malformed schedule can never produce a silently wrong fire time.
    Err(InvalidScheduleError)
}
