use crate::day_mask::DayMask;
use crate::feed::Feed;
use crate::interval_group::IntervalGroup;
use crate::time_of_day::TimeOfDay;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("interval group {group_id} referenced by feed {feed_id} does not exist")]
pub struct GroupNotFoundError {
    pub feed_id: String,
    pub group_id: String,
}

/// Resolves the one effective schedule of a feed: the referenced
/// interval group's fields when the reference is set, the feed's own
/// custom fields otherwise.
///
/// `group` is whatever the caller's lookup produced for
/// `feed.digest_group`. A set reference with a missing group is a
/// dangling reference (the group was deleted while still referenced)
/// and surfaces as [`GroupNotFoundError`]; callers are expected to
/// detach the reference and fall back to the custom fields, never to
/// abort.
pub fn effective_schedule(
    feed: &Feed,
    group: Option<&IntervalGroup>,
) -> Result<(DayMask, TimeOfDay), GroupNotFoundError> {
    match &feed.digest_group {
        None => Ok((feed.digest_days, feed.digest_time)),
        Some(group_id) => match group {
            Some(group) => Ok((group.digest_days, group.digest_time)),
            None => Err(GroupNotFoundError {
                feed_id: feed.id.as_string(),
                group_id: group_id.as_string(),
            }),
        },
    }
}
