pub mod set_feed_group;
pub mod set_feed_schedule;
pub mod update_group;

use chrono::{DateTime, Utc};
use feed_digest_domain::{
    effective_schedule, next_fire_time, DayMask, Feed, NextDigest, TimeOfDay, ID,
};
use feed_digest_infra::DigestContext;
use tracing::warn;

/// Resolves a feed's effective schedule, handling the dangling-group
/// case: a reference to a deleted group is detached on the spot and the
/// feed falls back to its preserved custom fields. A recoverable
/// anomaly, never an abort.
pub(crate) async fn resolve_schedule(
    feed: &mut Feed,
    ctx: &DigestContext,
) -> anyhow::Result<(DayMask, TimeOfDay)> {
    let group = match &feed.digest_group {
        Some(group_id) => ctx.repos.interval_groups.find(group_id).await,
        None => None,
    };

    match effective_schedule(feed, group.as_ref()) {
        Ok(schedule) => Ok(schedule),
        Err(err) => {
            warn!("{}; detaching and falling back to the custom schedule", err);
            feed.digest_group = None;
            ctx.repos.feeds.save(feed).await?;
            Ok((feed.digest_days, feed.digest_time))
        }
    }
}

/// The persisted form of the clock's answer: `None` for instant
/// schedules, which are picked up through their pending items rather
/// than a timestamp. An invalid schedule is logged and leaves the feed
/// not-due until corrected.
pub(crate) fn compute_digest_next(
    days: DayMask,
    time: TimeOfDay,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match next_fire_time(days, time, now) {
        Ok(NextDigest::At(ts)) => Some(ts),
        Ok(NextDigest::Instant) => None,
        Err(err) => {
            warn!("invalid digest schedule, treating the feed as not due: {}", err);
            None
        }
    }
}

/// Re-derives the user-level `digest_next` hint as the minimum of the
/// user's feed-level fire times.
pub(crate) async fn refresh_user_schedule_hint(
    user_id: &ID,
    ctx: &DigestContext,
) -> anyhow::Result<()> {
    let mut user = match ctx.repos.users.find(user_id).await {
        Some(user) => user,
        None => return Ok(()),
    };
    let feeds = ctx.repos.feeds.find_by_user(user_id).await;
    user.digest_next = feeds.iter().filter_map(|f| f.digest_next).min();
    ctx.repos.users.save(&user).await
}
