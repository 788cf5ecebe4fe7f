use crate::schedule::{compute_digest_next, refresh_user_schedule_hint};
use crate::shared::usecase::UseCase;
use feed_digest_domain::{DayMask, TimeOfDay, ID};
use feed_digest_infra::DigestContext;
use thiserror::Error;

#[derive(Debug)]
pub enum ScheduleChange {
    /// Batch on the given weekdays at the given time. A mask of 0 is
    /// the instant toggle and snapshots the previous custom mask.
    Custom { days: DayMask, time: TimeOfDay },
    /// Switch to instant delivery, preserving the custom mask.
    Instant,
    /// Undo an instant toggle: restore the snapshotted custom mask.
    RestoreCustom,
}

/// Changes a feed's own schedule fields. Picking a custom schedule
/// detaches the feed from its interval group, and any change recomputes
/// the feed's fire time immediately.
#[derive(Debug)]
pub struct SetFeedScheduleUseCase {
    pub feed_id: ID,
    pub change: ScheduleChange,
}

#[derive(Debug, Error)]
pub enum SetFeedScheduleError {
    #[error("feed {0} was not found")]
    FeedNotFound(ID),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetFeedScheduleUseCase {
    type Response = ();

    type Errors = SetFeedScheduleError;

    async fn execute(&mut self, ctx: &DigestContext) -> Result<Self::Response, Self::Errors> {
        let mut feed = ctx
            .repos
            .feeds
            .find(&self.feed_id)
            .await
            .ok_or_else(|| SetFeedScheduleError::FeedNotFound(self.feed_id.clone()))?;

        feed.digest_group = None;
        match &self.change {
            ScheduleChange::Custom { days, time } => {
                feed.set_digest_days(*days);
                feed.digest_time = *time;
            }
            ScheduleChange::Instant => {
                feed.set_digest_days(DayMask::INSTANT);
            }
            ScheduleChange::RestoreCustom => {
                feed.restore_custom_days();
            }
        }
        feed.digest_next = compute_digest_next(feed.digest_days, feed.digest_time, ctx.sys.now());
        ctx.repos.feeds.save(&feed).await?;
        refresh_user_schedule_hint(&feed.user_id, ctx).await?;

        Ok(())
    }
}
