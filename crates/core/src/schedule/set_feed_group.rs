use crate::schedule::{compute_digest_next, refresh_user_schedule_hint, resolve_schedule};
use crate::shared::usecase::UseCase;
use feed_digest_domain::{GroupNotFoundError, ID};
use feed_digest_infra::DigestContext;
use thiserror::Error;

/// Attaches a feed to a shared interval group, or detaches it
/// (`group_id: None`) so the feed's preserved custom fields apply
/// again. Either way the feed's fire time is recomputed from the new
/// effective schedule.
#[derive(Debug)]
pub struct SetFeedGroupUseCase {
    pub feed_id: ID,
    pub group_id: Option<ID>,
}

#[derive(Debug, Error)]
pub enum SetFeedGroupError {
    #[error("feed {0} was not found")]
    FeedNotFound(ID),
    #[error(transparent)]
    GroupNotFound(#[from] GroupNotFoundError),
    #[error("group {group_id} does not belong to the feed's owner")]
    GroupOwnerMismatch { group_id: ID },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetFeedGroupUseCase {
    type Response = ();

    type Errors = SetFeedGroupError;

    async fn execute(&mut self, ctx: &DigestContext) -> Result<Self::Response, Self::Errors> {
        let mut feed = ctx
            .repos
            .feeds
            .find(&self.feed_id)
            .await
            .ok_or_else(|| SetFeedGroupError::FeedNotFound(self.feed_id.clone()))?;

        if let Some(group_id) = &self.group_id {
            let group = ctx.repos.interval_groups.find(group_id).await.ok_or_else(|| {
                GroupNotFoundError {
                    feed_id: feed.id.as_string(),
                    group_id: group_id.as_string(),
                }
            })?;
            if group.user_id != feed.user_id {
                return Err(SetFeedGroupError::GroupOwnerMismatch {
                    group_id: group_id.clone(),
                });
            }
        }

        feed.digest_group = self.group_id.clone();
        let (days, time) = resolve_schedule(&mut feed, ctx).await?;
        feed.digest_next = compute_digest_next(days, time, ctx.sys.now());
        ctx.repos.feeds.save(&feed).await?;
        refresh_user_schedule_hint(&feed.user_id, ctx).await?;

        Ok(())
    }
}
