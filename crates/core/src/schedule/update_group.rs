use crate::schedule::{compute_digest_next, refresh_user_schedule_hint};
use crate::shared::usecase::UseCase;
use feed_digest_domain::{DayMask, TimeOfDay, ID};
use feed_digest_infra::DigestContext;
use thiserror::Error;

/// Edits a shared interval group. Because many feeds may reference the
/// group, every referencing feed's fire time is recomputed right away;
/// a stale `digest_next` computed from the old group schedule never
/// survives the edit.
#[derive(Debug)]
pub struct UpdateIntervalGroupUseCase {
    pub group_id: ID,
    pub title: Option<String>,
    pub digest_days: Option<DayMask>,
    pub digest_time: Option<TimeOfDay>,
}

#[derive(Debug, Error)]
pub enum UpdateIntervalGroupError {
    #[error("interval group {0} was not found")]
    GroupNotFound(ID),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateIntervalGroupUseCase {
    type Response = ();

    type Errors = UpdateIntervalGroupError;

    async fn execute(&mut self, ctx: &DigestContext) -> Result<Self::Response, Self::Errors> {
        let mut group = ctx
            .repos
            .interval_groups
            .find(&self.group_id)
            .await
            .ok_or_else(|| UpdateIntervalGroupError::GroupNotFound(self.group_id.clone()))?;

        if let Some(title) = &self.title {
            group.title = title.clone();
        }
        if let Some(days) = self.digest_days {
            group.digest_days = days;
        }
        if let Some(time) = self.digest_time {
            group.digest_time = time;
        }
        ctx.repos.interval_groups.save(&group).await?;

        let now = ctx.sys.now();
        for mut feed in ctx.repos.feeds.find_by_group(&group.id).await {
            feed.digest_next = compute_digest_next(group.digest_days, group.digest_time, now);
            ctx.repos.feeds.save(&feed).await?;
        }
        refresh_user_schedule_hint(&group.user_id, ctx).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::{DateTime, TimeZone, Utc};
    use feed_digest_domain::{Feed, IntervalGroup, User};
    use feed_digest_infra::{ISys, InMemoryFeedFetcher, InMemoryMailTransport, Repos};
    use std::sync::Arc;

    struct StaticSys(DateTime<Utc>);
    impl ISys for StaticSys {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    // 2021-02-22 10:00 is a Monday
    fn monday_ten() -> DateTime<Utc> {
        Utc.ymd(2021, 2, 22).and_hms(10, 0, 0)
    }

    fn setup() -> DigestContext {
        let mut ctx = DigestContext::create(
            Repos::create_inmemory(),
            Arc::new(InMemoryFeedFetcher::new()),
            Arc::new(InMemoryMailTransport::new()),
        );
        ctx.sys = Arc::new(StaticSys(monday_ten()));
        ctx
    }

    #[tokio::test]
    async fn editing_a_group_reschedules_every_referencing_feed() {
        let ctx = setup();
        let user = User::new("reader@example.com", ctx.sys.now());
        ctx.repos.users.insert(&user).await.unwrap();
        let group = IntervalGroup::new(&user.id, "Weekly");
        ctx.repos.interval_groups.insert(&group).await.unwrap();

        let mut grouped_a = Feed::new(
            &user.id,
            "A",
            "https://a.example.com",
            "https://a.example.com/feed.xml",
            ctx.sys.now(),
        );
        grouped_a.digest_group = Some(group.id.clone());
        let mut grouped_b = grouped_a.clone();
        grouped_b.id = ID::new();
        grouped_b.title = "B".to_string();
        let custom = Feed::new(
            &user.id,
            "C",
            "https://c.example.com",
            "https://c.example.com/feed.xml",
            ctx.sys.now(),
        );
        for feed in [&grouped_a, &grouped_b, &custom].iter() {
            ctx.repos.feeds.insert(feed).await.unwrap();
        }

        execute(
            UpdateIntervalGroupUseCase {
                group_id: group.id.clone(),
                title: None,
                digest_days: Some(DayMask::new(0b0000010)),
                digest_time: Some(TimeOfDay::new(9, 0).unwrap()),
            },
            &ctx,
        )
        .await
        .unwrap();

        let tuesday = Utc.ymd(2021, 2, 23).and_hms(9, 0, 0);
        for feed_id in [&grouped_a.id, &grouped_b.id].iter() {
            let feed = ctx.repos.feeds.find(feed_id).await.unwrap();
            assert_eq!(feed.digest_next, Some(tuesday));
        }
        // The custom feed is untouched.
        let custom = ctx.repos.feeds.find(&custom.id).await.unwrap();
        assert!(custom.digest_next.is_none());
        // And the user hint follows the earliest feed.
        let user = ctx.repos.users.find(&user.id).await.unwrap();
        assert_eq!(user.digest_next, Some(tuesday));
    }

    #[tokio::test]
    async fn editing_a_missing_group_is_rejected() {
        let ctx = setup();
        let res = execute(
            UpdateIntervalGroupUseCase {
                group_id: ID::new(),
                title: Some("Renamed".to_string()),
                digest_days: None,
                digest_time: None,
            },
            &ctx,
        )
        .await;
        assert!(matches!(
            res,
            Err(UpdateIntervalGroupError::GroupNotFound(_))
        ));
    }
}
