use crate::schedule::{compute_digest_next, refresh_user_schedule_hint, resolve_schedule};
use crate::shared::usecase::UseCase;
use feed_digest_domain::{FeedItem, ID};
use feed_digest_infra::{CrawlError, DigestContext};
use thiserror::Error;

/// The per-feed crawl cycle: fetch the feed document, classify items
/// against the feed's recent-item window, queue the genuinely new ones
/// as pending and advance the window. Triggered per feed by the
/// external scheduler.
#[derive(Debug)]
pub struct CrawlFeedUseCase {
    pub feed_id: ID,
}

#[derive(Debug)]
pub struct CrawlReport {
    pub new_items: usize,
}

#[derive(Debug, Error)]
pub enum CrawlFeedError {
    #[error("feed {0} was not found")]
    FeedNotFound(ID),
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait(?Send)]
impl UseCase for CrawlFeedUseCase {
    type Response = CrawlReport;

    type Errors = CrawlFeedError;

    async fn execute(&mut self, ctx: &DigestContext) -> Result<Self::Response, Self::Errors> {
        let mut feed = ctx
            .repos
            .feeds
            .find(&self.feed_id)
            .await
            .ok_or_else(|| CrawlFeedError::FeedNotFound(self.feed_id.clone()))?;

        // A fetch failure aborts the unit before anything is mutated,
        // so a retried crawl sees the pre-crawl window.
        let fetched = match tokio::time::timeout(
            ctx.config.fetch_timeout,
            ctx.feed_fetcher.fetch(&feed.link_rss),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(CrawlError::Timeout {
                    url: feed.link_rss.clone(),
                }
                .into())
            }
        };

        let now = ctx.sys.now();
        let mut new_items = Vec::new();
        // The fetch is newest-first; walk it oldest-first so the newest
        // fingerprint ends up at the front of the window.
        for item in fetched.iter().rev() {
            if feed.recent_items.is_new(&item.fingerprint) {
                new_items.push(FeedItem::new(
                    &feed.id,
                    &feed.user_id,
                    &item.title,
                    &item.link,
                    now,
                ));
                feed.recent_items.record(&item.fingerprint);
            }
        }

        feed.last_crawled = Some(now);
        if !new_items.is_empty() {
            feed.state = feed.state.on_items_queued();
            let (days, time) = resolve_schedule(&mut feed, ctx).await?;
            if days.is_instant() {
                feed.digest_next = None;
            } else if feed.digest_next.is_none() {
                feed.digest_next = compute_digest_next(days, time, now);
            }
            ctx.repos.feed_items.bulk_insert(&new_items).await?;
        }
        // One save carries the advanced window, the crawl timestamp and
        // the state transition together. If it fails the just-inserted
        // items are taken back out: the window was not advanced, so a
        // retried crawl must re-discover them exactly once instead of
        // queueing a second copy next to a durable first one.
        if let Err(err) = ctx.repos.feeds.save(&feed).await {
            if !new_items.is_empty() {
                let item_ids: Vec<ID> = new_items.iter().map(|i| i.id.clone()).collect();
                ctx.repos.feed_items.delete_many(&item_ids).await;
            }
            return Err(err.into());
        }

        if !new_items.is_empty() {
            if let Some(mut user) = ctx.repos.users.find(&feed.user_id).await {
                if !user.items_ready {
                    user.items_ready = true;
                    ctx.repos.users.save(&user).await?;
                }
            }
            refresh_user_schedule_hint(&feed.user_id, ctx).await?;
        }

        Ok(CrawlReport {
            new_items: new_items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::{DateTime, TimeZone, Utc};
    use feed_digest_domain::{DayMask, DeliveryState, Feed, TimeOfDay, User};
    use feed_digest_infra::{
        FetchedItem, IFeedRepo, ISys, InMemoryFeedFetcher, InMemoryFeedRepo,
        InMemoryMailTransport, Repos,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
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

    fn setup() -> (DigestContext, Arc<InMemoryFeedFetcher>) {
        let fetcher = Arc::new(InMemoryFeedFetcher::new());
        let transport = Arc::new(InMemoryMailTransport::new());
        let mut ctx = DigestContext::create(Repos::create_inmemory(), fetcher.clone(), transport);
        ctx.sys = Arc::new(StaticSys(monday_ten()));
        (ctx, fetcher)
    }

    async fn insert_user_and_feed(ctx: &DigestContext) -> (User, Feed) {
        let user = User::new("reader@example.com", ctx.sys.now());
        ctx.repos.users.insert(&user).await.unwrap();
        let feed = Feed::new(
            &user.id,
            "Example",
            "https://example.com",
            "https://example.com/feed.xml",
            ctx.sys.now(),
        );
        ctx.repos.feeds.insert(&feed).await.unwrap();
        (user, feed)
    }

    fn two_fetched_items() -> Vec<FetchedItem> {
        vec![
            FetchedItem::from_link("Newest", "https://example.com/2"),
            FetchedItem::from_link("Older", "https://example.com/1"),
        ]
    }

    #[tokio::test]
    async fn crawl_queues_new_items_and_marks_user_ready() {
        let (ctx, fetcher) = setup();
        let (user, feed) = insert_user_and_feed(&ctx).await;
        fetcher.stub(&feed.link_rss, Ok(two_fetched_items()));

        let report = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.new_items, 2);

        let pending = ctx.repos.feed_items.find_by_feed(&feed.id).await;
        assert_eq!(pending.len(), 2);

        let feed = ctx.repos.feeds.find(&feed.id).await.unwrap();
        assert_eq!(feed.last_crawled, Some(monday_ten()));
        assert_eq!(feed.state, DeliveryState::Pending);
        // Newest fingerprint at the front of the window.
        assert_eq!(feed.recent_items.fingerprints()[0], "https://example.com/2");

        let user = ctx.repos.users.find(&user.id).await.unwrap();
        assert!(user.items_ready);
    }

    #[tokio::test]
    async fn recrawling_the_same_document_queues_nothing() {
        let (ctx, fetcher) = setup();
        let (_, feed) = insert_user_and_feed(&ctx).await;
        fetcher.stub(&feed.link_rss, Ok(two_fetched_items()));

        let first = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(first.new_items, 2);

        let second = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(second.new_items, 0);
        assert_eq!(ctx.repos.feed_items.find_by_feed(&feed.id).await.len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_state_untouched() {
        let (ctx, fetcher) = setup();
        let (user, feed) = insert_user_and_feed(&ctx).await;
        fetcher.stub_failure(&feed.link_rss, "connection refused");

        let res = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx).await;
        assert!(matches!(res, Err(CrawlFeedError::Crawl(_))));

        let feed = ctx.repos.feeds.find(&feed.id).await.unwrap();
        assert!(feed.last_crawled.is_none());
        assert!(feed.recent_items.is_empty());
        assert!(ctx.repos.feed_items.find_by_feed(&feed.id).await.is_empty());
        let user = ctx.repos.users.find(&user.id).await.unwrap();
        assert!(!user.items_ready);
    }

    #[tokio::test]
    async fn a_definitive_empty_result_still_updates_last_crawled() {
        let (ctx, fetcher) = setup();
        let (user, feed) = insert_user_and_feed(&ctx).await;
        fetcher.stub(&feed.link_rss, Ok(vec![]));

        let report = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.new_items, 0);

        let feed = ctx.repos.feeds.find(&feed.id).await.unwrap();
        assert_eq!(feed.last_crawled, Some(monday_ten()));
        assert_eq!(feed.state, DeliveryState::Idle);
        let user = ctx.repos.users.find(&user.id).await.unwrap();
        assert!(!user.items_ready);
    }

    #[tokio::test]
    async fn a_batched_feed_gets_its_first_fire_time_on_crawl() {
        let (ctx, fetcher) = setup();
        let (_, mut feed) = insert_user_and_feed(&ctx).await;
        // Tuesdays at 09:00; now is Monday 10:00.
        feed.set_digest_days(DayMask::new(0b0000010));
        feed.digest_time = TimeOfDay::new(9, 0).unwrap();
        ctx.repos.feeds.save(&feed).await.unwrap();
        fetcher.stub(&feed.link_rss, Ok(two_fetched_items()));

        execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();

        let feed = ctx.repos.feeds.find(&feed.id).await.unwrap();
        assert_eq!(
            feed.digest_next,
            Some(Utc.ymd(2021, 2, 23).and_hms(9, 0, 0))
        );
    }

    /// Feed repo whose saves can be switched to fail, standing in for
    /// a storage backend rejecting writes.
    struct FlakySaveFeedRepo {
        inner: InMemoryFeedRepo,
        fail_saves: AtomicBool,
    }

    impl FlakySaveFeedRepo {
        fn new() -> Self {
            Self {
                inner: InMemoryFeedRepo::new(),
                fail_saves: AtomicBool::new(false),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.fail_saves.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl IFeedRepo for FlakySaveFeedRepo {
        async fn insert(&self, feed: &Feed) -> anyhow::Result<()> {
            self.inner.insert(feed).await
        }

        async fn save(&self, feed: &Feed) -> anyhow::Result<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                anyhow::bail!("feed collection rejected the write");
            }
            self.inner.save(feed).await
        }

        async fn find(&self, feed_id: &ID) -> Option<Feed> {
            self.inner.find(feed_id).await
        }

        async fn find_by_user(&self, user_id: &ID) -> Vec<Feed> {
            self.inner.find_by_user(user_id).await
        }

        async fn find_by_group(&self, group_id: &ID) -> Vec<Feed> {
            self.inner.find_by_group(group_id).await
        }

        async fn find_due(&self, before: DateTime<Utc>) -> Vec<Feed> {
            self.inner.find_due(before).await
        }

        async fn delete(&self, feed_id: &ID) -> Option<Feed> {
            self.inner.delete(feed_id).await
        }
    }

    #[tokio::test]
    async fn a_failed_feed_save_takes_the_inserted_items_back_out() {
        let feeds = Arc::new(FlakySaveFeedRepo::new());
        let mut repos = Repos::create_inmemory();
        repos.feeds = feeds.clone();
        let fetcher = Arc::new(InMemoryFeedFetcher::new());
        let mut ctx =
            DigestContext::create(repos, fetcher.clone(), Arc::new(InMemoryMailTransport::new()));
        ctx.sys = Arc::new(StaticSys(monday_ten()));

        let (user, feed) = insert_user_and_feed(&ctx).await;
        fetcher.stub(&feed.link_rss, Ok(two_fetched_items()));

        feeds.set_failing(true);
        let res = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx).await;
        assert!(matches!(res, Err(CrawlFeedError::Storage(_))));

        // Nothing pending, the window untouched.
        assert!(ctx.repos.feed_items.find_by_feed(&feed.id).await.is_empty());
        let reloaded = ctx.repos.feeds.find(&feed.id).await.unwrap();
        assert!(reloaded.recent_items.is_empty());
        assert!(reloaded.last_crawled.is_none());
        let user = ctx.repos.users.find(&user.id).await.unwrap();
        assert!(!user.items_ready);

        // The retry re-discovers the same items exactly once.
        feeds.set_failing(false);
        let report = execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report.new_items, 2);
        assert_eq!(ctx.repos.feed_items.find_by_feed(&feed.id).await.len(), 2);
    }

    #[tokio::test]
    async fn an_instant_feed_is_never_given_a_fire_time() {
        let (ctx, fetcher) = setup();
        let (_, feed) = insert_user_and_feed(&ctx).await;
        fetcher.stub(&feed.link_rss, Ok(two_fetched_items()));

        execute(CrawlFeedUseCase { feed_id: feed.id.clone() }, &ctx)
            .await
            .unwrap();

        let feed = ctx.repos.feeds.find(&feed.id).await.unwrap();
        assert!(feed.digest_next.is_none());
    }
}
