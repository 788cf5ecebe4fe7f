use super::IFeedRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use feed_digest_domain::{Feed, ID};

pub struct InMemoryFeedRepo {
    feeds: std::sync::Mutex<Vec<Feed>>,
}

impl InMemoryFeedRepo {
    pub fn new() -> Self {
        Self {
            feeds: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryFeedRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IFeedRepo for InMemoryFeedRepo {
    async fn insert(&self, feed: &Feed) -> anyhow::Result<()> {
        insert(feed, &self.feeds);
        Ok(())
    }

    async fn save(&self, feed: &Feed) -> anyhow::Result<()> {
        save(feed, &self.feeds);
        Ok(())
    }

    async fn find(&self, feed_id: &ID) -> Option<Feed> {
        find(feed_id, &self.feeds)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Feed> {
        find_by(&self.feeds, |f: &Feed| f.user_id == *user_id)
    }

    async fn find_by_group(&self, group_id: &ID) -> Vec<Feed> {
        find_by(&self.feeds, |f: &Feed| {
            f.digest_group.as_ref() == Some(group_id)
        })
    }

    async fn find_due(&self, before: DateTime<Utc>) -> Vec<Feed> {
        find_by(&self.feeds, |f: &Feed| match f.digest_next {
            Some(next) => next <= before,
            None => false,
        })
    }

    async fn delete(&self, feed_id: &ID) -> Option<Feed> {
        delete(feed_id, &self.feeds)
    }
}
