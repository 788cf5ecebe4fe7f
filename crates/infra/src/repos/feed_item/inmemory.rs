use super::IFeedItemRepo;
use crate::repos::shared::inmemory_repo::*;
use feed_digest_domain::{FeedItem, ID};

pub struct InMemoryFeedItemRepo {
    items: std::sync::Mutex<Vec<FeedItem>>,
}

impl InMemoryFeedItemRepo {
    pub fn new() -> Self {
        Self {
            items: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryFeedItemRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IFeedItemRepo for InMemoryFeedItemRepo {
    async fn bulk_insert(&self, items: &[FeedItem]) -> anyhow::Result<()> {
        let mut collection = self.items.lock().unwrap();
        for item in items {
            collection.push(item.clone());
        }
        Ok(())
    }

    async fn find_by_feed(&self, feed_id: &ID) -> Vec<FeedItem> {
        find_by(&self.items, |i: &FeedItem| i.feed_id == *feed_id)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<FeedItem> {
        find_by(&self.items, |i: &FeedItem| i.user_id == *user_id)
    }

    async fn delete_many(&self, item_ids: &[ID]) -> Vec<FeedItem> {
        find_and_delete_by(&self.items, |i: &FeedItem| item_ids.contains(&i.id))
    }

    async fn delete_by_feed(&self, feed_id: &ID) -> Vec<FeedItem> {
        find_and_delete_by(&self.items, |i: &FeedItem| i.feed_id == *feed_id)
    }
}
