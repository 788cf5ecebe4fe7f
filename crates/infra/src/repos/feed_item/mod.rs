mod inmemory;

use feed_digest_domain::{FeedItem, ID};
pub use inmemory::InMemoryFeedItemRepo;

#[async_trait::async_trait]
pub trait IFeedItemRepo: Send + Sync {
    async fn bulk_insert(&self, items: &[FeedItem]) -> anyhow::Result<()>;
    async fn find_by_feed(&self, feed_id: &ID) -> Vec<FeedItem>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<FeedItem>;
    /// The clear-on-dispatch step. Removes and returns exactly the
    /// items with the given ids, in one operation per collection lock.
    /// Items queued for the same feed after the caller took its
    /// snapshot are left pending.
    async fn delete_many(&self, item_ids: &[ID]) -> Vec<FeedItem>;
    /// Removes and returns every pending item of one feed, the cleanup
    /// step when a feed itself is removed.
    async fn delete_by_feed(&self, feed_id: &ID) -> Vec<FeedItem>;
}
