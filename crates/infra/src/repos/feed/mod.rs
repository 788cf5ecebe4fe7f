mod inmemory;

use chrono::{DateTime, Utc};
use feed_digest_domain::{Feed, ID};
pub use inmemory::InMemoryFeedRepo;

#[async_trait::async_trait]
pub trait IFeedRepo: Send + Sync {
    async fn insert(&self, feed: &Feed) -> anyhow::Result<()>;
    async fn save(&self, feed: &Feed) -> anyhow::Result<()>;
    async fn find(&self, feed_id: &ID) -> Option<Feed>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Feed>;
    async fn find_by_group(&self, group_id: &ID) -> Vec<Feed>;
    /// All feeds whose `digest_next` is at or before `before`. Instant
    /// feeds (`digest_next == None`) are not part of this query; they
    /// are picked up through their pending items at dispatch time.
    async fn find_due(&self, before: DateTime<Utc>) -> Vec<Feed>;
    async fn delete(&self, feed_id: &ID) -> Option<Feed>;
}
