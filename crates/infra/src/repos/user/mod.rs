mod inmemory;

use chrono::{DateTime, Utc};
use feed_digest_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    /// Get or create: returns the record for `email`, inserting a
    /// fresh default one (joined at `now`) when none exists. Two calls
    /// for the same email yield the same record. This is an explicit
    /// operation, never a side effect of a plain read.
    async fn find_or_create(&self, email: &str, now: DateTime<Utc>) -> anyhow::Result<User>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
}
