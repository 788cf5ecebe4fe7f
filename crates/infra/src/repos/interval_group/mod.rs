mod inmemory;

use feed_digest_domain::{IntervalGroup, ID};
pub use inmemory::InMemoryIntervalGroupRepo;

#[async_trait::async_trait]
pub trait IIntervalGroupRepo: Send + Sync {
    async fn insert(&self, group: &IntervalGroup) -> anyhow::Result<()>;
    async fn save(&self, group: &IntervalGroup) -> anyhow::Result<()>;
    async fn find(&self, group_id: &ID) -> Option<IntervalGroup>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<IntervalGroup>;
    /// Get or create: returns the user's default "Standard" group,
    /// inserting it when the user has no groups yet. Explicit
    /// create-on-miss, not a side effect of a read.
    async fn find_or_create_default(&self, user_id: &ID) -> anyhow::Result<IntervalGroup>;
    async fn delete(&self, group_id: &ID) -> Option<IntervalGroup>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use chrono::Utc;
    use feed_digest_domain::{IntervalGroup, User, DEFAULT_GROUP_TITLE};

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = setup_context();
        let user = User::new("reader@example.com", Utc::now());
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let group = IntervalGroup::new(&user.id, "Weekly");
        assert!(ctx.repos.interval_groups.insert(&group).await.is_ok());
        assert!(ctx.repos.interval_groups.find(&group.id).await.is_some());

        assert!(ctx.repos.interval_groups.delete(&group.id).await.is_some());
        assert!(ctx.repos.interval_groups.find(&group.id).await.is_none());
    }

    #[tokio::test]
    async fn default_group_is_created_on_miss_and_reused() {
        let ctx = setup_context();
        let user = User::new("reader@example.com", Utc::now());
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let first = ctx
            .repos
            .interval_groups
            .find_or_create_default(&user.id)
            .await
            .unwrap();
        assert_eq!(first.title, DEFAULT_GROUP_TITLE);

        let second = ctx
            .repos
            .interval_groups
            .find_or_create_default(&user.id)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(ctx.repos.interval_groups.find_by_user(&user.id).await.len(), 1);
    }
}
