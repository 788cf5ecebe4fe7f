use super::IIntervalGroupRepo;
use crate::repos::shared::inmemory_repo::*;
use feed_digest_domain::{IntervalGroup, DEFAULT_GROUP_TITLE, ID};

pub struct InMemoryIntervalGroupRepo {
    groups: std::sync::Mutex<Vec<IntervalGroup>>,
}

impl InMemoryIntervalGroupRepo {
    pub fn new() -> Self {
        Self {
            groups: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryIntervalGroupRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IIntervalGroupRepo for InMemoryIntervalGroupRepo {
    async fn insert(&self, group: &IntervalGroup) -> anyhow::Result<()> {
        insert(group, &self.groups);
        Ok(())
    }

    async fn save(&self, group: &IntervalGroup) -> anyhow::Result<()> {
        save(group, &self.groups);
        Ok(())
    }

    async fn find(&self, group_id: &ID) -> Option<IntervalGroup> {
        find(group_id, &self.groups)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<IntervalGroup> {
        find_by(&self.groups, |g: &IntervalGroup| g.user_id == *user_id)
    }

    async fn find_or_create_default(&self, user_id: &ID) -> anyhow::Result<IntervalGroup> {
        let mut groups = self.groups.lock().unwrap();
        if let Some(existing) = groups.iter().find(|g| g.user_id == *user_id) {
            return Ok(existing.clone());
        }
        let group = IntervalGroup::new(user_id, DEFAULT_GROUP_TITLE);
        groups.push(group.clone());
        Ok(group)
    }

    async fn delete(&self, group_id: &ID) -> Option<IntervalGroup> {
        delete(group_id, &self.groups)
    }
}
