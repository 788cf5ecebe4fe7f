use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use feed_digest_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = find_by(&self.users, |u: &User| u.email == email);
        users.into_iter().next()
    }

    async fn find_or_create(&self, email: &str, now: DateTime<Utc>) -> anyhow::Result<User> {
        // One lock for the lookup and the insert, so two concurrent
        // calls cannot both create a record for the same email.
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| u.email == email) {
            return Ok(existing.clone());
        }
        let user = User::new(email, now);
        users.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        delete(user_id, &self.users)
    }
}
