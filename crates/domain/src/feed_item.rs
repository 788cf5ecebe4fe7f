use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crawled item waiting to be sent to the user on the next delivery
/// interval. Deleted once it has been included in a dispatched digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: ID,
    pub feed_id: ID,
    /// Denormalized owner, so "all pending items for this user" is a
    /// single equality query.
    pub user_id: ID,
    pub title: String,
    pub link: String,
    pub added: DateTime<Utc>,
}

impl FeedItem {
    pub fn new(feed_id: &ID, user_id: &ID, title: &str, link: &str, added: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            feed_id: feed_id.clone(),
            user_id: user_id.clone(),
            title: title.to_string(),
            link: link.to_string(),
            added,
        }
    }
}

impl Entity for FeedItem {
    fn id(&self) -> &ID {
        &self.id
    }
}
