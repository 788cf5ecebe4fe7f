use crate::feed_item::FeedItem;
use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

/// One feed's slice of an outgoing digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestSection {
    pub feed_id: ID,
    pub feed_title: String,
    pub feed_link: String,
    pub items: Vec<FeedItem>,
}

/// What gets handed to the mail transport: either all of a user's due
/// feeds merged into one payload (combined digest) or a payload per
/// feed. Rendering into an actual email body happens outside this
/// core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestPayload {
    pub user_id: ID,
    pub sections: Vec<DigestSection>,
}

impl DigestPayload {
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}
