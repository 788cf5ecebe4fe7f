use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: ID,
    pub email: String,
    /// If true, all feeds are combined into one digest, otherwise every
    /// feed is delivered in a separate email.
    pub combined_digest: bool,
    /// True iff at least one of this user's feed items is pending.
    pub items_ready: bool,
    /// Next scheduled digest for any of this user's feeds. A hint for
    /// the external scheduler only; due-ness is re-derived from the
    /// feed-level clocks at dispatch time.
    pub digest_next: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
    pub date_last_login: DateTime<Utc>,
    pub emails_received: i64,
    pub emails_last: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            email: email.to_string(),
            combined_digest: true,
            items_ready: false,
            digest_next: None,
            date_joined: now,
            date_last_login: now,
            emails_received: 0,
            emails_last: None,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
