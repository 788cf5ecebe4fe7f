use crate::day_mask::DayMask;
use crate::recent_items::RecentItemWindow;
use crate::shared::entity::{Entity, ID};
use crate::time_of_day::TimeOfDay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery state of a feed, the scheduling dimension only.
///
/// `Idle` (no pending items) -> `Pending` (has pending items) ->
/// `Dispatching` (due, digest in flight) -> `Idle` on confirmed
/// delivery or back to `Pending` when the transport failed. The only
/// terminal state is feed deletion, which happens outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryState {
    Idle,
    Pending,
    Dispatching,
}

impl DeliveryState {
    pub fn on_items_queued(self) -> Self {
        match self {
            DeliveryState::Idle => DeliveryState::Pending,
            other => other,
        }
    }

    pub fn on_dispatch_start(self) -> Self {
        match self {
            DeliveryState::Pending => DeliveryState::Dispatching,
            other => other,
        }
    }

    pub fn on_dispatch_success(self) -> Self {
        match self {
            DeliveryState::Dispatching => DeliveryState::Idle,
            other => other,
        }
    }

    pub fn on_dispatch_failure(self) -> Self {
        match self {
            DeliveryState::Dispatching => DeliveryState::Pending,
            other => other,
        }
    }
}

impl Default for DeliveryState {
    fn default() -> Self {
        DeliveryState::Idle
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub link_web: String,
    pub link_rss: String,
    pub date_added: DateTime<Utc>,
    pub last_crawled: Option<DateTime<Utc>>,
    pub emails_sent: i64,
    /// Digest timing is either a shared interval group or this feed's
    /// own custom fields. When set, the group overrides the custom
    /// fields for scheduling, but the custom fields are preserved so
    /// the user can detach from the group later.
    pub digest_group: Option<ID>,
    pub digest_days: DayMask,
    pub digest_time: TimeOfDay,
    /// Snapshot of the last non-instant custom mask, restored when the
    /// user toggles instant delivery off again.
    pub last_custom_digest_days: DayMask,
    pub digest_next: Option<DateTime<Utc>>,
    pub recent_items: RecentItemWindow,
    pub state: DeliveryState,
}

impl Feed {
    pub fn new(user_id: &ID, title: &str, link_web: &str, link_rss: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            user_id: user_id.clone(),
            title: title.to_string(),
            link_web: link_web.to_string(),
            link_rss: link_rss.to_string(),
            date_added: now,
            last_crawled: None,
            emails_sent: 0,
            digest_group: None,
            digest_days: DayMask::INSTANT,
            digest_time: TimeOfDay::NOON,
            last_custom_digest_days: DayMask::EVERY_DAY,
            digest_next: None,
            recent_items: RecentItemWindow::new(),
            state: DeliveryState::Idle,
        }
    }

    /// Replaces the custom day mask. Switching to instant first
    /// snapshots the current non-instant mask so it can be restored.
    pub fn set_digest_days(&mut self, days: DayMask) {
        if days.is_instant() && !self.digest_days.is_instant() {
            self.last_custom_digest_days = self.digest_days;
        }
        self.digest_days = days;
    }

    /// Restores the custom mask snapshotted before the last switch to
    /// instant. Toggling instant on and off is a round trip.
    pub fn restore_custom_days(&mut self) {
        self.digest_days = self.last_custom_digest_days;
    }

    pub fn has_pending_items(&self) -> bool {
        self.state != DeliveryState::Idle
    }
}

impl Entity for Feed {
    fn id(&self) -> &ID {
        &self.id
    }
}
