use crate::day_mask::DayMask;
use crate::shared::entity::{Entity, ID};
use crate::time_of_day::TimeOfDay;
use serde::{Deserialize, Serialize};

/// Title of the interval group created on first access for a user.
pub const DEFAULT_GROUP_TITLE: &str = "Standard";

/// A named digest schedule shared between feeds. One user can have
/// multiple interval groups; multiple feeds may reference the same
/// group, and updating the group changes the effective schedule of all
/// referencing feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalGroup {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub digest_days: DayMask,
    pub digest_time: TimeOfDay,
}

impl IntervalGroup {
    pub fn new(user_id: &ID, title: &str) -> Self {
        Self {
            id: Default::default(),
            user_id: user_id.clone(),
            title: title.to_string(),
            digest_days: DayMask::INSTANT,
            digest_time: TimeOfDay::NOON,
        }
    }
}

impl Entity for IntervalGroup {
    fn id(&self) -> &ID {
        &self.id
    }
}
