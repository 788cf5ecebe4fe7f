mod day_mask;
mod digest;
mod digest_clock;
mod feed;
mod feed_item;
mod interval_group;
mod recent_items;
mod resolver;
mod shared;
mod time_of_day;
mod user;

pub use day_mask::DayMask;
pub use digest::{DigestPayload, DigestSection};
pub use digest_clock::{next_fire_time, InvalidScheduleError, NextDigest};
pub use feed::{DeliveryState, Feed};
pub use feed_item::FeedItem;
pub use interval_group::{IntervalGroup, DEFAULT_GROUP_TITLE};
pub use recent_items::{RecentItemWindow, RECENT_ITEMS_CAPACITY};
pub use resolver::{effective_schedule, GroupNotFoundError};
pub use shared::entity::{Entity, ID};
pub use time_of_day::TimeOfDay;
pub use user::User;
