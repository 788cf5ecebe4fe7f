mod feed;
mod feed_item;
mod interval_group;
mod shared;
mod user;

pub use feed::{IFeedRepo, InMemoryFeedRepo};
pub use feed_item::{IFeedItemRepo, InMemoryFeedItemRepo};
pub use interval_group::{IIntervalGroupRepo, InMemoryIntervalGroupRepo};
use std::sync::Arc;
pub use user::{IUserRepo, InMemoryUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub feeds: Arc<dyn IFeedRepo>,
    pub interval_groups: Arc<dyn IIntervalGroupRepo>,
    pub feed_items: Arc<dyn IFeedItemRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            feeds: Arc::new(InMemoryFeedRepo::new()),
            interval_groups: Arc::new(InMemoryIntervalGroupRepo::new()),
            feed_items: Arc::new(InMemoryFeedItemRepo::new()),
        }
    }
}
