mod crawl_feed;
mod dispatch_digests;
mod schedule;
mod shared;

pub use crawl_feed::{CrawlFeedError, CrawlFeedUseCase, CrawlReport};
pub use dispatch_digests::{DispatchDigestsError, DispatchDigestsUseCase, DispatchReport};
pub use schedule::set_feed_group::{SetFeedGroupError, SetFeedGroupUseCase};
pub use schedule::set_feed_schedule::{ScheduleChange, SetFeedScheduleError, SetFeedScheduleUseCase};
pub use schedule::update_group::{UpdateIntervalGroupError, UpdateIntervalGroupUseCase};
pub use shared::usecase::{execute, UseCase};
