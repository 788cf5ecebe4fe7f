//! Feed digest scheduling core.
//!
//! Aggregates items from RSS-style feeds and delivers them to users by
//! email, instantly or batched into weekday digests. The embedding
//! process (cron front end, durable storage, real fetcher and mail
//! transport) drives it through exactly two entry points:
//! [`CrawlFeedUseCase`] per feed and [`DispatchDigestsUseCase`] per
//! user, both run with [`execute`] against a [`DigestContext`].

mod telemetry;

pub use feed_digest_core::{
    execute, CrawlFeedError, CrawlFeedUseCase, CrawlReport, DispatchDigestsError,
    DispatchDigestsUseCase, DispatchReport, ScheduleChange, SetFeedGroupError,
    SetFeedGroupUseCase, SetFeedScheduleError, SetFeedScheduleUseCase, UpdateIntervalGroupError,
    UpdateIntervalGroupUseCase, UseCase,
};
pub use feed_digest_domain as domain;
pub use feed_digest_infra::{
    setup_context, Config, CrawlError, DeliveryError, DigestContext, FetchedItem, IFeedFetcher,
    IFeedItemRepo, IFeedRepo, IIntervalGroupRepo, IMailTransport, ISys, IUserRepo,
    InMemoryFeedFetcher, InMemoryMailTransport, Repos,
};
pub use telemetry::{get_subscriber, init_subscriber};
