mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    IFeedItemRepo, IFeedRepo, IIntervalGroupRepo, IUserRepo, InMemoryFeedItemRepo,
    InMemoryFeedRepo, InMemoryIntervalGroupRepo, InMemoryUserRepo, Repos,
};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

/// Everything a digest cycle needs from the outside world: the
/// repositories, the collaborator services, the config and the clock.
/// All of it sits behind traits so tests can swap in doubles.
#[derive(Clone)]
pub struct DigestContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub feed_fetcher: Arc<dyn IFeedFetcher>,
    pub mail_transport: Arc<dyn IMailTransport>,
}

impl DigestContext {
    pub fn create(
        repos: Repos,
        feed_fetcher: Arc<dyn IFeedFetcher>,
        mail_transport: Arc<dyn IMailTransport>,
    ) -> Self {
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            feed_fetcher,
            mail_transport,
        }
    }
}

/// Sets up a context backed entirely by in-memory collaborators.
pub fn setup_context() -> DigestContext {
    DigestContext::create(
        Repos::create_inmemory(),
        Arc::new(InMemoryFeedFetcher::new()),
        Arc::new(InMemoryMailTransport::new()),
    )
}
