mod feed_fetcher;
mod mail_transport;

pub use feed_fetcher::{CrawlError, FetchedItem, IFeedFetcher, InMemoryFeedFetcher};
pub use mail_transport::{DeliveryError, IMailTransport, InMemoryMailTransport};
