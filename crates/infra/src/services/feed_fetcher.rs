use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrawlError {
    #[error("failed to fetch feed `{url}`: {msg}")]
    Fetch { url: String, msg: String },
    #[error("fetching feed `{url}` timed out")]
    Timeout { url: String },
}

/// One entry of a fetched feed document, already reduced to what the
/// scheduler needs. The fingerprint is whatever the fetcher considers
/// stable for an item, typically the link URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedItem {
    pub fingerprint: String,
    pub title: String,
    pub link: String,
}

impl FetchedItem {
    pub fn from_link(title: &str, link: &str) -> Self {
        Self {
            fingerprint: link.to_string(),
            title: title.to_string(),
            link: link.to_string(),
        }
    }
}

/// Fetches and parses a remote feed document. Implemented outside this
/// core; the only guarantee consumed here is that items are
/// newest-first within one call.
#[async_trait::async_trait]
pub trait IFeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<FetchedItem>, CrawlError>;
}

/// Test double serving scripted fetch results per URL.
pub struct InMemoryFeedFetcher {
    results: Mutex<HashMap<String, Result<Vec<FetchedItem>, CrawlError>>>,
}

impl InMemoryFeedFetcher {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the result served for `url`. The same result is served
    /// on every subsequent fetch until replaced again.
    pub fn stub(&self, url: &str, result: Result<Vec<FetchedItem>, CrawlError>) {
        self.results.lock().unwrap().insert(url.to_string(), result);
    }

    pub fn stub_failure(&self, url: &str, msg: &str) {
        self.stub(
            url,
            Err(CrawlError::Fetch {
                url: url.to_string(),
                msg: msg.to_string(),
            }),
        );
    }
}

impl Default for InMemoryFeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IFeedFetcher for InMemoryFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FetchedItem>, CrawlError> {
        match self.results.lock().unwrap().get(url) {
            Some(result) => result.clone(),
            None => Err(CrawlError::Fetch {
                url: url.to_string(),
                msg: "no result stubbed for url".to_string(),
            }),
        }
    }
}
