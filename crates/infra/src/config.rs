use std::time::Duration;
use tracing::log::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on a single feed fetch. On timeout the crawl unit
    /// is abandoned with a crawl error and no state is mutated.
    pub fetch_timeout: Duration,
    /// Upper bound on handing one digest payload to the mail
    /// transport. On timeout the dispatch unit is abandoned with a
    /// delivery error and pending items stay pending.
    pub send_timeout: Duration,
}

const FETCH_TIMEOUT_ENV: &str = "FEED_FETCH_TIMEOUT_MILLIS";
const SEND_TIMEOUT_ENV: &str = "DIGEST_SEND_TIMEOUT_MILLIS";

impl Config {
    pub fn new() -> Self {
        Self {
            fetch_timeout: Duration::from_millis(env_millis(FETCH_TIMEOUT_ENV, 10_000)),
            send_timeout: Duration::from_millis(env_millis(SEND_TIMEOUT_ENV, 30_000)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_millis(var: &str, default: u64) -> u64 {
    let raw = match std::env::var(var) {
        Ok(raw) => raw,
        Err(_) => return default,
    };
    match raw.parse::<u64>() {
        Ok(millis) => millis,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                var, raw, default
            );
            default
        }
    }
}
