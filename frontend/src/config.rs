//! Page-level settings.
//!
//! The server template owns configuration: it is read from `data-*`
//! attributes on the elements the behaviors bind to. Every attribute is
//! optional.

use std::str::FromStr;

use tracing::warn;

use crate::view::ViewNode;

pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1000;
pub const DEFAULT_STATUS_URL: &str = "api/json";
pub const DEFAULT_RUNNING_JOBS_URL: &str = "runningJobs";
pub const DEFAULT_RECENTLY_FINISHED_URL: &str = "recentlyFinishedJobs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PageConfig {
    /// Reads `data-log-level` from `<body>`.
    pub fn from_body<N: ViewNode>(body: Option<&N>) -> Self {
        let log_level = body
            .and_then(|node| node.attribute("data-log-level"))
            .map(|value| value.trim().to_ascii_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Self { log_level }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval_ms: u32,
    pub status_url: String,
    pub running_jobs_url: String,
    pub recently_finished_url: String,
    /// Consecutive status failures tolerated before polling stops.
    pub status_retries: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            status_url: DEFAULT_STATUS_URL.to_string(),
            running_jobs_url: DEFAULT_RUNNING_JOBS_URL.to_string(),
            recently_finished_url: DEFAULT_RECENTLY_FINISHED_URL.to_string(),
            status_retries: 0,
        }
    }
}

impl PollerConfig {
    /// Polling settings live on the running-jobs region; each region may
    /// override its own fragment URL with `data-fragment-url`.
    pub fn from_regions<N: ViewNode>(running: Option<&N>, recently_finished: Option<&N>) -> Self {
        let mut config = Self::default();

        if let Some(node) = running {
            if let Some(interval) = parse_attr::<u32, N>(node, "data-poll-interval-ms") {
                if interval > 0 {
                    config.interval_ms = interval;
                } else {
                    warn!("ignoring zero data-poll-interval-ms");
                }
            }
            if let Some(retries) = parse_attr::<u32, N>(node, "data-status-retries") {
                config.status_retries = retries;
            }
            if let Some(url) = text_attr(node, "data-status-url") {
                config.status_url = url;
            }
            if let Some(url) = text_attr(node, "data-fragment-url") {
                config.running_jobs_url = url;
            }
        }

        if let Some(url) = recently_finished.and_then(|node| text_attr(node, "data-fragment-url")) {
            config.recently_finished_url = url;
        }

        config
    }
}

fn text_attr<N: ViewNode>(node: &N, name: &str) -> Option<String> {
    node.attribute(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_attr<T: FromStr, N: ViewNode>(node: &N, name: &str) -> Option<T> {
    let raw = text_attr(node, name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring malformed {name}={raw:?} on #{}", node.id());
            None
        }
    }
}
