use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::PageError;

/// HTTP GET against the server that rendered the page.
#[async_trait(?Send)]
pub trait Fetch {
    async fn get_text(&self, url: &str) -> Result<String, PageError>;
}

/// Single-shot timer. The poller awaits one of these per tick.
#[async_trait(?Send)]
pub trait Sleep {
    async fn sleep_ms(&self, millis: u32);
}

pub async fn fetch_json<T, F>(fetcher: &F, url: &str) -> Result<T, PageError>
where
    T: DeserializeOwned,
    F: Fetch + ?Sized,
{
    let body = fetcher.get_text(url).await?;
    serde_json::from_str(&body).map_err(|err| PageError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}
