use thiserror::Error;

/// Failures of the network calls made by the page behaviors.
///
/// None of these reach the user; callers log them and carry on (or stop
/// polling, for the status feed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}
