use crate::error::FetchError;
use async_trait::async_trait;

/// Source of raw results-page HTML
///
/// Implementations may block for a bounded interval (for example while an
/// anti-bot challenge resolves). Any error is treated as a failure of that
/// page only.
#[async_trait]
pub trait PageFetcher: Send {
    /// Fetch the HTML of the page at `url`
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError>;

    /// Release any resources held by the fetcher
    async fn close(&mut self) {}
}
