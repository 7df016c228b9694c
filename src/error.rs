use thiserror::Error;

/// Errors raised while fetching a results page
#[derive(Error, Debug)]
pub enum FetchError {
    /// No WebDriver server accepted a session
    #[error("failed to connect to WebDriver at {0}")]
    Connect(String),

    /// Navigation to the page failed
    #[error("failed to navigate to {url}: {detail}")]
    Navigate { url: String, detail: String },

    /// The page loaded but its source could not be read
    #[error("failed to read page source for {url}: {detail}")]
    Source { url: String, detail: String },

    /// The whole fetch took longer than allowed
    #[error("timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },
}

/// Errors raised by a semantic extractor
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Network or API communication error
    #[error("communication error: {0}")]
    Communication(String),

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The requested model is not installed
    #[error("model not available: {0}")]
    ModelNotAvailable(String),
}

impl From<reqwest::Error> for ExtractError {
    fn from(e: reqwest::Error) -> Self {
        ExtractError::Communication(e.to_string())
    }
}
