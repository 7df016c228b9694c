use crate::config::ScraperConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::error::FetchError;
use crate::parsers::listing::CARD_SELECTOR;
use crate::utils;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;
use tokio::time::timeout;

/// Fetches results pages through a WebDriver-controlled browser.
///
/// The session is opened lazily on the first fetch and reused for later
/// pages. A lost session is dropped so the next page reconnects.
pub struct WebDriverFetcher {
    webdriver_url: String,
    client: Option<Client>,
    challenge_timeout: Duration,
    page_timeout: Duration,
    wait_selector: String,
}

impl WebDriverFetcher {
    /// Create a fetcher from the scraper configuration
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            client: None,
            challenge_timeout: utils::secs(config.challenge_timeout_secs),
            page_timeout: utils::secs(config.page_timeout_secs),
            wait_selector: CARD_SELECTOR.to_string(),
        }
    }

    /// Override the element awaited while a challenge page clears
    pub fn with_wait_selector(mut self, selector: impl Into<String>) -> Self {
        self.wait_selector = selector.into();
        self
    }

    /// Returns the open session, connecting first if needed
    async fn client(&mut self) -> Result<Client, FetchError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = connect_to_webdriver(&self.webdriver_url).await?;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Navigates, waits for the results container and reads the source
    async fn load(&mut self, url: &str) -> Result<String, FetchError> {
        let client = self.client().await?;

        if let Err(e) = client.goto(url).await {
            self.forget_lost_session(&e);
            return Err(FetchError::Navigate {
                url: url.to_string(),
                detail: e.to_string(),
            });
        }

        ::log::debug!("Waiting for challenge to clear on {}", url);
        match client
            .wait()
            .at_most(self.challenge_timeout)
            .for_element(Locator::Css(&self.wait_selector))
            .await
        {
            Ok(_) => ::log::debug!("Results container present on {}", url),
            Err(e) => ::log::warn!(
                "Results container did not appear within {:?} on {} ({}); reading page anyway",
                self.challenge_timeout,
                url,
                e
            ),
        }

        match client.source().await {
            Ok(html) => Ok(html),
            Err(e) => {
                self.forget_lost_session(&e);
                Err(FetchError::Source {
                    url: url.to_string(),
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Drops the session when the browser reports it gone
    fn forget_lost_session(&mut self, error: &fantoccini::error::CmdError) {
        if error.to_string().contains("Unable to find session") {
            ::log::warn!("WebDriver session lost; reconnecting on next page");
            self.client = None;
        }
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let start = std::time::Instant::now();
        ::log::debug!("FETCH: {}", url);

        let page_timeout = self.page_timeout;
        let html = match timeout(page_timeout, self.load(url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    secs: page_timeout.as_secs(),
                });
            }
        };

        ::log::debug!(
            "Fetched {} ({} bytes) in {:.2} seconds",
            url,
            html.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(html)
    }

    async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
        }
    }
}

/// Connects to the WebDriver instance, trying common local ports after the configured one
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, FetchError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://127.0.0.1:4444",
    ];

    for url in fallback_urls.iter().filter(|url| **url != webdriver_url) {
        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(FetchError::Connect(webdriver_url.to_string()))
}
