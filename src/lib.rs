// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod semantic;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use crawlers::{PageFetcher, PageRunner, SearchQuery, WebDriverFetcher};
pub use error::{ExtractError, FetchError};
pub use results::{JobListing, PageFailure, RunOutcome, RunResult, TextRunResult};

use std::error::Error;

/// Main builder for a job search run against the browser-backed fetcher
pub struct Search {
    query: SearchQuery,
    config: ScraperConfig,
}

impl Search {
    /// Create a new search for a keyword and location, visiting one page.
    ///
    /// The default configuration honours the `WEBDRIVER_URL` environment variable.
    pub fn new(keyword: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: SearchQuery::new(keyword, location, config::MIN_PAGE_COUNT),
            config: ScraperConfig::default().with_env_overrides(),
        }
    }

    /// Set the number of results pages to visit
    pub fn with_pages(mut self, page_count: usize) -> Self {
        self.query.page_count = page_count;
        self
    }

    /// Enable or disable debug diagnostics
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Replace the scraper configuration; it is used exactly as given
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, Box<dyn Error>> {
        let config = ScraperConfig::from_file(path)?.with_env_overrides();
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn Error>> {
        let config = ScraperConfig::from_json(config_str)?.with_env_overrides();
        Ok(self.with_config(config))
    }

    /// The configuration the run will use
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Extract job listings from every page
    pub async fn listings(self) -> Result<RunOutcome, Box<dyn Error>> {
        let mut runner = self.runner()?;
        let outcome = runner.run(&self.query).await;
        runner.shutdown().await;
        Ok(outcome)
    }

    /// Normalize the text of every page
    pub async fn texts(self) -> Result<TextRunResult, Box<dyn Error>> {
        let mut runner = self.runner()?;
        let result = runner.run_text(&self.query).await;
        runner.shutdown().await;
        Ok(result)
    }

    fn runner(&self) -> Result<PageRunner<WebDriverFetcher>, Box<dyn Error>> {
        config::validate_page_count(self.query.page_count)?;

        let fetcher = WebDriverFetcher::new(&self.config);
        Ok(PageRunner::new(fetcher, self.config.clone()))
    }
}
