use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Smallest number of pages a run may request
pub const MIN_PAGE_COUNT: usize = 1;

/// Largest number of pages a run may request
pub const MAX_PAGE_COUNT: usize = 20;

/// Environment variable that overrides the configured WebDriver URL
pub const WEBDRIVER_URL_ENV: &str = "WEBDRIVER_URL";

/// Job site used when none is configured
pub const DEFAULT_SITE_ORIGIN: &str = "https://sg.indeed.com";

/// Configuration for the job scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Scheme and host of the job site, used for the search URL and relative links
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    /// Number of listings the site shows per results page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Search radius passed to the site
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Seconds to wait for the results container while an anti-bot challenge clears
    #[serde(default = "default_challenge_timeout_secs")]
    pub challenge_timeout_secs: u64,

    /// Upper bound in seconds for one whole page fetch
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Maximum characters per text chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Ollama API endpoint
    #[serde(default = "default_ollama_endpoint")]
    pub ollama_endpoint: String,

    /// Ollama model name
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// Emit card counts and raw HTML diagnostics
    #[serde(default)]
    pub debug: bool,

    /// Directory for raw page HTML dumps when debugging
    #[serde(default)]
    pub debug_html_dir: Option<PathBuf>,
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Applies the `WEBDRIVER_URL` environment variable, if set
    pub fn with_env_overrides(mut self) -> Self {
        self.override_webdriver_url(std::env::var(WEBDRIVER_URL_ENV).ok());
        self
    }

    /// Replaces the WebDriver URL; a missing or empty value keeps the current one
    pub fn override_webdriver_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|url| !url.is_empty()) {
            self.webdriver_url = url;
        }
    }

    /// Search URL for a zero-based page index
    pub fn page_url(&self, keyword: &str, location: &str, page_index: usize) -> String {
        crate::utils::page_url(
            &self.site_origin,
            keyword,
            location,
            self.radius,
            page_index * self.page_size,
        )
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            site_origin: default_site_origin(),
            page_size: default_page_size(),
            radius: default_radius(),
            challenge_timeout_secs: default_challenge_timeout_secs(),
            page_timeout_secs: default_page_timeout_secs(),
            chunk_size: default_chunk_size(),
            ollama_endpoint: default_ollama_endpoint(),
            ollama_model: default_ollama_model(),
            debug: false,
            debug_html_dir: None,
        }
    }
}

/// Checks that a requested page count lies in the supported range
pub fn validate_page_count(page_count: usize) -> Result<usize, String> {
    if (MIN_PAGE_COUNT..=MAX_PAGE_COUNT).contains(&page_count) {
        Ok(page_count)
    } else {
        Err(format!(
            "page count must be between {} and {}, got {}",
            MIN_PAGE_COUNT, MAX_PAGE_COUNT, page_count
        ))
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_site_origin() -> String {
    DEFAULT_SITE_ORIGIN.to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_radius() -> u32 {
    10
}

fn default_challenge_timeout_secs() -> u64 {
    10
}

fn default_page_timeout_secs() -> u64 {
    45
}

fn default_chunk_size() -> usize {
    6000
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}
