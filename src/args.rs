use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use yield_jobs::config::validate_page_count;

#[derive(Parser, Debug)]
#[command(name = "yield-jobs")]
#[command(about = "Extracts job listings or cleaned page text from job search results")]
#[command(version)]
pub struct Args {
    /// Job title or keyword to search for
    pub keyword: String,

    /// Location to search in
    pub location: String,

    /// Output mode (listings, text)
    #[arg(short, long, value_enum, default_value_t = ModeArg::Listings)]
    pub mode: ModeArg,

    /// Number of results pages to scrape (1-20)
    #[arg(short, long, default_value_t = 3, value_parser = parse_page_count)]
    pub pages: usize,

    /// Enable debug diagnostics (card counts, first card HTML)
    #[arg(long)]
    pub debug: bool,

    /// Directory to save raw page HTML into when debugging
    #[arg(long)]
    pub debug_html_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver URL (overrides the configuration file)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Describe what to extract from the page text (text mode only)
    #[arg(short, long)]
    pub goal: Option<String>,

    /// Maximum characters per chunk sent to the model
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Ollama model used for semantic extraction
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Structured listings as JSON lines
    Listings,
    /// Normalized page text
    Text,
}

fn parse_page_count(value: &str) -> Result<usize, String> {
    let count = value
        .parse::<usize>()
        .map_err(|e| format!("invalid page count '{}': {}", value, e))?;
    validate_page_count(count)
}
