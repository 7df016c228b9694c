use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use yield_jobs::semantic::{self, OllamaExtractor};
use yield_jobs::config::WEBDRIVER_URL_ENV;
use yield_jobs::{RunOutcome, ScraperConfig, Search};

mod args;
use args::{Args, ModeArg};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!(
        "Starting job search for '{}' in '{}' ({} pages)",
        args.keyword,
        args.location,
        args.pages
    );

    // Listings go to stdout, so notes go to stderr
    eprintln!("Note: scraping requires a WebDriver server (e.g., ChromeDriver).");
    eprintln!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let start_time = std::time::Instant::now();
    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            ::log::error!("Scraping failed: {}", e);
            ExitCode::FAILURE
        }
    };

    ::log::info!(
        "Finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    code
}

async fn run(args: Args) -> Result<ExitCode, Box<dyn Error>> {
    let config = build_config(&args, std::env::var(WEBDRIVER_URL_ENV).ok())?;
    let search = Search::new(&args.keyword, &args.location)
        .with_config(config.clone())
        .with_pages(args.pages);

    match args.mode {
        ModeArg::Listings => {
            let outcome = search.listings().await?;
            report_failures(outcome.failures());

            match outcome {
                RunOutcome::Completed(result) => {
                    for listing in &result.listings {
                        println!("{}", serde_json::to_string(listing)?);
                    }
                    eprintln!("Found {} job listings", result.listings.len());
                    Ok(ExitCode::SUCCESS)
                }
                RunOutcome::NoResults(_) => {
                    eprintln!(
                        "No jobs found. Try different search terms or increase the number of pages."
                    );
                    Ok(ExitCode::from(2))
                }
            }
        }
        ModeArg::Text => {
            let result = search.texts().await?;
            report_failures(&result.failures);

            match &args.goal {
                Some(goal) => {
                    let extractor =
                        OllamaExtractor::new(&config.ollama_endpoint, &config.ollama_model)?;
                    let answer = semantic::extract_from_text(
                        &extractor,
                        &result.combined(),
                        config.chunk_size,
                        goal,
                    )
                    .await?;
                    println!("{}", answer);
                }
                None => print!("{}", result.to_plain_text()),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Loads the configuration file, if any, then applies the environment and
/// command-line overrides, in that order of increasing precedence
fn build_config(
    args: &Args,
    env_webdriver_url: Option<String>,
) -> Result<ScraperConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    config.override_webdriver_url(env_webdriver_url);

    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if let Some(size) = args.chunk_size {
        config.chunk_size = size;
    }
    if let Some(model) = &args.model {
        config.ollama_model = model.clone();
    }
    if args.debug_html_dir.is_some() {
        config.debug_html_dir = args.debug_html_dir.clone();
    }
    config.debug |= args.debug;

    Ok(config)
}

fn report_failures(failures: &[yield_jobs::PageFailure]) {
    for failure in failures {
        eprintln!(
            "Error scraping page {}: {}",
            failure.page_index + 1,
            failure.detail
        );
    }
}
