use crate::config::ScraperConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::parsers::Parser;
use crate::results::{PageFailure, PageText, RunOutcome, RunResult, TextRunResult};
use crate::utils;
use std::fs;

/// Search parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text job keyword
    pub keyword: String,

    /// Free-text location
    pub location: String,

    /// Number of results pages to visit
    pub page_count: usize,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, location: impl Into<String>, page_count: usize) -> Self {
        Self {
            keyword: keyword.into(),
            location: location.into(),
            page_count,
        }
    }
}

/// A successfully parsed page
struct ParsedPage<T> {
    page_index: usize,
    url: String,
    result: T,
}

/// Visits results pages one at a time and accumulates what they yield.
///
/// A failed page is recorded and skipped; it never stops the run.
pub struct PageRunner<F: PageFetcher> {
    fetcher: F,
    parser: Parser,
    config: ScraperConfig,
}

impl<F: PageFetcher> PageRunner<F> {
    /// Create a runner around a fetcher
    pub fn new(fetcher: F, config: ScraperConfig) -> Self {
        Self {
            fetcher,
            parser: Parser::new(config.site_origin.clone()),
            config,
        }
    }

    /// Extracts job listings from every requested page
    pub async fn run(&mut self, query: &SearchQuery) -> RunOutcome {
        let (pages, failures) = self.run_pages(query, Parser::listings).await;

        let mut listings = Vec::new();
        for page in pages {
            ::log::info!(
                "Found {} jobs on page {}",
                page.result.len(),
                page.page_index + 1
            );
            listings.extend(page.result);
        }

        ::log::info!(
            "Run complete: {} listings, {} failed pages",
            listings.len(),
            failures.len()
        );

        RunOutcome::from_result(RunResult { listings, failures })
    }

    /// Normalizes the body text of every requested page
    pub async fn run_text(&mut self, query: &SearchQuery) -> TextRunResult {
        let (pages, failures) = self.run_pages(query, Parser::text).await;

        let pages = pages
            .into_iter()
            .map(|page| PageText {
                page_index: page.page_index,
                url: page.url,
                content: page.result,
            })
            .collect::<Vec<_>>();

        ::log::info!(
            "Text run complete: {} pages, {} failed pages",
            pages.len(),
            failures.len()
        );

        TextRunResult { pages, failures }
    }

    /// Closes the fetcher
    pub async fn shutdown(mut self) {
        self.fetcher.close().await;
    }

    async fn run_pages<T>(
        &mut self,
        query: &SearchQuery,
        parse: fn(&Parser, &str) -> T,
    ) -> (Vec<ParsedPage<T>>, Vec<PageFailure>) {
        let mut pages = Vec::with_capacity(query.page_count);
        let mut failures = Vec::new();

        for page_index in 0..query.page_count {
            let page_number = page_index + 1;
            let url = self
                .config
                .page_url(&query.keyword, &query.location, page_index);
            ::log::info!(
                "Scraping page {} of {}: {}",
                page_number,
                query.page_count,
                url
            );

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    ::log::error!("Error scraping page {}: {}", page_number, e);
                    failures.push(PageFailure::new(page_index, e.to_string()));
                    continue;
                }
            };

            if self.config.debug {
                self.inspect_page(page_number, &html);
            }

            let result = parse(&self.parser, &html);
            pages.push(ParsedPage {
                page_index,
                url,
                result,
            });
        }

        (pages, failures)
    }

    /// Debug diagnostics for a fetched page; never affects extraction
    fn inspect_page(&self, page_number: usize, html: &str) {
        let report = self.parser.extractor().inspect_cards(html);
        ::log::info!(
            "Found {} job cards in HTML for page {}",
            report.card_count,
            page_number
        );
        if let Some(card) = &report.first_card_html {
            ::log::info!("Sample of first job card HTML:\n{}", card);
        }

        if let Some(dir) = &self.config.debug_html_dir {
            let path = dir.join(utils::html_dump_filename(page_number));
            match fs::create_dir_all(dir).and_then(|_| fs::write(&path, html)) {
                Ok(()) => ::log::info!(
                    "Saved raw HTML for page {} to {}",
                    page_number,
                    path.display()
                ),
                Err(e) => ::log::warn!("Failed to save raw HTML to {}: {}", path.display(), e),
            }
        }
    }
}
