pub mod html;
pub mod listing;
pub mod text;

#[cfg(test)]
mod tests;

use crate::results::JobListing;
use listing::ListingExtractor;

/// Main parser that delegates to the listing extractor or the normalizer
#[derive(Debug, Clone, Default)]
pub struct Parser {
    extractor: ListingExtractor,
}

impl Parser {
    /// Create a parser resolving relative links against `site_origin`
    pub fn new(site_origin: impl Into<String>) -> Self {
        Self {
            extractor: ListingExtractor::new(site_origin),
        }
    }

    /// The listing extractor behind [`Parser::listings`]
    pub fn extractor(&self) -> &ListingExtractor {
        &self.extractor
    }

    /// Structured job listings from the result cards of a page
    pub fn listings(&self, html: &str) -> Vec<JobListing> {
        self.extractor.collect_listings(html)
    }

    /// Normalized body text of a page, for semantic extraction
    pub fn text(&self, html: &str) -> String {
        html::normalize(html)
    }
}
