//! Job listing extraction from search-result cards.
//!
//! Each field is resolved through an ordered chain of probes. Older or
//! alternate markup variants sit later in the chain, so supporting a new
//! variant means adding a probe rather than a branch.

use crate::config::DEFAULT_SITE_ORIGIN;
use crate::parsers::html;
use crate::results::{DATE_NOT_SPECIFIED, JobListing, NO_DESCRIPTION, NOT_AVAILABLE};
use crate::utils;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Selector for one listing card on a results page
pub const CARD_SELECTOR: &str = "div.job_seen_beacon";

/// Selector for the title link inside a card
pub const TITLE_LINK_SELECTOR: &str = "h2.jobTitle a.jcs-JobTitle";

/// Garbled middle dot left behind by a UTF-8/Latin-1 mix-up
pub const MOJIBAKE_MIDDLE_DOT: &str = "\u{c2}\u{b7}";

/// Prefix carried by the title link's `id` attribute
const JOB_ID_PREFIX: &str = "job_";

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CARD_SELECTOR).expect("static selector"));

static CHAINS: LazyLock<Vec<FieldChain>> = LazyLock::new(|| {
    vec![
        FieldChain::new(
            Field::Title,
            vec![
                Probe::text("h2.jobTitle a span[title]"),
                Probe::text(r#"h2.jobTitle span[id^="jobTitle"]"#),
                Probe::text("h2.jobTitle a span"),
            ],
        ),
        FieldChain::new(
            Field::Company,
            vec![Probe::text(r#"span[data-testid="company-name"]"#)],
        ),
        FieldChain::new(
            Field::Location,
            vec![Probe::text(r#"div[data-testid="text-location"]"#)],
        ),
        // Scoped to the salary container; the bare attribute snippet also
        // matches unrelated snippets such as job type.
        FieldChain::new(
            Field::Salary,
            vec![Probe::text(
                r#".salary-snippet-container [data-testid="attribute_snippet_testid"]"#,
            )],
        ),
        FieldChain::new(
            Field::Description,
            vec![Probe::text(r#"div[data-testid="jobsnippet_footer"]"#)],
        ),
        FieldChain::new(
            Field::Url,
            vec![Probe::attr(TITLE_LINK_SELECTOR, "href")],
        ),
        FieldChain::new(
            Field::JobId,
            vec![
                Probe::attr(TITLE_LINK_SELECTOR, "data-jk"),
                Probe::attr(TITLE_LINK_SELECTOR, "id").strip_prefix(JOB_ID_PREFIX),
            ],
        ),
    ]
});

/// Listing fields that have an extraction source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Company,
    Location,
    Salary,
    Description,
    Url,
    JobId,
}

impl Field {
    /// Placeholder used when the field cannot be resolved
    pub fn sentinel(self) -> &'static str {
        match self {
            Field::Description => NO_DESCRIPTION,
            _ => NOT_AVAILABLE,
        }
    }
}

/// How a matched element yields its value
#[derive(Debug, Clone, Copy)]
enum Source {
    /// Trimmed text of every descendant text node, concatenated
    Text,
    /// Value of an attribute
    Attr(&'static str),
}

/// One structural pattern in a fallback chain
#[derive(Debug)]
struct Probe {
    selector: Selector,
    source: Source,
    strip_prefix: Option<&'static str>,
}

impl Probe {
    fn text(css: &str) -> Self {
        Self::new(css, Source::Text)
    }

    fn attr(css: &str, name: &'static str) -> Self {
        Self::new(css, Source::Attr(name))
    }

    fn new(css: &str, source: Source) -> Self {
        Self {
            selector: Selector::parse(css).expect("static selector"),
            source,
            strip_prefix: None,
        }
    }

    fn strip_prefix(mut self, prefix: &'static str) -> Self {
        self.strip_prefix = Some(prefix);
        self
    }

    /// Reads the first matching element, if it carries a non-empty value
    fn resolve(&self, card: ElementRef<'_>) -> Option<String> {
        let element = card.select(&self.selector).next()?;

        let value = match self.source {
            Source::Text => html::stripped_text(element)?,
            Source::Attr(name) => element.value().attr(name)?.to_string(),
        };

        let value = match self.strip_prefix {
            Some(prefix) => value
                .strip_prefix(prefix)
                .map(str::to_string)
                .unwrap_or(value),
            None => value,
        };

        if value.trim().is_empty() { None } else { Some(value) }
    }
}

/// Ordered probes for a single field
#[derive(Debug)]
struct FieldChain {
    field: Field,
    probes: Vec<Probe>,
}

impl FieldChain {
    fn new(field: Field, probes: Vec<Probe>) -> Self {
        Self { field, probes }
    }

    fn resolve(&self, card: ElementRef<'_>) -> Option<String> {
        self.probes.iter().find_map(|probe| probe.resolve(card))
    }
}

/// Summary of the cards found on a page, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReport {
    pub card_count: usize,
    pub first_card_html: Option<String>,
}

/// Extracts job listings from search-result markup
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    site_origin: String,
}

impl Default for ListingExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_ORIGIN)
    }
}

impl ListingExtractor {
    /// Create an extractor that resolves relative links against `site_origin`
    pub fn new(site_origin: impl Into<String>) -> Self {
        Self {
            site_origin: site_origin.into(),
        }
    }

    /// Extracts every listing card of a page, in document order
    pub fn collect_listings(&self, html: &str) -> Vec<JobListing> {
        let doc = Html::parse_document(html);
        let listings: Vec<JobListing> = doc
            .select(&CARD)
            .map(|card| self.extract_listing(card))
            .collect();

        ::log::debug!("Extracted {} listings", listings.len());
        listings
    }

    /// Counts the cards of a page and captures the first one's markup
    pub fn inspect_cards(&self, html: &str) -> CardReport {
        let doc = Html::parse_document(html);
        let mut cards = doc.select(&CARD);
        let first_card_html = cards.next().map(|card| card.html());
        let card_count = first_card_html.as_ref().map_or(0, |_| 1 + cards.count());

        CardReport {
            card_count,
            first_card_html,
        }
    }

    /// Builds a listing from one card; missing fields get their placeholder
    pub fn extract_listing(&self, card: ElementRef<'_>) -> JobListing {
        let resolve = |field: Field| {
            self.resolve_field(card, field)
                .unwrap_or_else(|| field.sentinel().to_string())
        };

        JobListing {
            title: resolve(Field::Title),
            company: resolve(Field::Company),
            location: resolve(Field::Location),
            salary: resolve(Field::Salary),
            description: resolve(Field::Description),
            url: resolve(Field::Url),
            job_id: resolve(Field::JobId),
            date_posted: DATE_NOT_SPECIFIED.to_string(),
        }
    }

    /// Resolves one field through its chain and post-processing
    pub fn resolve_field(&self, card: ElementRef<'_>, field: Field) -> Option<String> {
        let chain = CHAINS.iter().find(|chain| chain.field == field)?;
        let value = chain.resolve(card)?;

        match field {
            Field::Description => {
                let cleaned = clean_description(&value);
                if cleaned.is_empty() { None } else { Some(cleaned) }
            }
            Field::Url => Some(utils::absolutize(&self.site_origin, &value)),
            _ => Some(value),
        }
    }
}

/// Replaces the garbled middle dot with a space and trims
pub fn clean_description(text: &str) -> String {
    text.replace(MOJIBAKE_MIDDLE_DOT, " ").trim().to_string()
}
