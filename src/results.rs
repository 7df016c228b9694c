use serde::Serialize;

/// Placeholder for a field that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing description snippet
pub const NO_DESCRIPTION: &str = "No description available";

/// Placeholder for the posting date, which has no extraction source
pub const DATE_NOT_SPECIFIED: &str = "Not specified";

/// One job listing extracted from a search-results card.
///
/// Every field is always a non-empty string; absent data is carried as one of
/// the placeholder constants above. Field order matches the tabular column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub url: String,
    pub job_id: String,
    pub date_posted: String,
}

impl JobListing {
    /// Column names of the tabular encoding, in order
    pub const COLUMNS: [&'static str; 8] = [
        "title",
        "company",
        "location",
        "salary",
        "description",
        "url",
        "job_id",
        "date_posted",
    ];

    /// Field values in column order
    pub fn as_row(&self) -> [&str; 8] {
        [
            &self.title,
            &self.company,
            &self.location,
            &self.salary,
            &self.description,
            &self.url,
            &self.job_id,
            &self.date_posted,
        ]
    }
}

/// A page that could not be fetched or processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    /// Zero-based page index
    pub page_index: usize,

    /// Error detail reported by the failing stage
    pub detail: String,
}

impl PageFailure {
    pub fn new(page_index: usize, detail: impl Into<String>) -> Self {
        Self {
            page_index,
            detail: detail.into(),
        }
    }
}

/// Listings accumulated over a run, plus the pages that failed
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    /// Listings in page order, then card order within the page
    pub listings: Vec<JobListing>,

    /// One notice per failed page
    pub failures: Vec<PageFailure>,
}

/// Final outcome of a listing run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// At least one listing was extracted
    Completed(RunResult),

    /// No listings across all pages; carries whatever page failures occurred
    NoResults(Vec<PageFailure>),
}

impl RunOutcome {
    pub(crate) fn from_result(result: RunResult) -> Self {
        if result.listings.is_empty() {
            RunOutcome::NoResults(result.failures)
        } else {
            RunOutcome::Completed(result)
        }
    }

    /// Page failures, regardless of outcome
    pub fn failures(&self) -> &[PageFailure] {
        match self {
            RunOutcome::Completed(result) => &result.failures,
            RunOutcome::NoResults(failures) => failures,
        }
    }
}

/// Normalized text of one fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    /// Zero-based page index
    pub page_index: usize,

    /// URL the page was fetched from
    pub url: String,

    /// Normalized text content
    pub content: String,
}

/// Normalized page texts accumulated over a run, plus the pages that failed
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextRunResult {
    pub pages: Vec<PageText>,
    pub failures: Vec<PageFailure>,
}

impl TextRunResult {
    /// All page texts joined by a blank line
    pub fn combined(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Plain-text encoding: each page block followed by a blank line
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            out.push_str(&page.content);
            out.push_str("\n\n");
        }
        out
    }
}
