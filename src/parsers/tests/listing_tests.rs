use crate::parsers::listing::{Field, ListingExtractor, clean_description};
use crate::results::{DATE_NOT_SPECIFIED, JobListing, NO_DESCRIPTION, NOT_AVAILABLE};
use scraper::{Html, Selector};

/// Parses a fragment and runs `f` on the first listing card in it
fn with_card<T>(card_html: &str, f: impl FnOnce(scraper::ElementRef<'_>) -> T) -> T {
    let doc = Html::parse_document(&format!("<html><body>{}</body></html>", card_html));
    let selector = Selector::parse("div.job_seen_beacon").unwrap();
    let card = doc.select(&selector).next().expect("card in fixture");
    f(card)
}

fn extract(card_html: &str) -> JobListing {
    with_card(card_html, |card| ListingExtractor::default().extract_listing(card))
}

fn resolve(card_html: &str, field: Field) -> Option<String> {
    with_card(card_html, |card| {
        ListingExtractor::default().resolve_field(card, field)
    })
}

const FULL_CARD: &str = r#"
<div class="job_seen_beacon">
  <h2 class="jobTitle">
    <a class="jcs-JobTitle" href="/rc/clk?jk=9f2c1a&amp;from=serp" data-jk="9f2c1a" id="job_9f2c1a">
      <span title="Backend Engineer" id="jobTitle-9f2c1a">Backend Engineer</span>
    </a>
  </h2>
  <span data-testid="company-name">Acme Pte Ltd</span>
  <div data-testid="text-location">Singapore <span>Central</span></div>
  <div class="salary-snippet-container">
    <div data-testid="attribute_snippet_testid">$6,000 - $8,000 a month</div>
  </div>
  <div data-testid="jobsnippet_footer">
    <ul><li>Build APIs Â· Rust</li><li>Hybrid work</li></ul>
  </div>
</div>
"#;

const TITLE_ONLY_CARD: &str = r#"
<div class="job_seen_beacon">
  <h2 class="jobTitle"><span id="jobTitle-77">Warehouse Assistant</span></h2>
</div>
"#;

#[cfg(test)]
mod field_tests {
    use super::*;

    #[test]
    fn test_full_card() {
        let listing = extract(FULL_CARD);
        assert_eq!(listing.title, "Backend Engineer");
        assert_eq!(listing.company, "Acme Pte Ltd");
        assert_eq!(listing.location, "SingaporeCentral");
        assert_eq!(listing.salary, "$6,000 - $8,000 a month");
        assert_eq!(listing.description, "Build APIs   RustHybrid work");
        assert_eq!(listing.url, "https://sg.indeed.com/rc/clk?jk=9f2c1a&from=serp");
        assert_eq!(listing.job_id, "9f2c1a");
        assert_eq!(listing.date_posted, DATE_NOT_SPECIFIED);
    }

    #[test]
    fn test_title_prefers_labeled_span() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle"><a>
            <span id="jobTitle-1">Id Span</span><span title="Labeled">Labeled</span>
        </a></h2></div>"#;
        assert_eq!(resolve(card, Field::Title).as_deref(), Some("Labeled"));
    }

    #[test]
    fn test_title_falls_back_to_id_prefixed_span() {
        assert_eq!(
            resolve(TITLE_ONLY_CARD, Field::Title).as_deref(),
            Some("Warehouse Assistant")
        );
    }

    #[test]
    fn test_title_falls_back_to_any_link_span() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle"><a href="/x">
            <span class="new-variant">Barista</span>
        </a></h2></div>"#;
        assert_eq!(extract(card).title, "Barista");
    }

    #[test]
    fn test_title_missing_is_sentinel() {
        let card = r#"<div class="job_seen_beacon"><h3>Not a title</h3></div>"#;
        assert_eq!(resolve(card, Field::Title), None);
        assert_eq!(extract(card).title, NOT_AVAILABLE);
    }

    #[test]
    fn test_blank_match_falls_through_to_next_probe() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle"><a>
            <span title="">   </span>
        </a><span id="jobTitle-2">Cook</span></h2></div>"#;
        assert_eq!(extract(card).title, "Cook");
    }

    #[test]
    fn test_salary_requires_salary_container() {
        let card = r#"<div class="job_seen_beacon">
            <div class="metadata"><div data-testid="attribute_snippet_testid">Full-time</div></div>
        </div>"#;
        assert_eq!(extract(card).salary, NOT_AVAILABLE);
    }

    #[test]
    fn test_absolute_href_passes_through() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle">
            <a class="jcs-JobTitle" href="https://sg.indeed.com/viewjob?jk=abc">x</a>
        </h2></div>"#;
        assert_eq!(extract(card).url, "https://sg.indeed.com/viewjob?jk=abc");
    }

    #[test]
    fn test_relative_href_is_absolutized() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle">
            <a class="jcs-JobTitle" href="/viewjob?jk=abc">x</a>
        </h2></div>"#;
        assert_eq!(extract(card).url, "https://sg.indeed.com/viewjob?jk=abc");
    }

    #[test]
    fn test_relative_href_uses_configured_origin() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle">
            <a class="jcs-JobTitle" href="/viewjob?jk=abc">x</a>
        </h2></div>"#;
        let listing = with_card(card, |card| {
            ListingExtractor::new("https://www.indeed.com").extract_listing(card)
        });
        assert_eq!(listing.url, "https://www.indeed.com/viewjob?jk=abc");
    }

    #[test]
    fn test_job_id_falls_back_to_link_id() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle">
            <a class="jcs-JobTitle" id="job_5e6f7a">x</a>
        </h2></div>"#;
        assert_eq!(extract(card).job_id, "5e6f7a");
    }

    #[test]
    fn test_job_id_without_prefix_is_kept() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle">
            <a class="jcs-JobTitle" id="sj_123">x</a>
        </h2></div>"#;
        assert_eq!(extract(card).job_id, "sj_123");
    }

    #[test]
    fn test_link_without_job_class_is_ignored() {
        let card = r#"<div class="job_seen_beacon"><h2 class="jobTitle">
            <a href="/viewjob?jk=abc" data-jk="abc">x</a>
        </h2></div>"#;
        let listing = extract(card);
        assert_eq!(listing.url, NOT_AVAILABLE);
        assert_eq!(listing.job_id, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_description_uses_its_own_sentinel() {
        assert_eq!(extract(TITLE_ONLY_CARD).description, NO_DESCRIPTION);
    }

    #[test]
    fn test_description_of_only_mojibake_is_sentinel() {
        let card = r#"<div class="job_seen_beacon"><div data-testid="jobsnippet_footer">Â·</div></div>"#;
        assert_eq!(extract(card).description, NO_DESCRIPTION);
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("Shift workÂ·Overtime"), "Shift work Overtime");
        assert_eq!(clean_description("Â·Leading"), "Leading");
        assert_eq!(clean_description("Café · naïve"), "Café · naïve");
    }

    #[test]
    fn test_every_field_non_empty() {
        let fixtures = [
            FULL_CARD,
            TITLE_ONLY_CARD,
            r#"<div class="job_seen_beacon"></div>"#,
            r#"<div class="job_seen_beacon"><h2 class="jobTitle"><a class="jcs-JobTitle" href="" data-jk="">
                <span title=""></span></a></h2><span data-testid="company-name"> </span></div>"#,
        ];
        for fixture in fixtures {
            let listing = extract(fixture);
            for (column, value) in JobListing::COLUMNS.iter().zip(listing.as_row()) {
                assert!(!value.is_empty(), "{} empty for fixture {}", column, fixture);
            }
        }
    }
}

#[cfg(test)]
mod collector_tests {
    use super::*;

    #[test]
    fn test_two_cards_end_to_end() {
        let page = format!(
            "<html><head><title>jobs</title></head><body><div id=\"results\">{}{}</div></body></html>",
            FULL_CARD, TITLE_ONLY_CARD
        );
        let listings = ListingExtractor::default().collect_listings(&page);

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].company, "Acme Pte Ltd");
        assert_eq!(listings[0].job_id, "9f2c1a");

        let second = &listings[1];
        assert_eq!(second.title, "Warehouse Assistant");
        assert_eq!(second.company, NOT_AVAILABLE);
        assert_eq!(second.location, NOT_AVAILABLE);
        assert_eq!(second.salary, NOT_AVAILABLE);
        assert_eq!(second.description, NO_DESCRIPTION);
        assert_eq!(second.url, NOT_AVAILABLE);
        assert_eq!(second.job_id, NOT_AVAILABLE);
        assert_eq!(second.date_posted, DATE_NOT_SPECIFIED);
    }

    #[test]
    fn test_cards_keep_document_order() {
        let page = ["Alpha", "Bravo", "Charlie"]
            .iter()
            .map(|t| {
                format!(
                    r#"<section><div class="job_seen_beacon"><h2 class="jobTitle"><a><span title="{t}">{t}</span></a></h2></div></section>"#
                )
            })
            .collect::<String>();
        let titles: Vec<_> = ListingExtractor::default()
            .collect_listings(&page)
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_no_cards_is_empty() {
        let page = "<html><body><div class=\"jobsearch-NoResult\">No jobs</div></body></html>";
        assert!(ListingExtractor::default().collect_listings(page).is_empty());
        assert!(ListingExtractor::default().collect_listings("").is_empty());
    }

    #[test]
    fn test_inspect_cards() {
        let page = format!("<html><body>{}{}</body></html>", FULL_CARD, TITLE_ONLY_CARD);
        let report = ListingExtractor::default().inspect_cards(&page);
        assert_eq!(report.card_count, 2);
        assert!(
            report
                .first_card_html
                .as_deref()
                .unwrap()
                .contains("Acme Pte Ltd")
        );

        let empty = ListingExtractor::default().inspect_cards("<html><body></body></html>");
        assert_eq!(empty.card_count, 0);
        assert!(empty.first_card_html.is_none());
    }
}
