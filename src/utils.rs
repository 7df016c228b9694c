use std::time::Duration;
use url::form_urlencoded;

/// Builds a search-results URL from the pagination template
pub fn page_url(origin: &str, keyword: &str, location: &str, radius: u32, offset: usize) -> String {
    format!(
        "{}/jobs?q={}&l={}&radius={}&start={}",
        origin.trim_end_matches('/'),
        encode_query(keyword),
        encode_query(location),
        radius,
        offset
    )
}

/// Form-encodes a free-text query value
pub fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Makes a site-relative link absolute; anything else passes through unchanged
pub fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

/// Filename for a raw HTML dump of a one-based page number
pub fn html_dump_filename(page_number: usize) -> String {
    format!("page_{}.html", page_number)
}

/// Converts a seconds setting into a duration, never zero
pub fn secs(value: u64) -> Duration {
    Duration::from_secs(value.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_encodes_query() {
        assert_eq!(
            page_url("https://sg.indeed.com/", "data analyst", "Jurong East", 10, 0),
            "https://sg.indeed.com/jobs?q=data+analyst&l=Jurong+East&radius=10&start=0"
        );
        assert_eq!(
            page_url("https://sg.indeed.com", "c++ & go", "", 25, 30),
            "https://sg.indeed.com/jobs?q=c%2B%2B+%26+go&l=&radius=25&start=30"
        );
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("https://sg.indeed.com", "/viewjob?jk=abc"),
            "https://sg.indeed.com/viewjob?jk=abc"
        );
        assert_eq!(
            absolutize("https://sg.indeed.com", "https://other.example/job/1"),
            "https://other.example/job/1"
        );
        assert_eq!(absolutize("https://sg.indeed.com", "viewjob"), "viewjob");
    }

    #[test]
    fn test_secs_is_never_zero() {
        assert_eq!(secs(0), Duration::from_secs(1));
        assert_eq!(secs(45), Duration::from_secs(45));
    }
}
