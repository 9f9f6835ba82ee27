use crate::har::{Entry, Har, Log};
use serde::Serialize;

/// Hundreds-digit grouping of an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusClass {
    #[serde(rename = "2xx")]
    Success,
    #[serde(rename = "3xx")]
    Redirection,
    #[serde(rename = "4xx")]
    ClientError,
    #[serde(rename = "5xx")]
    ServerError,
    #[serde(rename = "other")]
    Other,
}

impl StatusClass {
    /// Classify a status code into its bucket.
    ///
    /// Anything outside 200-599 (including 1xx and junk codes) is `Other`
    /// and fails every specific bucket filter.
    pub fn of(status: i64) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirection,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Success => "2xx",
            StatusClass::Redirection => "3xx",
            StatusClass::ClientError => "4xx",
            StatusClass::ServerError => "5xx",
            StatusClass::Other => "other",
        }
    }

    /// Parse a bucket name as used on the CLI ("2xx", "4xx", "other", ...)
    pub fn parse(pattern: &str) -> Option<Self> {
        match pattern.to_ascii_lowercase().as_str() {
            "2xx" => Some(StatusClass::Success),
            "3xx" => Some(StatusClass::Redirection),
            "4xx" => Some(StatusClass::ClientError),
            "5xx" => Some(StatusClass::ServerError),
            "other" => Some(StatusClass::Other),
            _ => None,
        }
    }

    /// All buckets in display order
    pub const ALL: [StatusClass; 5] = [
        StatusClass::Success,
        StatusClass::Redirection,
        StatusClass::ClientError,
        StatusClass::ServerError,
        StatusClass::Other,
    ];
}

/// Filter criteria for capture entries
///
/// All populated conditions are combined with AND logic - an entry must match
/// every specified criterion to be included in the filtered view. An unset
/// criterion passes everything.
#[derive(Debug, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against URL or method
    pub search: Option<String>,
    /// HTTP method, exact match (case-insensitive)
    pub method: Option<String>,
    /// Status class bucket
    pub status_class: Option<StatusClass>,
}

impl FilterCriteria {
    /// Create a new FilterCriteria with default (no filtering)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search term; an empty term is treated as unset
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term: String = term.into();
        if !term.is_empty() {
            self.search = Some(term.to_lowercase());
        }
        self
    }

    /// Set the method filter (case-insensitive)
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into().to_uppercase());
        self
    }

    /// Set the status class filter
    pub fn with_status_class(mut self, class: StatusClass) -> Self {
        self.status_class = Some(class);
        self
    }

    /// Check if an entry matches all filter criteria
    pub fn matches(&self, entry: &Entry) -> bool {
        self.matches_search(entry) && self.matches_method(entry) && self.matches_status(entry)
    }

    fn matches_search(&self, entry: &Entry) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                entry.request.url.to_lowercase().contains(term)
                    || entry.request.method.to_lowercase().contains(term)
            }
        }
    }

    fn matches_method(&self, entry: &Entry) -> bool {
        match &self.method {
            None => true,
            Some(method) => entry.request.method.to_uppercase() == *method,
        }
    }

    fn matches_status(&self, entry: &Entry) -> bool {
        match self.status_class {
            None => true,
            Some(class) => StatusClass::of(entry.response.status) == class,
        }
    }
}

/// Filter a slice of entries down to the matching ones.
///
/// A stable filter: output preserves input (capture) order, and an empty
/// result is an empty vector, never an error.
pub fn filter_entries<'a>(entries: &'a [Entry], criteria: &FilterCriteria) -> Vec<&'a Entry> {
    entries.iter().filter(|e| criteria.matches(e)).collect()
}

/// Filter a capture into a new capture containing only matching entries.
///
/// Preserves all metadata (creator, browser, pages). The source capture is
/// untouched; a filter that matches nothing yields a valid empty capture.
pub fn filter_har(har: &Har, criteria: &FilterCriteria) -> Har {
    let filtered_entries: Vec<Entry> = har
        .log
        .entries
        .iter()
        .filter(|entry| criteria.matches(entry))
        .cloned()
        .collect();

    Har {
        log: Log {
            version: har.log.version.clone(),
            creator: har.log.creator.clone(),
            browser: har.log.browser.clone(),
            pages: har.log.pages.clone(),
            entries: filtered_entries,
            comment: har.log.comment.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::{Request, Response};

    fn entry(method: &str, url: &str, status: i64) -> Entry {
        Entry {
            request: Request {
                method: method.to_string(),
                url: url.to_string(),
                ..Default::default()
            },
            response: Response {
                status,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_status_class_boundaries() {
        assert_eq!(StatusClass::of(199), StatusClass::Other);
        assert_eq!(StatusClass::of(200), StatusClass::Success);
        assert_eq!(StatusClass::of(299), StatusClass::Success);
        assert_eq!(StatusClass::of(300), StatusClass::Redirection);
        assert_eq!(StatusClass::of(404), StatusClass::ClientError);
        assert_eq!(StatusClass::of(503), StatusClass::ServerError);
        assert_eq!(StatusClass::of(600), StatusClass::Other);
        assert_eq!(StatusClass::of(0), StatusClass::Other);
    }

    #[test]
    fn test_unconstrained_criteria_pass_everything_in_order() {
        let entries = vec![
            entry("GET", "https://example.com/a", 200),
            entry("POST", "https://example.com/b", 404),
            entry("GET", "https://example.com/c", 301),
        ];

        let filtered = filter_entries(&entries, &FilterCriteria::new());
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].request.url, "https://example.com/a");
        assert_eq!(filtered[1].request.url, "https://example.com/b");
        assert_eq!(filtered[2].request.url, "https://example.com/c");
    }

    #[test]
    fn test_search_matches_url_or_method() {
        let entries = vec![
            entry("GET", "https://api.example.com/users", 200),
            entry("POST", "https://cdn.example.com/asset.js", 200),
        ];

        let by_url = filter_entries(&entries, &FilterCriteria::new().with_search("API.example"));
        assert_eq!(by_url.len(), 1);
        assert_eq!(by_url[0].request.method, "GET");

        let by_method = filter_entries(&entries, &FilterCriteria::new().with_search("post"));
        assert_eq!(by_method.len(), 1);
        assert_eq!(by_method[0].request.method, "POST");

        // Empty term is treated as unset
        let all = filter_entries(&entries, &FilterCriteria::new().with_search(""));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_method_filter_exact_case_insensitive() {
        let entries = vec![
            entry("GET", "https://example.com/a", 200),
            entry("get", "https://example.com/b", 200),
            entry("POST", "https://example.com/c", 200),
        ];

        let filtered = filter_entries(&entries, &FilterCriteria::new().with_method("get"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_status_outside_range_fails_specific_buckets() {
        let entries = vec![entry("GET", "https://example.com/", 199)];

        for class in [
            StatusClass::Success,
            StatusClass::Redirection,
            StatusClass::ClientError,
            StatusClass::ServerError,
        ] {
            let criteria = FilterCriteria::new().with_status_class(class);
            assert!(filter_entries(&entries, &criteria).is_empty());
        }

        let criteria = FilterCriteria::new().with_status_class(StatusClass::Other);
        assert_eq!(filter_entries(&entries, &criteria).len(), 1);
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let entries = vec![
            entry("GET", "https://api.example.com/users", 200),
            entry("GET", "https://api.example.com/users", 404),
            entry("POST", "https://api.example.com/users", 200),
        ];

        let criteria = FilterCriteria::new()
            .with_search("users")
            .with_method("GET")
            .with_status_class(StatusClass::Success);
        assert_eq!(filter_entries(&entries, &criteria).len(), 1);
    }

    #[test]
    fn test_empty_capture_filters_to_empty() {
        let filtered = filter_entries(&[], &FilterCriteria::new().with_method("GET"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_har_preserves_metadata_and_allows_empty_result() {
        let har = crate::har::HarReader::from_str(
            r#"{
                "log": {
                    "version": "1.2",
                    "creator": {"name": "test", "version": "1.0"},
                    "entries": [
                        {"request": {"method": "GET", "url": "https://example.com/"},
                         "response": {"status": 200}}
                    ]
                }
            }"#,
        )
        .unwrap();

        let criteria = FilterCriteria::new().with_method("DELETE");
        let filtered = filter_har(&har, &criteria);
        assert_eq!(filtered.log.version, "1.2");
        assert_eq!(filtered.log.creator.name, "test");
        assert!(filtered.log.entries.is_empty());
    }

    #[test]
    fn test_status_class_parse() {
        assert_eq!(StatusClass::parse("2xx"), Some(StatusClass::Success));
        assert_eq!(StatusClass::parse("5XX"), Some(StatusClass::ServerError));
        assert_eq!(StatusClass::parse("other"), Some(StatusClass::Other));
        assert_eq!(StatusClass::parse("teapot"), None);
    }
}
