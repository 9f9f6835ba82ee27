use super::{Analyzer, ContentTypeCount, MethodCount, SlowestRequest, StatusClassCount, Summary};
use crate::Result;
use crate::filter::StatusClass;
use crate::har::Entry;

/// Number of content-type buckets kept in the distribution
const CONTENT_TYPE_LIMIT: usize = 5;

pub struct SummaryAnalyzer;

impl Analyzer for SummaryAnalyzer {
    type Output = Summary;

    /// Aggregate a set of entries into a `Summary`.
    ///
    /// Total over any parsed capture: missing sizes and times count as zero,
    /// an empty set yields an all-zero summary with empty distributions.
    fn analyze(&self, entries: &[Entry]) -> Result<Self::Output> {
        tracing::debug!("Summarizing {} entries", entries.len());

        let total_count = entries.len();

        let total_body_bytes: u64 = entries
            .iter()
            .map(|e| e.response.body_size.max(0) as u64)
            .sum();

        let total_time: f64 = entries.iter().map(|e| e.time).sum();
        let average_time = if total_count == 0 {
            0.0
        } else {
            total_time / total_count as f64
        };

        // Strict comparison keeps the first occurrence on ties
        let mut slowest: Option<SlowestRequest> = None;
        for (index, entry) in entries.iter().enumerate() {
            if slowest.as_ref().is_none_or(|s| entry.time > s.time) {
                slowest = Some(SlowestRequest {
                    index,
                    method: entry.request.method.clone(),
                    url: entry.request.url.clone(),
                    status: entry.response.status,
                    time: entry.time,
                });
            }
        }

        // Method distribution in first-seen order
        let mut methods: Vec<MethodCount> = Vec::new();
        for entry in entries {
            match methods.iter_mut().find(|m| m.method == entry.request.method) {
                Some(m) => m.count += 1,
                None => methods.push(MethodCount {
                    method: entry.request.method.clone(),
                    count: 1,
                    percentage: 0.0,
                }),
            }
        }
        for m in &mut methods {
            m.percentage = m.count as f64 * 100.0 / total_count as f64;
        }

        // Status class buckets in fixed order, empty buckets dropped
        let mut bucket_counts = [0usize; StatusClass::ALL.len()];
        for entry in entries {
            let class = StatusClass::of(entry.response.status);
            let idx = StatusClass::ALL.iter().position(|c| *c == class).unwrap_or(0);
            bucket_counts[idx] += 1;
        }
        let status_classes: Vec<StatusClassCount> = StatusClass::ALL
            .iter()
            .zip(bucket_counts)
            .filter(|(_, count)| *count > 0)
            .map(|(class, count)| StatusClassCount {
                class: *class,
                count,
            })
            .collect();

        // Content types by primary subtype, first-seen order, then the top
        // buckets by count (stable sort keeps first-seen order on ties)
        let mut content_types: Vec<ContentTypeCount> = Vec::new();
        for entry in entries {
            let subtype = primary_subtype(&entry.response.content.mime_type);
            match content_types.iter_mut().find(|c| c.subtype == subtype) {
                Some(c) => c.count += 1,
                None => content_types.push(ContentTypeCount { subtype, count: 1 }),
            }
        }
        content_types.sort_by(|a, b| b.count.cmp(&a.count));
        content_types.truncate(CONTENT_TYPE_LIMIT);

        tracing::info!(
            "Summary complete: {} entries, avg {:.2}ms",
            total_count,
            average_time
        );

        Ok(Summary {
            total_count,
            total_body_bytes,
            average_time,
            slowest,
            methods,
            status_classes,
            content_types,
        })
    }
}

/// Extract the portion of a MIME type after the slash, parameters stripped.
///
/// Goes through the `mime` parser for normalization and falls back to a
/// plain split for values the parser rejects; an empty type is `unknown`.
fn primary_subtype(mime_type: &str) -> String {
    let stripped = mime_type.split(';').next().unwrap_or("").trim();
    if stripped.is_empty() {
        return "unknown".to_string();
    }

    match stripped.parse::<mime::Mime>() {
        Ok(parsed) => match parsed.essence_str().split_once('/') {
            Some((_, subtype)) => subtype.to_string(),
            None => parsed.essence_str().to_string(),
        },
        Err(_) => match stripped.split_once('/') {
            Some((_, subtype)) => subtype.to_string(),
            None => stripped.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::{Content, Request, Response};

    fn entry(method: &str, status: i64, time: f64, mime: &str, body_size: i64) -> Entry {
        Entry {
            time,
            request: Request {
                method: method.to_string(),
                url: format!("https://example.com/{}", method.to_lowercase()),
                ..Default::default()
            },
            response: Response {
                status,
                body_size,
                content: Content {
                    mime_type: mime.to_string(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_set_yields_zeroed_summary() {
        let summary = SummaryAnalyzer.analyze(&[]).unwrap();
        assert_eq!(summary.total_count, 0);
        assert_eq!(summary.total_body_bytes, 0);
        assert_eq!(summary.average_time, 0.0);
        assert!(summary.slowest.is_none());
        assert!(summary.methods.is_empty());
        assert!(summary.status_classes.is_empty());
        assert!(summary.content_types.is_empty());
    }

    #[test]
    fn test_method_distribution_first_seen_order() {
        let entries = vec![
            entry("GET", 200, 10.0, "text/html", 100),
            entry("GET", 200, 20.0, "text/html", 100),
            entry("POST", 201, 30.0, "application/json", 50),
        ];

        let summary = SummaryAnalyzer.analyze(&entries).unwrap();
        assert_eq!(summary.methods.len(), 2);
        assert_eq!(summary.methods[0].method, "GET");
        assert_eq!(summary.methods[0].count, 2);
        assert!((summary.methods[0].percentage - 66.666_666).abs() < 0.01);
        assert_eq!(summary.methods[1].method, "POST");
        assert_eq!(summary.methods[1].count, 1);
        assert!((summary.methods[1].percentage - 33.333_333).abs() < 0.01);
    }

    #[test]
    fn test_average_includes_zero_time_entries() {
        let entries = vec![
            entry("GET", 200, 30.0, "text/html", 0),
            entry("GET", 200, 0.0, "text/html", 0),
            entry("GET", 200, 0.0, "text/html", 0),
        ];

        let summary = SummaryAnalyzer.analyze(&entries).unwrap();
        assert_eq!(summary.average_time, 10.0);
    }

    #[test]
    fn test_slowest_tie_break_first_occurrence() {
        let entries = vec![
            entry("GET", 200, 50.0, "text/html", 0),
            entry("POST", 200, 50.0, "text/html", 0),
            entry("PUT", 200, 10.0, "text/html", 0),
        ];

        let summary = SummaryAnalyzer.analyze(&entries).unwrap();
        let slowest = summary.slowest.unwrap();
        assert_eq!(slowest.index, 0);
        assert_eq!(slowest.method, "GET");
        assert_eq!(slowest.time, 50.0);
    }

    #[test]
    fn test_body_bytes_clamp_negative_sizes() {
        let entries = vec![
            entry("GET", 200, 1.0, "text/html", 100),
            entry("GET", 200, 1.0, "text/html", -1),
        ];

        let summary = SummaryAnalyzer.analyze(&entries).unwrap();
        assert_eq!(summary.total_body_bytes, 100);
    }

    #[test]
    fn test_status_class_buckets_skip_empty() {
        let entries = vec![
            entry("GET", 200, 1.0, "text/html", 0),
            entry("GET", 404, 1.0, "text/html", 0),
            entry("GET", 199, 1.0, "text/html", 0),
        ];

        let summary = SummaryAnalyzer.analyze(&entries).unwrap();
        let labels: Vec<&str> = summary
            .status_classes
            .iter()
            .map(|s| s.class.as_str())
            .collect();
        assert_eq!(labels, vec!["2xx", "4xx", "other"]);
    }

    #[test]
    fn test_content_types_top_five_with_first_seen_tie_break() {
        let mut entries = Vec::new();
        // Six distinct subtypes; "html" and "json" dominate, the four
        // singletons tie and the earliest two survive the cut.
        for mime in [
            "text/html",
            "text/html",
            "application/json",
            "application/json",
            "text/css",
            "application/javascript",
            "image/png",
            "image/svg+xml",
        ] {
            entries.push(entry("GET", 200, 1.0, mime, 0));
        }

        let summary = SummaryAnalyzer.analyze(&entries).unwrap();
        let subtypes: Vec<&str> = summary
            .content_types
            .iter()
            .map(|c| c.subtype.as_str())
            .collect();
        assert_eq!(subtypes, vec!["html", "json", "css", "javascript", "png"]);
    }

    #[test]
    fn test_subtype_extraction() {
        assert_eq!(primary_subtype("application/json; charset=utf-8"), "json");
        assert_eq!(primary_subtype("image/svg+xml"), "svg+xml");
        assert_eq!(primary_subtype(""), "unknown");
        assert_eq!(primary_subtype("garbage"), "garbage");
    }
}
