use crate::har::{Content, Entry, Header, PostData, QueryParam, Timings};
use serde::Serialize;
use url::Url;

/// Portable projection of a single entry.
///
/// A strict subset of the entry: cookies and cache metadata are deliberately
/// left out. The caller serializes the document and decides where it goes.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    #[serde(rename = "startedDateTime")]
    pub started_date_time: String,
    pub time: f64,
    #[serde(rename = "serverIPAddress", skip_serializing_if = "Option::is_none")]
    pub server_ip_address: Option<String>,
    pub request: ExportRequest,
    pub response: ExportResponse,
    pub timings: Timings,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    pub method: String,
    pub url: String,
    #[serde(rename = "httpVersion")]
    pub http_version: String,
    pub headers: Vec<Header>,
    #[serde(rename = "queryString")]
    pub query_string: Vec<QueryParam>,
    #[serde(rename = "postData", skip_serializing_if = "Option::is_none")]
    pub post_data: Option<PostData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub status: i64,
    #[serde(rename = "statusText")]
    pub status_text: String,
    #[serde(rename = "httpVersion")]
    pub http_version: String,
    pub headers: Vec<Header>,
    pub content: Content,
}

/// Project an entry into its export document. Pure and synchronous.
pub fn to_export_document(entry: &Entry) -> ExportDocument {
    ExportDocument {
        started_date_time: entry.started_date_time.clone(),
        time: entry.time,
        server_ip_address: entry.server_ip_address.clone(),
        request: ExportRequest {
            method: entry.request.method.clone(),
            url: entry.request.url.clone(),
            http_version: entry.request.http_version.clone(),
            headers: entry.request.headers.clone(),
            query_string: entry.request.query_string.clone(),
            post_data: entry.request.post_data.clone(),
        },
        response: ExportResponse {
            status: entry.response.status,
            status_text: entry.response.status_text.clone(),
            http_version: entry.response.http_version.clone(),
            headers: entry.response.headers.clone(),
            content: entry.response.content.clone(),
        },
        timings: entry.timings.clone(),
    }
}

/// Derive a filesystem-safe filename for an entry's export document.
///
/// `{method}_{host}{path}.json` with every non-alphanumeric character
/// replaced by an underscore. When the URL does not parse, falls back to
/// `request_{startTime}.json` so the name stays deterministic for the entry.
pub fn export_file_name(entry: &Entry) -> String {
    match Url::parse(&entry.request.url) {
        Ok(url) => {
            let host = url.host_str().unwrap_or("");
            let path = url.path();
            format!(
                "{}_{}{}.json",
                sanitize(&entry.request.method),
                sanitize(host),
                sanitize(path)
            )
        }
        Err(_) => {
            let stamp = if entry.started_date_time.trim().is_empty() {
                "unknown".to_string()
            } else {
                sanitize(&entry.started_date_time)
            };
            format!("request_{}.json", stamp)
        }
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::HarReader;

    fn sample_entry() -> Entry {
        let har = HarReader::from_str(
            r#"{
                "log": {
                    "entries": [{
                        "startedDateTime": "2024-03-01T12:00:00.000Z",
                        "time": 42.5,
                        "serverIPAddress": "93.184.216.34",
                        "request": {
                            "method": "GET",
                            "url": "https://api.example.com/v1/users?page=2",
                            "httpVersion": "HTTP/2.0",
                            "cookies": [{"name": "session", "value": "secret"}],
                            "headers": [{"name": "Accept", "value": "application/json"}],
                            "queryString": [{"name": "page", "value": "2"}]
                        },
                        "response": {
                            "status": 200,
                            "statusText": "OK",
                            "httpVersion": "HTTP/2.0",
                            "cookies": [{"name": "session", "value": "rotated"}],
                            "headers": [{"name": "Content-Type", "value": "application/json"}],
                            "content": {"size": 1234, "mimeType": "application/json"}
                        },
                        "timings": {"send": 0.1, "wait": 40.0, "receive": 2.4}
                    }]
                }
            }"#,
        )
        .unwrap();
        har.log.entries.into_iter().next().unwrap()
    }

    #[test]
    fn test_document_is_a_subset_without_cookies() {
        let doc = to_export_document(&sample_entry());
        assert_eq!(doc.request.method, "GET");
        assert_eq!(doc.response.status, 200);
        assert_eq!(doc.timings.wait, Some(40.0));
        assert_eq!(doc.server_ip_address.as_deref(), Some("93.184.216.34"));

        let json = serde_json::to_string_pretty(&doc).unwrap();
        assert!(json.contains("\"startedDateTime\""));
        assert!(json.contains("\"queryString\""));
        assert!(!json.contains("cookie"));
        assert!(!json.contains("session"));
    }

    #[test]
    fn test_file_name_from_url() {
        let entry = sample_entry();
        assert_eq!(
            export_file_name(&entry),
            "GET_api_example_com_v1_users.json"
        );
    }

    #[test]
    fn test_file_name_fallback_for_unparseable_url() {
        let mut entry = sample_entry();
        entry.request.url = "::::not-a-url".to_string();
        assert_eq!(
            export_file_name(&entry),
            "request_2024_03_01T12_00_00_000Z.json"
        );
    }
}
