use crate::har::{Header, PostData, Request};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Failure of a single replay attempt.
///
/// Scoped to that attempt: it never affects the loaded capture or any other
/// entry.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,
}

/// Parse a freeform header text block into a header sequence.
///
/// Each non-empty line is split on the first colon into a trimmed name/value
/// pair; a line with no colon becomes a header with an empty value. This is a
/// best-effort parser for a hand-edited text field, not a strict grammar -
/// the tolerant behavior is the contract.
pub fn parse_header_block(text: &str) -> Vec<Header> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(':') {
            Some((name, value)) => Header::new(name.trim(), value.trim()),
            None => Header::new(line.trim(), ""),
        })
        .collect()
}

/// Mutable overlay over a captured request, produced at edit time.
///
/// The overlay is never written back into the capture; the captured entry
/// stays immutable and the overlay is discarded after the replay session.
#[derive(Debug, Clone)]
pub struct EditedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
    pub post_data: Option<PostData>,
}

impl EditedRequest {
    pub fn from_request(request: &Request) -> Self {
        Self {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            post_data: request.post_data.clone(),
        }
    }

    /// Replace the header sequence from a hand-edited text block
    pub fn set_headers_from_text(&mut self, text: &str) {
        self.headers = parse_header_block(text);
    }
}

impl From<&Request> for EditedRequest {
    fn from(request: &Request) -> Self {
        Self::from_request(request)
    }
}

/// Normalized capture of a replayed response; fresh per invocation
#[derive(Debug, Clone, Serialize)]
pub struct ReplayResult {
    pub status: u16,
    #[serde(rename = "statusText")]
    pub status_text: String,
    pub headers: Vec<Header>,
    pub body: String,
}

/// Re-issues captured requests against their live origins.
///
/// Single-shot by design: no retries and no timeout beyond the transport's
/// defaults - this is an exploratory tool, not a resilient client. Every
/// replay performs a real outbound call against whatever host the URL names,
/// which can include production systems.
pub struct ReplayEngine {
    client: reqwest::Client,
}

impl ReplayEngine {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Execute one replay and capture the full response.
    ///
    /// Concurrent invocations are independent; nothing is shared between
    /// calls beyond the connection pool. A caller that loses interest may
    /// simply drop the future or discard the result.
    pub async fn replay(&self, request: &EditedRequest) -> Result<ReplayResult, ReplayError> {
        let method = Method::from_bytes(request.method.trim().as_bytes())
            .map_err(|_| ReplayError::InvalidUrl(format!("invalid method {:?}", request.method)))?;

        let url = Url::parse(&request.url)
            .map_err(|e| ReplayError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        tracing::info!("Replaying {} {}", method, url);

        let mut headers = HeaderMap::new();
        for header in &request.headers {
            // The transport computes its own framing
            if header.name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            let Ok(name) = HeaderName::from_bytes(header.name.as_bytes()) else {
                tracing::debug!("Skipping unrepresentable header name: {:?}", header.name);
                continue;
            };
            let Ok(value) = HeaderValue::from_str(&header.value) else {
                tracing::debug!("Skipping unrepresentable header value for {}", header.name);
                continue;
            };
            headers.append(name, value);
        }

        let body = prepare_body(&request.post_data, &mut headers);

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| Header::new(name.as_str(), value.to_str().unwrap_or("")))
            .collect();

        // The full body, as text; nothing is truncated. Non-UTF-8 bytes come
        // back lossily decoded, which is the transport layer's representation.
        let body = response.text().await.map_err(map_transport_error)?;

        Ok(ReplayResult {
            status,
            status_text,
            headers,
            body,
        })
    }
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the outbound body from captured post data.
///
/// A body with non-empty text is sent verbatim and its declared MIME type
/// replaces the outbound content-type. Text-less multipart params are
/// re-encoded as a form submission.
fn prepare_body(post_data: &Option<PostData>, headers: &mut HeaderMap) -> Option<String> {
    let post_data = post_data.as_ref()?;

    if let Some(text) = post_data.text.as_ref().filter(|t| !t.is_empty()) {
        if !post_data.mime_type.is_empty()
            && let Ok(value) = HeaderValue::from_str(&post_data.mime_type)
        {
            headers.insert(CONTENT_TYPE, value);
        }
        return Some(text.clone());
    }

    let params = post_data.params.as_ref()?;
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for param in params {
        if let Some(value) = &param.value {
            serializer.append_pair(&param.name, value);
        }
    }
    let encoded = serializer.finish();
    if encoded.is_empty() {
        return None;
    }

    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
    }
    Some(encoded)
}

fn map_transport_error(err: reqwest::Error) -> ReplayError {
    if err.is_timeout() {
        ReplayError::Timeout
    } else if err.is_builder() {
        ReplayError::InvalidUrl(err.to_string())
    } else {
        ReplayError::Network(err.to_string())
    }
}
