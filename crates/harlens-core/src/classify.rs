use serde::Serialize;

/// Display syntax chosen for a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Json,
    Html,
    Javascript,
    Css,
    Xml,
    Text,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Json => "json",
            Language::Html => "html",
            Language::Javascript => "javascript",
            Language::Css => "css",
            Language::Xml => "xml",
            Language::Text => "text",
        }
    }
}

/// Result of classifying a payload for display
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The entry carried no body text
    Empty,
    Content { language: Language, text: String },
}

/// Pick a display syntax for a payload and canonicalize its formatting.
///
/// MIME substrings are tested in priority order. JSON payloads are reparsed
/// and re-serialized with stable 2-space indentation; a payload that claims
/// JSON but does not parse falls back to plain text with the raw payload.
/// This is a pure function and never fails.
pub fn classify(mime_type: &str, text: Option<&str>) -> Classified {
    let Some(text) = text else {
        return Classified::Empty;
    };

    let mime = mime_type.to_ascii_lowercase();

    if mime.contains("json") {
        return match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => Classified::Content {
                language: Language::Json,
                text: serde_json::to_string_pretty(&value)
                    .unwrap_or_else(|_| text.to_string()),
            },
            Err(e) => {
                tracing::debug!("Body claims JSON but does not parse: {}", e);
                Classified::Content {
                    language: Language::Text,
                    text: text.to_string(),
                }
            }
        };
    }

    let language = if mime.contains("html") {
        Language::Html
    } else if mime.contains("javascript") {
        Language::Javascript
    } else if mime.contains("css") {
        Language::Css
    } else if mime.contains("xml") {
        Language::Xml
    } else {
        Language::Text
    };

    Classified::Content {
        language,
        text: text.to_string(),
    }
}
