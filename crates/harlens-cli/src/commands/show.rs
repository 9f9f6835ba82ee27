use crate::OutputFormat;
use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use harlens_core::classify::{Classified, classify};
use harlens_core::har::{Entry, HarReader};
use serde::Serialize;
use std::path::Path;

/// Display view of one entry with its classified body
#[derive(Debug, Serialize)]
struct ShowView {
    index: usize,
    method: String,
    url: String,
    status: i64,
    #[serde(rename = "statusText")]
    status_text: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
    time: f64,
    language: Option<String>,
    body: Option<String>,
}

pub fn execute(file: &Path, index: usize, format: OutputFormat) -> Result<()> {
    let har = HarReader::from_file(file)?;
    let entry = har.entry(index)?;

    let view = build_view(entry, index);

    match format {
        OutputFormat::Pretty => output_pretty(entry, &view),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        OutputFormat::Table => output_table(&view),
    }
}

fn build_view(entry: &Entry, index: usize) -> ShowView {
    let content = &entry.response.content;

    // Base64-encoded bodies are decoded before classification; a body that
    // fails to decode is classified as-is.
    let text = match (&content.text, content.encoding.as_deref()) {
        (Some(text), Some("base64")) => match BASE64.decode(text) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::debug!("Body claims base64 but does not decode: {}", e);
                Some(text.clone())
            }
        },
        (Some(text), _) => Some(text.clone()),
        (None, _) => None,
    };

    let (language, body) = match classify(&content.mime_type, text.as_deref()) {
        Classified::Empty => (None, None),
        Classified::Content { language, text } => (Some(language.as_str().to_string()), Some(text)),
    };

    ShowView {
        index,
        method: entry.request.method.clone(),
        url: entry.request.url.clone(),
        status: entry.response.status,
        status_text: entry.response.status_text.clone(),
        mime_type: content.mime_type.clone(),
        time: entry.time,
        language,
        body,
    }
}

fn output_pretty(entry: &Entry, view: &ShowView) -> Result<()> {
    use console::style;

    println!(
        "\n{}",
        style(format!("Entry {}", view.index)).bold().cyan()
    );
    println!();
    println!("  {} {}", style(&view.method).bold(), style(&view.url).green());
    println!(
        "  Status:   {} {} ({})",
        style(view.status).yellow(),
        view.status_text,
        entry.response.http_version
    );
    println!("  Started:  {}", entry.started_date_time);
    println!("  Time:     {:.2} ms", view.time);

    let t = &entry.timings;
    println!(
        "  Timings:  blocked {}, dns {}, connect {}, ssl {}, send {}, wait {}, receive {}",
        phase(t.blocked),
        phase(t.dns),
        phase(t.connect),
        phase(t.ssl),
        phase(t.send),
        phase(t.wait),
        phase(t.receive)
    );

    match (&view.language, &view.body) {
        (Some(language), Some(body)) => {
            println!("\n{}", style(format!("Response Body ({})", language)).bold());
            println!("{}", body);
        }
        _ => println!("\n{}", style("(no content)").dim()),
    }

    println!();
    Ok(())
}

fn phase(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

fn output_table(view: &ShowView) -> Result<()> {
    println!("Field,Value");
    println!("Index,{}", view.index);
    println!("Method,{}", view.method);
    println!("URL,{}", view.url);
    println!("Status,{}", view.status);
    println!("Mime Type,{}", view.mime_type);
    println!("Time (ms),{:.2}", view.time);
    println!(
        "Language,{}",
        view.language.as_deref().unwrap_or("(no content)")
    );
    Ok(())
}
