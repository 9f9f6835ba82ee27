use crate::OutputFormat;
use anyhow::Result;
use harlens_core::har::{HarReader, PostData};
use harlens_core::replay::{EditedRequest, ReplayEngine, ReplayResult};
use std::path::Path;

pub fn execute(
    file: &Path,
    index: usize,
    url: Option<String>,
    method: Option<String>,
    headers: Vec<String>,
    body: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let har = HarReader::from_file(file)?;
    let entry = har.entry(index)?;

    // The overlay starts as a copy of the captured request; the capture
    // itself is never modified.
    let mut edited = EditedRequest::from_request(&entry.request);

    if let Some(url) = url {
        edited.url = url;
    }
    if let Some(method) = method {
        edited.method = method;
    }
    if !headers.is_empty() {
        edited.set_headers_from_text(&headers.join("\n"));
    }
    if let Some(body) = body {
        let mime_type = edited
            .post_data
            .as_ref()
            .map(|p| p.mime_type.clone())
            .unwrap_or_default();
        edited.post_data = Some(PostData {
            mime_type,
            text: Some(body),
            params: None,
            comment: None,
        });
    }

    tracing::warn!("Sending a live request to {}", edited.url);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async { ReplayEngine::new().replay(&edited).await })?;

    match format {
        OutputFormat::Pretty => output_pretty(&result),
        OutputFormat::Json | OutputFormat::Table => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn output_pretty(result: &ReplayResult) -> Result<()> {
    use console::style;

    println!(
        "\n{} {}",
        style(result.status).bold().yellow(),
        result.status_text
    );

    for header in &result.headers {
        println!("{}: {}", style(&header.name).dim(), header.value);
    }

    if result.body.is_empty() {
        println!("\n{}", style("(empty body)").dim());
    } else {
        println!("\n{}", result.body);
    }

    Ok(())
}
