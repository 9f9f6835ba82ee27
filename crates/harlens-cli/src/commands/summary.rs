use crate::OutputFormat;
use anyhow::Result;
use harlens_core::analysis::{Analyzer, Summary, SummaryAnalyzer};
use harlens_core::filter::filter_har;
use harlens_core::har::{Entry, HarReader};
use std::path::Path;

pub fn execute(
    file: &Path,
    search: Option<String>,
    method: Option<String>,
    status: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let har = HarReader::from_file(file)?;

    let criteria = super::build_criteria(search, method, status)?;
    let view = filter_har(&har, &criteria);

    tracing::debug!(
        "Summarizing {} of {} entries",
        view.log.entries.len(),
        har.log.entries.len()
    );

    let summary = SummaryAnalyzer.analyze(&view.log.entries)?;

    match format {
        OutputFormat::Pretty => output_pretty(&summary, &view.log.entries, file),
        OutputFormat::Json => output_json(&summary),
        OutputFormat::Table => output_table(&summary),
    }
}

/// Humanize the span between the first and last entry start times
fn time_range(entries: &[Entry]) -> Option<String> {
    use chrono::{DateTime, Utc};

    let start = entries.first()?.started_date_time.as_str();
    let end = entries.last()?.started_date_time.as_str();

    let start_dt = DateTime::parse_from_rfc3339(start)
        .ok()?
        .with_timezone(&Utc);
    let end_dt = DateTime::parse_from_rfc3339(end).ok()?.with_timezone(&Utc);

    let secs = end_dt.signed_duration_since(start_dt).num_seconds();
    let span = if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    };

    let start_display = start.split('T').next().unwrap_or(start);
    let end_display = end.split('T').next().unwrap_or(end);
    Some(format!("{} to {} ({})", start_display, end_display, span))
}

fn output_pretty(summary: &Summary, entries: &[Entry], file: &Path) -> Result<()> {
    use console::style;

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.display().to_string());

    println!("\n{}", style(format!("Harlens Summary: {}", file_name)).bold().cyan());
    println!();

    println!("{}", style("Overview").bold());
    println!("  Entries:      {} requests", style(summary.total_count).yellow());
    println!("  Body Bytes:   {}", summary.total_body_bytes);
    println!("  Average Time: {:.2} ms", summary.average_time);
    if let Some(range) = time_range(entries) {
        println!("  Time Range:   {}", range);
    }

    if let Some(ref slowest) = summary.slowest {
        println!("\n{}", style("Slowest Request").bold());
        println!(
            "  [{}] {} {} ({}, {:.1} ms)",
            slowest.index,
            slowest.method,
            style(&slowest.url).green(),
            slowest.status,
            slowest.time
        );
    }

    if !summary.methods.is_empty() {
        println!("\n{}", style("Methods").bold());
        for m in &summary.methods {
            println!("  {:<8} {:>5}  {:>5.1}%", m.method, m.count, m.percentage);
        }
    }

    if !summary.status_classes.is_empty() {
        println!("\n{}", style("Status Classes").bold());
        for s in &summary.status_classes {
            println!("  {:<8} {:>5}", s.class.as_str(), s.count);
        }
    }

    if !summary.content_types.is_empty() {
        println!("\n{}", style("Content Types").bold());
        for c in &summary.content_types {
            println!("  {:<24} {:>5}", c.subtype, c.count);
        }
    }

    println!();
    Ok(())
}

fn output_json(summary: &Summary) -> Result<()> {
    let json_str = serde_json::to_string_pretty(summary)?;
    println!("{}", json_str);
    Ok(())
}

fn output_table(summary: &Summary) -> Result<()> {
    println!("Metric,Value");
    println!("Total Entries,{}", summary.total_count);
    println!("Total Body Bytes,{}", summary.total_body_bytes);
    println!("Average Time (ms),{:.2}", summary.average_time);

    if let Some(ref slowest) = summary.slowest {
        println!("Slowest Index,{}", slowest.index);
        println!("Slowest URL,{}", slowest.url);
        println!("Slowest Time (ms),{:.2}", slowest.time);
    }

    println!();
    println!("Method,Count,Percentage");
    for m in &summary.methods {
        println!("{},{},{:.1}", m.method, m.count, m.percentage);
    }

    println!();
    println!("Status Class,Count");
    for s in &summary.status_classes {
        println!("{},{}", s.class.as_str(), s.count);
    }

    println!();
    println!("Content Type,Count");
    for c in &summary.content_types {
        println!("{},{}", c.subtype, c.count);
    }

    Ok(())
}
