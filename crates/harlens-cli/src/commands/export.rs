use anyhow::Result;
use harlens_core::export::{export_file_name, to_export_document};
use harlens_core::har::HarReader;
use std::fs;
use std::path::{Path, PathBuf};

pub fn execute(file: &Path, index: usize, output: Option<PathBuf>) -> Result<()> {
    let har = HarReader::from_file(file)?;
    let entry = har.entry(index)?;

    let document = to_export_document(entry);
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(entry)));

    let json = serde_json::to_string_pretty(&document)?;
    fs::write(&path, json)?;

    tracing::info!("Exported entry {} to {}", index, path.display());
    println!("Wrote {}", path.display());

    Ok(())
}
