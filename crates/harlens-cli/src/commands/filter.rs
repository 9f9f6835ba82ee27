use anyhow::Result;
use harlens_core::filter::filter_har;
use harlens_core::har::{HarReader, HarWriter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub fn execute(
    file: &Path,
    search: Option<String>,
    method: Option<String>,
    status: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    tracing::debug!("Filtering HAR capture: {}", file.display());

    let criteria = super::build_criteria(search, method, status)?;

    let har = HarReader::from_file(file)?;
    let filtered = filter_har(&har, &criteria);

    tracing::info!(
        "{} of {} entries matched",
        filtered.log.entries.len(),
        har.log.entries.len()
    );

    if let Some(output_path) = output {
        HarWriter::to_file(&filtered, &output_path)?;
    } else {
        let json = HarWriter::to_string(&filtered)?;
        io::stdout().write_all(json.as_bytes())?;
        io::stdout().write_all(b"\n")?;
    }

    Ok(())
}
