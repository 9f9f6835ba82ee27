use super::types::Har;
use crate::{Error, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct HarWriter;

impl HarWriter {
    /// Write a HAR capture to a file
    pub fn to_file(har: &Har, path: &Path) -> Result<()> {
        tracing::debug!("Writing HAR capture to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, har).map_err(Error::Serialize)?;

        tracing::info!(
            "Wrote HAR capture with {} entries to {}",
            har.log.entries.len(),
            path.display()
        );

        Ok(())
    }

    /// Convert a HAR capture to a pretty-printed JSON string
    pub fn to_string(har: &Har) -> Result<String> {
        serde_json::to_string_pretty(har).map_err(Error::Serialize)
    }

    /// Convert a HAR capture to a compact JSON string
    pub fn to_string_compact(har: &Har) -> Result<String> {
        serde_json::to_string(har).map_err(Error::Serialize)
    }
}
