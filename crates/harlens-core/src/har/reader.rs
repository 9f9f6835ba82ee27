use super::types::Har;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

pub struct HarReader;

impl HarReader {
    /// Read and parse a HAR capture from the given path
    pub fn from_file(path: &Path) -> Result<Har> {
        tracing::debug!("Reading HAR capture from: {}", path.display());

        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a HAR capture from a JSON string
    ///
    /// Invalid JSON is `Error::MalformedJson`; valid JSON that is not shaped
    /// like a HAR log (no `log.entries` array) is `Error::SchemaViolation`.
    /// Anything with a `log.entries` array parses: unknown fields are ignored
    /// and missing fields fall back to defaults.
    pub fn from_str(content: &str) -> Result<Har> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(Error::MalformedJson)?;

        let har: Har = serde_json::from_value(value)
            .map_err(|e| Error::SchemaViolation(e.to_string()))?;

        tracing::info!("Parsed HAR capture with {} entries", har.log.entries.len());

        Ok(har)
    }
}
