use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read capture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    MalformedJson(serde_json::Error),

    #[error("Not a HAR capture: {0}")]
    SchemaViolation(String),

    #[error("Failed to serialize capture: {0}")]
    Serialize(serde_json::Error),

    #[error("No entry at index {0}")]
    EntryNotFound(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
