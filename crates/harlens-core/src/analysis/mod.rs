mod summary;

pub use summary::SummaryAnalyzer;

use crate::filter::StatusClass;
use crate::har::Entry;
use serde::Serialize;

/// Aggregate statistics over a set of capture entries
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub total_body_bytes: u64,
    pub average_time: f64,
    pub slowest: Option<SlowestRequest>,
    pub methods: Vec<MethodCount>,
    pub status_classes: Vec<StatusClassCount>,
    pub content_types: Vec<ContentTypeCount>,
}

/// The entry with the largest total time
#[derive(Debug, Clone, Serialize)]
pub struct SlowestRequest {
    pub index: usize,
    pub method: String,
    pub url: String,
    pub status: i64,
    pub time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodCount {
    pub method: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusClassCount {
    pub class: StatusClass,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentTypeCount {
    pub subtype: String,
    pub count: usize,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, entries: &[Entry]) -> crate::Result<Self::Output>;
}
