use std::path::PathBuf;

use serde::Serialize;

/// Result of one export command run.
#[derive(Debug, Serialize)]
pub struct ExportReport {
    /// Human-readable description of the export root.
    pub root: String,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub cycles_detected: bool,
    pub documents: Vec<DocumentReport>,
}

#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub model: String,
    pub file_name: String,
    pub records: usize,
    pub suppressed_fields: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Assembled document, kept when nothing was written to disk.
    #[serde(skip)]
    pub content: Option<String>,
}

/// One row of the models listing.
#[derive(Debug, Serialize)]
pub struct ModelRow {
    pub model: String,
    pub fields: usize,
    pub entities: usize,
}
