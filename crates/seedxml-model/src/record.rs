use serde::{Deserialize, Serialize};

use crate::field::FieldSnapshot;

/// One entity's exported field snapshots plus its identity.
///
/// Accumulates fields during traversal only; frozen before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub model: String,
    pub xid: String,
    pub fields: Vec<FieldSnapshot>,
}

impl Record {
    pub fn new(model: impl Into<String>, xid: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            xid: xid.into(),
            fields: Vec::new(),
        }
    }
}

/// One assembled output document for a single model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub model: String,
    /// Suggested file name; persistence stays with the caller.
    pub file_name: String,
    pub content: String,
    pub records: usize,
    /// Reference fields dropped by the forward-reference suppression rule.
    pub suppressed_fields: usize,
}

/// Result of one export run: documents in declaration-safe emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    pub documents: Vec<ExportDocument>,
    /// True when either dependency graph contained a cycle and the order
    /// is best-effort.
    pub cycles_detected: bool,
}

impl ExportOutput {
    pub fn total_records(&self) -> usize {
        self.documents.iter().map(|doc| doc.records).sum()
    }
}
