//! Per-model document assembly.

use std::collections::HashMap;

use indexmap::IndexMap;
use seedxml_model::Record;

use crate::format::{INDENT, render_field};

pub(crate) struct AssembledDocument {
    pub content: String,
    pub records: usize,
    pub suppressed_fields: usize,
}

/// Assemble one model's document: its records in resolved declaration
/// order, one blank line apart, wrapped in the fixed envelope.
pub(crate) fn assemble(
    model: &str,
    bucket: &IndexMap<String, Record>,
    record_order: &[String],
    type_index: &HashMap<String, usize>,
) -> AssembledDocument {
    let mut blocks = Vec::with_capacity(bucket.len());
    let mut suppressed = 0usize;
    for xid in record_order {
        let Some(record) = bucket.get(xid) else {
            continue;
        };
        let mut lines = Vec::with_capacity(record.fields.len() + 2);
        lines.push(format!(
            "{INDENT}<record id=\"{}\" model=\"{}\">",
            record.xid, record.model
        ));
        for field in &record.fields {
            match render_field(field, model, type_index) {
                Some(line) => lines.push(line),
                None => suppressed += 1,
            }
        }
        lines.push(format!("{INDENT}</record>"));
        blocks.push(lines.join("\n"));
    }
    let records = blocks.len();
    let content = format!(
        "<?xml version=\"1.0\" ?>\n<data>\n{}\n</data>\n",
        blocks.join("\n\n")
    );
    AssembledDocument {
        content,
        records,
        suppressed_fields: suppressed,
    }
}
