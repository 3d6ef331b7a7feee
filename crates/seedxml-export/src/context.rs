use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use seedxml_model::{EntityRef, Record};

/// Accumulated traversal state.
///
/// Owned by the top-level export call; recursive steps borrow it mutably.
/// Everything here keeps first-insertion order, which is what makes
/// repeated runs over the same graph byte-identical.
#[derive(Debug, Default)]
pub(crate) struct ExportContext {
    /// Entities whose fields were already read; a re-visit only adds edges.
    pub visited: HashSet<EntityRef>,
    /// Records bucketed by model, keyed by external id within each bucket.
    pub data: IndexMap<String, IndexMap<String, Record>>,
    /// Record-level graph: dependent xid -> the xids it references.
    pub record_edges: IndexMap<String, IndexSet<String>>,
    /// Type-level graph: referenced model -> the models referencing it.
    pub type_edges: IndexMap<String, IndexSet<String>>,
}

impl ExportContext {
    pub fn new() -> Self {
        Self::default()
    }
}
