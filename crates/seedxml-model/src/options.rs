//! Configuration options for an export run.

use serde::{Deserialize, Serialize};

/// Recursion depth beyond which related-record fan-out tends to explode;
/// front ends warn when a caller goes past it.
pub const RECOMMENDED_MAX_DEPTH: u32 = 2;

/// Whether text values are exported literally or anonymized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// Export real data.
    #[default]
    Real,
    /// Substitute text scalars with demo values.
    Demo,
}

impl ExportMode {
    /// Infix used in synthesized external identifiers.
    pub fn xid_suffix(&self) -> &'static str {
        match self {
            ExportMode::Real => "auto",
            ExportMode::Demo => "demo",
        }
    }
}

/// What to do with entities that already carry a stable external identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Beyond the first hop, reference such entities without re-emitting
    /// them; they are assumed already exported elsewhere.
    #[default]
    Skip,
    /// Emit every visited entity regardless of existing identifiers.
    Emit,
}

/// How a denied field read is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPolicy {
    /// A denied read aborts the whole export.
    #[default]
    Strict,
    /// A denied read drops the field and continues.
    Lenient,
}

/// Options controlling one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// How many levels of related records to follow beyond the root.
    pub max_depth: u32,
    pub mode: ExportMode,
    pub duplicates: DuplicatePolicy,
    pub access: AccessPolicy,
    /// Field names excluded from the export on top of the built-in
    /// identifier/audit exclusions.
    pub field_denylist: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_depth: 0,
            mode: ExportMode::default(),
            duplicates: DuplicatePolicy::default(),
            access: AccessPolicy::default(),
            field_denylist: Vec::new(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    #[must_use]
    pub fn with_access(mut self, policy: AccessPolicy) -> Self {
        self.access = policy;
        self
    }

    #[must_use]
    pub fn with_field_denylist(mut self, fields: Vec<String>) -> Self {
        self.field_denylist = fields;
        self
    }
}
