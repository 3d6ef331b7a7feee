//! Core data model for dependency-ordered seed-data exports: entity
//! references, field kinds and values, record snapshots, export options and
//! external identifier rules.

pub mod entity;
pub mod field;
pub mod options;
pub mod record;
pub mod xid;

pub use entity::EntityRef;
pub use field::{FieldKind, FieldMeta, FieldSnapshot, RawValue, SnapshotValue, is_default, should_skip};
pub use options::{
    AccessPolicy, DuplicatePolicy, ExportMode, ExportOptions, RECOMMENDED_MAX_DEPTH,
};
pub use record::{ExportDocument, ExportOutput, Record};
