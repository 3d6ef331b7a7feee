//! Collaborator seams the export engine talks to.

use seedxml_model::{EntityRef, FieldMeta, RawValue};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown model {0}")]
    UnknownModel(String),
    #[error("unknown field {field} on model {model}")]
    UnknownField { model: String, field: String },
    #[error("access denied reading {field} on {entity}")]
    AccessDenied { entity: EntityRef, field: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Current and declared-default value of one field on one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPair {
    pub current: RawValue,
    pub default: RawValue,
}

/// Arbitrary key-value lookup per entity with type metadata.
pub trait EntityStore {
    fn model_exists(&self, model: &str) -> bool;

    fn entity_exists(&self, entity: &EntityRef) -> bool;

    /// Field metadata for a model, in its declared field order.
    fn field_meta(&self, model: &str) -> Result<&[FieldMeta]>;

    /// Read one field. May refuse with [`StoreError::AccessDenied`]; the
    /// caller's access policy decides whether that aborts the export.
    fn field_value(&self, entity: &EntityRef, field: &str) -> Result<FieldPair>;
}

/// Registry mapping entities to their pre-existing stable identifiers.
pub trait IdentityRegistry {
    /// The registered identifier for an entity, if any.
    fn external_id(&self, entity: &EntityRef) -> Option<String>;

    /// Reverse lookup, used to address an export root by identifier.
    fn resolve_external_id(&self, xid: &str) -> Option<EntityRef>;
}
