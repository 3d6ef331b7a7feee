use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type tag, driving both traversal and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain value: integer, float or text.
    Scalar,
    /// Boolean flag; bypasses the emptiness-skip rule.
    Boolean,
    /// Single reference to another entity.
    ManyToOne,
    /// Inverse aggregate side of a relation; traversed but never rendered.
    OneToMany,
    /// Reference set pointing at several entities.
    ManyToMany,
    /// Raw binary payload; excluded from exports.
    Binary,
}

impl FieldKind {
    /// Returns true for the kinds whose value is a list of entity ids.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            FieldKind::ManyToOne | FieldKind::OneToMany | FieldKind::ManyToMany
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Boolean => "boolean",
            FieldKind::ManyToOne => "many_to_one",
            FieldKind::OneToMany => "one_to_many",
            FieldKind::ManyToMany => "many_to_many",
            FieldKind::Binary => "binary",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A plain field value as the storage collaborator hands it over.
///
/// Relational fields carry the numeric ids of their targets; the related
/// model name lives in [`FieldMeta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Ids(Vec<u64>),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Null
    }
}

impl RawValue {
    /// Type-specific falsiness: null, zero numbers, empty text and empty
    /// id lists count as empty. Booleans are never empty; whether a false
    /// flag is kept is decided per field kind, not per value.
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Bool(_) => false,
            RawValue::Int(value) => *value == 0,
            RawValue::Float(value) => *value == 0.0,
            RawValue::Text(text) => text.is_empty(),
            RawValue::Ids(ids) => ids.is_empty(),
        }
    }
}

/// Compare a current value against the field's declared default using plain
/// values only, decoupled from any live record.
pub fn is_default(current: &RawValue, default: &RawValue) -> bool {
    current == default
}

/// Decide whether a field is left out of the export entirely.
///
/// A value equal to its declared default is always dropped. Everything
/// except booleans is additionally dropped when empty.
pub fn should_skip(kind: FieldKind, current: &RawValue, default: &RawValue) -> bool {
    if kind != FieldKind::Boolean && current.is_empty() {
        return true;
    }
    is_default(current, default)
}

/// Field metadata as reported by the storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    pub kind: FieldKind,
    /// Target model for relational kinds.
    #[serde(default)]
    pub related_model: Option<String>,
    /// Derived on read; never part of seed data.
    #[serde(default)]
    pub computed: bool,
    /// Creation/modification actor or timestamp bookkeeping.
    #[serde(default)]
    pub audit: bool,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            related_model: None,
            computed: false,
            audit: false,
        }
    }

    #[must_use]
    pub fn with_related_model(mut self, model: impl Into<String>) -> Self {
        self.related_model = Some(model.into());
        self
    }
}

/// Rendered value of one field snapshot.
///
/// Reference kinds hold the external identifiers of their targets, filled
/// in only after those entities were assigned identifiers themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotValue {
    Scalar(RawValue),
    Refs(Vec<String>),
}

/// One field of one record, frozen once traversal created it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub name: String,
    pub kind: FieldKind,
    pub value: SnapshotValue,
    pub related_model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_false_is_not_empty() {
        assert!(!RawValue::Bool(false).is_empty());
    }

    #[test]
    fn falsiness_per_type() {
        assert!(RawValue::Null.is_empty());
        assert!(RawValue::Int(0).is_empty());
        assert!(RawValue::Float(0.0).is_empty());
        assert!(RawValue::Text(String::new()).is_empty());
        assert!(RawValue::Ids(vec![]).is_empty());
        assert!(!RawValue::Int(3).is_empty());
        assert!(!RawValue::Text("x".to_string()).is_empty());
        assert!(!RawValue::Ids(vec![1]).is_empty());
    }

    #[test]
    fn skip_rules() {
        // Empty non-boolean values are dropped.
        assert!(should_skip(
            FieldKind::Scalar,
            &RawValue::Text(String::new()),
            &RawValue::Null
        ));
        // A false boolean survives as long as it differs from its default.
        assert!(!should_skip(
            FieldKind::Boolean,
            &RawValue::Bool(false),
            &RawValue::Null
        ));
        // Default-equal values are dropped regardless of kind.
        assert!(should_skip(
            FieldKind::Boolean,
            &RawValue::Bool(true),
            &RawValue::Bool(true)
        ));
        assert!(should_skip(
            FieldKind::Scalar,
            &RawValue::Text("draft".to_string()),
            &RawValue::Text("draft".to_string())
        ));
        assert!(!should_skip(
            FieldKind::Scalar,
            &RawValue::Int(5),
            &RawValue::Null
        ));
    }

    #[test]
    fn raw_value_parses_untagged_json() {
        let parsed: Vec<RawValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "name", [1, 2]]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                RawValue::Null,
                RawValue::Bool(true),
                RawValue::Int(3),
                RawValue::Float(2.5),
                RawValue::Text("name".to_string()),
                RawValue::Ids(vec![1, 2]),
            ]
        );
    }
}
