//! In-memory fixture store.
//!
//! Backs the CLI and the test suites with a real storage/identity
//! collaborator, deserialized from a single JSON document describing
//! models, field metadata, entity values and registered external ids.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use seedxml_model::{EntityRef, FieldKind, FieldMeta, RawValue};
use serde::{Deserialize, Serialize};

use crate::traits::{EntityStore, FieldPair, IdentityRegistry, Result, StoreError};

/// Serialized fixture document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    /// Model name to definition; field order is preserved.
    pub models: IndexMap<String, ModelDef>,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub external_ids: Vec<ExternalIdDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDef {
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub related_model: Option<String>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub audit: bool,
    /// Declared default, compared against current values during export.
    #[serde(default)]
    pub default: RawValue,
    /// Reads of this field are denied, standing in for the access
    /// collaborator of a real deployment.
    #[serde(default)]
    pub restricted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    pub model: String,
    pub id: u64,
    #[serde(default)]
    pub values: HashMap<String, RawValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIdDef {
    pub model: String,
    pub id: u64,
    pub xid: String,
}

/// Fixture-backed implementation of the storage and identity collaborators.
#[derive(Debug, Default)]
pub struct MemoryStore {
    metas: IndexMap<String, Vec<FieldMeta>>,
    defaults: HashMap<String, HashMap<String, RawValue>>,
    restricted: HashMap<String, HashSet<String>>,
    values: HashMap<EntityRef, HashMap<String, RawValue>>,
    external_ids: HashMap<EntityRef, String>,
    reverse_ids: HashMap<String, EntityRef>,
}

impl MemoryStore {
    pub fn from_fixture(fixture: Fixture) -> Self {
        let mut store = Self::default();
        for (model, def) in fixture.models {
            let mut metas = Vec::with_capacity(def.fields.len());
            let mut defaults = HashMap::new();
            let mut restricted = HashSet::new();
            for field in def.fields {
                metas.push(FieldMeta {
                    name: field.name.clone(),
                    kind: field.kind,
                    related_model: field.related_model,
                    computed: field.computed,
                    audit: field.audit,
                });
                defaults.insert(field.name.clone(), field.default);
                if field.restricted {
                    restricted.insert(field.name);
                }
            }
            store.metas.insert(model.clone(), metas);
            store.defaults.insert(model.clone(), defaults);
            store.restricted.insert(model, restricted);
        }
        for entity in fixture.entities {
            store
                .values
                .insert(EntityRef::new(entity.model, entity.id), entity.values);
        }
        for external in fixture.external_ids {
            let entity = EntityRef::new(external.model, external.id);
            store.reverse_ids.insert(external.xid.clone(), entity.clone());
            store.external_ids.insert(entity, external.xid);
        }
        store
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        Ok(Self::from_fixture(fixture))
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.metas.keys().map(String::as_str)
    }

    pub fn field_count(&self, model: &str) -> usize {
        self.metas.get(model).map_or(0, Vec::len)
    }

    pub fn entity_count(&self, model: &str) -> usize {
        self.values.keys().filter(|key| key.model == model).count()
    }
}

impl EntityStore for MemoryStore {
    fn model_exists(&self, model: &str) -> bool {
        self.metas.contains_key(model)
    }

    fn entity_exists(&self, entity: &EntityRef) -> bool {
        self.values.contains_key(entity)
    }

    fn field_meta(&self, model: &str) -> Result<&[FieldMeta]> {
        self.metas
            .get(model)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::UnknownModel(model.to_string()))
    }

    fn field_value(&self, entity: &EntityRef, field: &str) -> Result<FieldPair> {
        let defaults = self
            .defaults
            .get(&entity.model)
            .ok_or_else(|| StoreError::UnknownModel(entity.model.clone()))?;
        let default = defaults
            .get(field)
            .cloned()
            .ok_or_else(|| StoreError::UnknownField {
                model: entity.model.clone(),
                field: field.to_string(),
            })?;
        if self
            .restricted
            .get(&entity.model)
            .is_some_and(|fields| fields.contains(field))
        {
            return Err(StoreError::AccessDenied {
                entity: entity.clone(),
                field: field.to_string(),
            });
        }
        let current = self
            .values
            .get(entity)
            .and_then(|values| values.get(field))
            .cloned()
            .unwrap_or(RawValue::Null);
        Ok(FieldPair { current, default })
    }
}

impl IdentityRegistry for MemoryStore {
    fn external_id(&self, entity: &EntityRef) -> Option<String> {
        self.external_ids.get(entity).cloned()
    }

    fn resolve_external_id(&self, xid: &str) -> Option<EntityRef> {
        self.reverse_ids.get(xid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
    {
        "models": {
            "library.book": {
                "fields": [
                    {"name": "title", "kind": "scalar"},
                    {"name": "page_count", "kind": "scalar", "default": 0},
                    {"name": "author_id", "kind": "many_to_one", "related_model": "library.author"},
                    {"name": "isbn", "kind": "scalar", "restricted": true},
                    {"name": "created_by", "kind": "many_to_one", "related_model": "library.user", "audit": true}
                ]
            },
            "library.author": {
                "fields": [
                    {"name": "name", "kind": "scalar"}
                ]
            }
        },
        "entities": [
            {"model": "library.book", "id": 1, "values": {"title": "Dune", "page_count": 412, "author_id": [3], "isbn": "0441013597"}},
            {"model": "library.author", "id": 3, "values": {"name": "Frank Herbert"}}
        ],
        "external_ids": [
            {"model": "library.author", "id": 3, "xid": "authors.frank_herbert"}
        ]
    }
    "#;

    #[test]
    fn loads_models_in_declared_order() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let names: Vec<&str> = store.model_names().collect();
        assert_eq!(names, vec!["library.book", "library.author"]);
        let meta = store.field_meta("library.book").unwrap();
        assert_eq!(meta[0].name, "title");
        assert_eq!(meta[2].related_model.as_deref(), Some("library.author"));
        assert!(meta[4].audit);
    }

    #[test]
    fn field_values_come_with_declared_defaults() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let book = EntityRef::new("library.book", 1);
        let pair = store.field_value(&book, "page_count").unwrap();
        assert_eq!(pair.current, RawValue::Int(412));
        assert_eq!(pair.default, RawValue::Int(0));
        // Absent values read as null.
        let author = EntityRef::new("library.author", 3);
        let pair = store.field_value(&author, "name").unwrap();
        assert_eq!(pair.current, RawValue::Text("Frank Herbert".to_string()));
        assert_eq!(pair.default, RawValue::Null);
    }

    #[test]
    fn restricted_fields_are_denied() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let book = EntityRef::new("library.book", 1);
        let err = store.field_value(&book, "isbn").unwrap_err();
        assert!(matches!(err, StoreError::AccessDenied { .. }));
    }

    #[test]
    fn unknown_lookups_error() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        assert!(matches!(
            store.field_meta("library.shelf").unwrap_err(),
            StoreError::UnknownModel(_)
        ));
        let book = EntityRef::new("library.book", 1);
        assert!(matches!(
            store.field_value(&book, "missing").unwrap_err(),
            StoreError::UnknownField { .. }
        ));
    }

    #[test]
    fn identity_lookups_work_both_ways() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let author = EntityRef::new("library.author", 3);
        assert_eq!(
            store.external_id(&author).as_deref(),
            Some("authors.frank_herbert")
        );
        assert_eq!(
            store.resolve_external_id("authors.frank_herbert"),
            Some(author)
        );
        assert_eq!(store.external_id(&EntityRef::new("library.book", 1)), None);
    }
}
