//! Recursive depth-first traversal of an entity and its relations.

use seedxml_model::{
    AccessPolicy, EntityRef, ExportMode, FieldKind, FieldMeta, FieldSnapshot, RawValue, Record,
    SnapshotValue, should_skip,
};
use seedxml_store::{EntityStore, IdentityRegistry, StoreError};
use tracing::{debug, trace, warn};

use crate::Exporter;
use crate::context::ExportContext;
use crate::error::{ExportError, Result};
use crate::xid::{Allocation, allocate};

/// The identifier field is implied by the record wrapper and never exported.
const IDENTIFIER_FIELD: &str = "id";

impl<S: EntityStore, I: IdentityRegistry> Exporter<'_, S, I> {
    /// Walk one batch of entities at the given depth, accumulating records
    /// and dependency edges into the context.
    pub(crate) fn traverse(
        &self,
        entities: &[EntityRef],
        depth: u32,
        ctx: &mut ExportContext,
    ) -> Result<()> {
        if depth > self.options.max_depth {
            return Ok(());
        }
        for entity in entities {
            let allocation = allocate(self.identity, &self.options, entity, depth, depth == 1);
            let xid = match allocation {
                Allocation::Emit(xid) => xid,
                Allocation::Reference(xid) => {
                    debug!(entity = %entity, xid = %xid, "already identified elsewhere, not re-declared");
                    continue;
                }
            };
            if !ctx.visited.insert(entity.clone()) {
                continue;
            }
            debug!(entity = %entity, xid = %xid, depth, "visiting");

            let metas = self.store.field_meta(&entity.model)?;
            let mut record = Record::new(entity.model.clone(), xid.clone());
            let mut dependencies = indexmap::IndexSet::new();
            for meta in metas {
                if !self.exportable(meta) {
                    continue;
                }
                let pair = match self.store.field_value(entity, &meta.name) {
                    Ok(pair) => pair,
                    Err(StoreError::AccessDenied { .. })
                        if self.options.access == AccessPolicy::Lenient =>
                    {
                        warn!(entity = %entity, field = %meta.name, "field omitted: access denied");
                        continue;
                    }
                    Err(error) => return Err(error.into()),
                };
                let current = self.anonymized(entity, meta, pair.current);
                if should_skip(meta.kind, &current, &pair.default) {
                    continue;
                }
                if meta.kind.is_relational() {
                    self.traverse_relation(
                        entity,
                        meta,
                        &current,
                        depth,
                        &mut record,
                        &mut dependencies,
                        ctx,
                    )?;
                } else {
                    trace!(entity = %entity, field = %meta.name, "field captured");
                    record.fields.push(FieldSnapshot {
                        name: meta.name.clone(),
                        kind: meta.kind,
                        value: SnapshotValue::Scalar(current),
                        related_model: None,
                    });
                }
            }
            ctx.record_edges.insert(xid.clone(), dependencies);
            ctx.data
                .entry(entity.model.clone())
                .or_default()
                .insert(xid, record);
        }
        Ok(())
    }

    /// Handle one relational field: allocate target identifiers, record
    /// dependency edges, recurse, then freeze the identifier list.
    #[allow(clippy::too_many_arguments)]
    fn traverse_relation(
        &self,
        entity: &EntityRef,
        meta: &FieldMeta,
        current: &RawValue,
        depth: u32,
        record: &mut Record,
        dependencies: &mut indexmap::IndexSet<String>,
        ctx: &mut ExportContext,
    ) -> Result<()> {
        let related = meta
            .related_model
            .as_deref()
            .ok_or_else(|| ExportError::MissingRelatedModel {
                model: entity.model.clone(),
                field: meta.name.clone(),
            })?;
        let RawValue::Ids(ids) = current else {
            warn!(entity = %entity, field = %meta.name, "relational field without id list, skipped");
            return Ok(());
        };
        let children: Vec<EntityRef> = ids
            .iter()
            .map(|id| EntityRef::new(related.to_string(), *id))
            .collect();
        let mut child_xids = Vec::with_capacity(children.len());
        for child in &children {
            let child_allocation =
                allocate(self.identity, &self.options, child, depth + 1, depth == 0);
            let child_xid = child_allocation.into_xid();
            // The aggregate side is traversed but carries no edges; the
            // inverse relation declares the dependency. Self-loops are
            // never dependencies either.
            if meta.kind != FieldKind::OneToMany && child != entity {
                dependencies.insert(child_xid.clone());
                if related != entity.model {
                    ctx.type_edges
                        .entry(related.to_string())
                        .or_default()
                        .insert(entity.model.clone());
                }
            }
            child_xids.push(child_xid);
        }
        self.traverse(&children, depth + 1, ctx)?;
        if meta.kind != FieldKind::OneToMany {
            record.fields.push(FieldSnapshot {
                name: meta.name.clone(),
                kind: meta.kind,
                value: SnapshotValue::Refs(child_xids),
                related_model: Some(related.to_string()),
            });
        }
        Ok(())
    }

    fn exportable(&self, meta: &FieldMeta) -> bool {
        !(meta.computed
            || meta.audit
            || meta.kind == FieldKind::Binary
            || meta.name == IDENTIFIER_FIELD
            || self.options.field_denylist.contains(&meta.name))
    }

    /// Substitute text scalars in anonymized exports.
    fn anonymized(&self, entity: &EntityRef, meta: &FieldMeta, current: RawValue) -> RawValue {
        if self.options.mode != ExportMode::Demo || meta.kind != FieldKind::Scalar {
            return current;
        }
        match current {
            RawValue::Text(text) if !text.is_empty() => {
                RawValue::Text(self.anonymizer.substitute(&entity.model, &meta.name))
            }
            other => other,
        }
    }
}
