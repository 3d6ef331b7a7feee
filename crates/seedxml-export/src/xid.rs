//! External-ID allocation per visited entity.

use seedxml_model::{DuplicatePolicy, EntityRef, ExportOptions, xid};
use seedxml_store::IdentityRegistry;

/// Outcome of identifier allocation for one visited entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Allocation {
    /// The entity is declared by this export under the given identifier.
    Emit(String),
    /// The entity already has a stable identifier elsewhere; it may be
    /// referenced but is not re-declared.
    Reference(String),
}

impl Allocation {
    pub fn into_xid(self) -> String {
        match self {
            Allocation::Emit(xid) | Allocation::Reference(xid) => xid,
        }
    }
}

/// Decide the identifier for an entity at a given traversal position.
///
/// Pure in its inputs, so the same entity always yields the same
/// identifier within one run; the dependency graphs rely on that.
/// Discovered identifiers matching a reserved legacy pattern are treated
/// as absent. An already-identified entity visited beyond the first hop
/// under [`DuplicatePolicy::Skip`] is assumed exported elsewhere.
pub(crate) fn allocate<I: IdentityRegistry>(
    identity: &I,
    options: &ExportOptions,
    entity: &EntityRef,
    depth: u32,
    is_direct_child: bool,
) -> Allocation {
    let stable = identity
        .external_id(entity)
        .filter(|existing| !xid::is_reserved(existing));
    match stable {
        Some(existing)
            if options.duplicates == DuplicatePolicy::Skip && depth > 0 && !is_direct_child =>
        {
            Allocation::Reference(existing)
        }
        Some(existing) => Allocation::Emit(existing),
        None => Allocation::Emit(xid::synthesize(entity, options.mode)),
    }
}
