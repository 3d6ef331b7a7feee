//! External identifier string rules.
//!
//! An external identifier (XID) names one entity across export runs. A
//! discovered identifier is used as-is unless it matches a reserved legacy
//! pattern; otherwise one is synthesized as `<model slug>_<suffix>_<id>`,
//! where the suffix records whether the export was anonymized.

use crate::entity::EntityRef;
use crate::options::ExportMode;

/// Substrings marking identifiers left behind by legacy import/export
/// tooling; such identifiers are treated as absent and re-synthesized.
const RESERVED_PATTERNS: [&str; 3] = ["_export", "import_", "base_import"];

const SUFFIXES: [(&str, ExportMode); 2] = [("_auto_", ExportMode::Real), ("_demo_", ExportMode::Demo)];

/// True when a discovered identifier must not be reused.
pub fn is_reserved(xid: &str) -> bool {
    RESERVED_PATTERNS
        .iter()
        .any(|pattern| xid.contains(pattern))
}

/// Model name with dots flattened for use inside identifiers and file names.
pub fn model_slug(model: &str) -> String {
    model.replace('.', "_")
}

/// Build the synthesized identifier for an entity without a usable one.
pub fn synthesize(entity: &EntityRef, mode: ExportMode) -> String {
    format!(
        "{}_{}_{}",
        model_slug(&entity.model),
        mode.xid_suffix(),
        entity.id
    )
}

/// Recover `(entity, mode)` from a synthesized identifier.
///
/// Returns `None` for identifiers this crate did not synthesize. The model
/// slug is mapped back by turning every underscore into a dot, which is
/// lossy for model names containing literal underscores; callers resolving
/// a root by identifier should consult the identity registry first.
pub fn parse_synthetic(xid: &str) -> Option<(EntityRef, ExportMode)> {
    for (separator, mode) in SUFFIXES {
        if let Some(position) = xid.rfind(separator) {
            let slug = &xid[..position];
            let tail = &xid[position + separator.len()..];
            if slug.is_empty() {
                continue;
            }
            if let Ok(id) = tail.parse::<u64>() {
                let model = slug.replace('_', ".");
                return Some((EntityRef::new(model, id), mode));
            }
        }
    }
    None
}
