use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to one stored entity: model name plus numeric id.
///
/// Used as a map key throughout an export run; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub model: String,
    pub id: u64,
}

impl EntityRef {
    pub fn new(model: impl Into<String>, id: u64) -> Self {
        Self {
            model: model.into(),
            id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.model, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_includes_model_and_id() {
        let entity = EntityRef::new("library.book", 7);
        assert_eq!(entity.to_string(), "library.book(7)");
    }

    #[test]
    fn usable_as_set_key() {
        let mut seen = HashSet::new();
        assert!(seen.insert(EntityRef::new("library.book", 1)));
        assert!(!seen.insert(EntityRef::new("library.book", 1)));
        assert!(seen.insert(EntityRef::new("library.book", 2)));
    }
}
