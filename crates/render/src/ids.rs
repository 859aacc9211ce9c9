//! DOM identifier generation for widgets that need a unique element id.

use uuid::Uuid;

/// Source of element ids.
///
/// `ordinal` counts the ids already issued during the current render call,
/// starting at zero, so deterministic implementations can derive stable ids
/// without holding mutable state themselves.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, prefix: &str, ordinal: usize) -> String;
}

/// Globally unique ids (`gallery-0190b8e4…`). Used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIds;

impl IdGenerator for UniqueIds {
    fn generate(&self, prefix: &str, _ordinal: usize) -> String {
        format!("{prefix}-{}", Uuid::now_v7().simple())
    }
}

/// Ids derived only from render order (`gallery-0`, `gallery-1`, …).
///
/// Rendering the same document twice yields identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalIds;

impl IdGenerator for OrdinalIds {
    fn generate(&self, prefix: &str, ordinal: usize) -> String {
        format!("{prefix}-{ordinal}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_ids_are_stable() {
        assert_eq!(OrdinalIds.generate("gallery", 0), "gallery-0");
        assert_eq!(OrdinalIds.generate("gallery", 3), "gallery-3");
    }

    #[test]
    fn unique_ids_differ() {
        let a = UniqueIds.generate("gallery", 0);
        let b = UniqueIds.generate("gallery", 0);
        assert!(a.starts_with("gallery-"));
        assert_ne!(a, b);
    }
}
