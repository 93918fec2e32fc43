//! Lock-free holder for the last accepted document.

use crate::document::ConfigDocument;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holds the most recently accepted [`ConfigDocument`].
///
/// Readers get an `Arc` snapshot that stays valid after a later reload
/// swaps in a new document.
#[derive(Debug)]
pub struct DocumentCache {
    document: ArcSwap<ConfigDocument>,
}

impl DocumentCache {
    /// Creates a cache holding `document`.
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            document: ArcSwap::from_pointee(document),
        }
    }

    /// Gets the current document.
    pub fn get(&self) -> Arc<ConfigDocument> {
        self.document.load_full()
    }

    /// Replaces the document and returns the new snapshot.
    pub fn update(&self, document: ConfigDocument) -> Arc<ConfigDocument> {
        let document = Arc::new(document);
        self.document.store(Arc::clone(&document));
        document
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new(ConfigDocument::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_survives_update() {
        let cache = DocumentCache::default();
        let before = cache.get();
        assert!(before.is_empty());

        let mut next = ConfigDocument::new();
        next.insert("port", 9090);
        let stored = cache.update(next.clone());

        assert!(before.is_empty());
        assert_eq!(*stored, next);
        assert_eq!(*cache.get(), next);
    }
}
