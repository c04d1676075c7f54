//! Memoizing edition loader.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::cards::{Edition, EditionId, EditionRecord};

use super::error::LoadError;
use super::source::EditionSource;

/// Loads editions through an `EditionSource` and keeps every successful load.
///
/// The cache lives as long as the loader and is never invalidated; the set of
/// editions is small and fixed. Failed loads are not cached, so calling `load`
/// again retries the fetch.
///
/// ## Example
///
/// ```
/// use rap_memory::cards::EditionId;
/// use rap_memory::loader::{EditionLoader, MemorySource};
///
/// let json = r#"{"edition": "Producers", "cards": [
///     {"id": "dre", "name": "Dr. Dre", "image": "img/dre.jpg"}
/// ]}"#;
/// let source = MemorySource::new().with_document(EditionId::Producers.data_ref(), json);
/// let mut loader = EditionLoader::new(source);
///
/// let first = loader.load(EditionId::Producers).unwrap();
/// let second = loader.load(EditionId::Producers).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(loader.source().fetch_count(), 1);
/// ```
#[derive(Debug)]
pub struct EditionLoader<S> {
    source: S,
    cache: FxHashMap<EditionId, Arc<Edition>>,
}

impl<S: EditionSource> EditionLoader<S> {
    /// Create a loader with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: FxHashMap::default(),
        }
    }

    /// Load an edition, fetching it only on the first successful call.
    pub fn load(&mut self, id: EditionId) -> Result<Arc<Edition>, LoadError> {
        if let Some(edition) = self.cache.get(&id) {
            debug!(edition = %id, "edition cache hit");
            return Ok(Arc::clone(edition));
        }

        let reference = id.data_ref();
        let edition = self.fetch_and_parse(id, reference).map_err(|e| {
            warn!(edition = %id, error = %e, "edition load failed");
            e
        })?;

        info!(edition = %id, cards = edition.pair_count(), "edition loaded");
        let edition = Arc::new(edition);
        self.cache.insert(id, Arc::clone(&edition));
        Ok(edition)
    }

    fn fetch_and_parse(&self, id: EditionId, reference: &str) -> Result<Edition, LoadError> {
        let body = self.source.fetch(reference)?;

        let record: EditionRecord =
            serde_json::from_str(&body).map_err(|source| LoadError::Malformed {
                reference: reference.to_string(),
                source,
            })?;

        Edition::from_record(id, record).map_err(|source| LoadError::Invalid {
            reference: reference.to_string(),
            source,
        })
    }

    /// Check whether an edition is cached.
    #[must_use]
    pub fn is_cached(&self, id: EditionId) -> bool {
        self.cache.contains_key(&id)
    }

    /// Number of cached editions.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// The underlying source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
