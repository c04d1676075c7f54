//! Edition sources: where edition files come from.
//!
//! The loader only needs "fetch this reference, give me the text". Hosts plug
//! in whatever transport they have; the crate ships an in-memory source and a
//! directory-backed one.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::error::LoadError;

/// Fetch-by-reference capability.
pub trait EditionSource {
    /// Retrieve the raw edition document for `reference`.
    fn fetch(&self, reference: &str) -> Result<String, LoadError>;
}

impl<S: EditionSource + ?Sized> EditionSource for &S {
    fn fetch(&self, reference: &str) -> Result<String, LoadError> {
        (**self).fetch(reference)
    }
}

impl<S: EditionSource + ?Sized> EditionSource for Box<S> {
    fn fetch(&self, reference: &str) -> Result<String, LoadError> {
        (**self).fetch(reference)
    }
}

/// In-memory documents keyed by reference. Counts fetches.
///
/// ```
/// use rap_memory::loader::{EditionSource, MemorySource};
///
/// let source = MemorySource::new().with_document("data/a.json", "{}");
/// assert_eq!(source.fetch("data/a.json").unwrap(), "{}");
/// assert!(source.fetch("data/b.json").is_err());
/// assert_eq!(source.fetch_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: FxHashMap<String, String>,
    fetches: Cell<usize>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder pattern).
    #[must_use]
    pub fn with_document(mut self, reference: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(reference, body);
        self
    }

    /// Add or replace a document.
    pub fn insert(&mut self, reference: impl Into<String>, body: impl Into<String>) {
        self.documents.insert(reference.into(), body.into());
    }

    /// Remove a document, making its reference unreachable.
    pub fn remove(&mut self, reference: &str) -> Option<String> {
        self.documents.remove(reference)
    }

    /// Number of fetches attempted, successful or not.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl EditionSource for MemorySource {
    fn fetch(&self, reference: &str) -> Result<String, LoadError> {
        self.fetches.set(self.fetches.get() + 1);
        self.documents
            .get(reference)
            .cloned()
            .ok_or_else(|| LoadError::Unreachable {
                reference: reference.to_string(),
                reason: "no such document".to_string(),
            })
    }
}

/// Edition files under a root directory, addressed by relative path.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serve files relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EditionSource for DirSource {
    fn fetch(&self, reference: &str) -> Result<String, LoadError> {
        let path = self.root.join(reference);
        std::fs::read_to_string(&path).map_err(|e| LoadError::Unreachable {
            reference: reference.to_string(),
            reason: format!("{}: {e}", path.display()),
        })
    }
}
