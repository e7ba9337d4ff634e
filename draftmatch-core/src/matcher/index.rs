//! Normalized-chunk index of one document

use crate::chunk::Chunker;
use crate::document::Document;
use std::collections::{btree_map, BTreeMap};

/// Maps each normalized chunk to one original chunk of the document.
///
/// When several windows normalize to the same key, the one that appears last
/// in the document wins. Repeated phrasing therefore collapses into a single
/// entry.
#[derive(Debug, Clone, Default)]
pub struct ChunkIndex {
    entries: BTreeMap<String, String>,
}

impl ChunkIndex {
    /// Index every chunk of every sentence in the document
    pub fn build(document: &Document, chunker: &Chunker) -> Self {
        let mut entries = BTreeMap::new();

        for sentence in document.sentences() {
            for chunk in chunker.chunks(&sentence.text) {
                if !chunk.normalized.is_empty() {
                    entries.insert(chunk.normalized, chunk.original);
                }
            }
        }

        Self { entries }
    }

    /// Original chunk text for a normalized key
    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.entries.get(normalized).map(String::as_str)
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.entries.contains_key(normalized)
    }

    /// Normalized keys in lexicographic order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn sorted_keys(&self) -> btree_map::Keys<'_, String, String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
