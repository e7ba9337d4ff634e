//! Cross-document chunk matching.
//!
//! Both documents are indexed by normalized chunk. Document A's keys are then
//! walked in sorted order and every key shared with document B becomes a
//! candidate. A candidate is accepted when
//!
//! - both original chunks still normalize to the same text,
//! - each original chunk is found in a sentence of its document, and
//! - neither of those sentences, nor a sentence with the same text in either
//!   document, belongs to an earlier match.
//!
//! Matches therefore come out in key order, not in document order, and the
//! first candidate to claim a sentence keeps it.

mod index;
mod state;

pub use index::ChunkIndex;
pub use state::{MatchState, MatchStats};

use crate::chunk::Chunker;
use crate::config::MatchConfig;
use crate::document::{Document, Sentence};
use crate::text::Normalizer;
use serde::Serialize;
use std::collections::btree_map;

/// An accepted pairing of one sentence per document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// 1-based sequence number
    pub number: usize,
    /// Normalized chunk shared by both documents
    pub key: String,
    /// Matched chunk as written in document A
    pub chunk_a: String,
    /// Matched chunk as written in document B
    pub chunk_b: String,
    /// Sentence of document A containing the chunk
    pub sentence_a: Sentence,
    /// Sentence of document B containing the chunk
    pub sentence_b: Sentence,
}

/// Chunk matcher for a pair of documents
#[derive(Debug)]
pub struct Matcher<'a> {
    doc_a: &'a Document,
    doc_b: &'a Document,
    index_a: ChunkIndex,
    index_b: ChunkIndex,
    normalizer: Normalizer,
}

impl<'a> Matcher<'a> {
    /// Index both documents
    pub fn new(doc_a: &'a Document, doc_b: &'a Document, config: &MatchConfig) -> Self {
        let normalizer = Normalizer::new(config.normalization());
        let chunker = Chunker::new(config.chunk_size(), normalizer);

        Self {
            doc_a,
            doc_b,
            index_a: ChunkIndex::build(doc_a, &chunker),
            index_b: ChunkIndex::build(doc_b, &chunker),
            normalizer,
        }
    }

    pub fn index_a(&self) -> &ChunkIndex {
        &self.index_a
    }

    pub fn index_b(&self) -> &ChunkIndex {
        &self.index_b
    }

    /// Iterate matches with fresh state
    pub fn matches(&self) -> Matches<'_, 'a> {
        self.matches_with_state(MatchState::new())
    }

    /// Iterate matches, continuing from existing state
    pub fn matches_with_state(&self, state: MatchState) -> Matches<'_, 'a> {
        Matches {
            matcher: self,
            keys: self.index_a.sorted_keys(),
            state,
        }
    }

    fn evaluate(&self, key: &str, state: &mut MatchState) -> Option<Match> {
        let chunk_b = self.index_b.get(key)?;
        if !state.consume(key) {
            return None;
        }
        state.stats_mut().candidates += 1;

        let chunk_a = self.index_a.get(key)?;
        if self.normalizer.normalize(chunk_a) != self.normalizer.normalize(chunk_b) {
            state.stats_mut().skipped_mismatch += 1;
            return None;
        }

        let (Some(sentence_a), Some(sentence_b)) = (
            self.doc_a.find_containing(chunk_a),
            self.doc_b.find_containing(chunk_b),
        ) else {
            state.stats_mut().skipped_missing += 1;
            return None;
        };

        if state.is_used(sentence_a, sentence_b) {
            state.stats_mut().skipped_used += 1;
            return None;
        }

        let number = state.accept(sentence_a, sentence_b);
        Some(Match {
            number,
            key: key.to_string(),
            chunk_a: chunk_a.to_string(),
            chunk_b: chunk_b.to_string(),
            sentence_a: sentence_a.clone(),
            sentence_b: sentence_b.clone(),
        })
    }
}

/// Lazy iterator over accepted matches
pub struct Matches<'m, 'a> {
    matcher: &'m Matcher<'a>,
    keys: btree_map::Keys<'m, String, String>,
    state: MatchState,
}

impl Matches<'_, '_> {
    /// State accumulated so far
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn stats(&self) -> MatchStats {
        self.state.stats()
    }

    pub fn into_state(self) -> MatchState {
        self.state
    }
}

impl Iterator for Matches<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        for key in self.keys.by_ref() {
            if let Some(found) = self.matcher.evaluate(key, &mut self.state) {
                return Some(found);
            }
        }
        None
    }
}

/// Collect all matches between two documents
pub fn find_matches(doc_a: &Document, doc_b: &Document, config: &MatchConfig) -> Vec<Match> {
    Matcher::new(doc_a, doc_b, config).matches().collect()
}
