//! Mutable bookkeeping for one matching run

use crate::document::Sentence;
use serde::Serialize;
use std::collections::HashSet;

/// Counters describing how candidates were handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Keys present in both documents
    pub candidates: usize,
    /// Candidates turned into matches
    pub accepted: usize,
    /// Original chunks that no longer normalize to the same text
    pub skipped_mismatch: usize,
    /// Original chunk not found in any sentence
    pub skipped_missing: usize,
    /// A sentence already belonged to an earlier match
    pub skipped_used: usize,
}

/// Consumed keys and used sentences of a matching run.
///
/// A sentence is used once its index in its own document, or its text in
/// either document, belongs to a match. A verbatim copy of a matched sentence
/// therefore cannot be claimed by a later match from the other side.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    consumed: HashSet<String>,
    used_a: HashSet<usize>,
    used_b: HashSet<usize>,
    used_texts: HashSet<String>,
    stats: MatchStats,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key consumed; returns false if it already was
    pub fn consume(&mut self, key: &str) -> bool {
        if self.consumed.contains(key) {
            return false;
        }
        self.consumed.insert(key.to_string())
    }

    #[cfg(test)]
    pub(crate) fn is_consumed(&self, key: &str) -> bool {
        self.consumed.contains(key)
    }

    /// True if either sentence already belongs to a match
    pub fn is_used(&self, sentence_a: &Sentence, sentence_b: &Sentence) -> bool {
        self.used_a.contains(&sentence_a.index)
            || self.used_b.contains(&sentence_b.index)
            || self.used_texts.contains(&sentence_a.text)
            || self.used_texts.contains(&sentence_b.text)
    }

    /// Record an accepted pair and return its 1-based match number
    pub fn accept(&mut self, sentence_a: &Sentence, sentence_b: &Sentence) -> usize {
        self.used_a.insert(sentence_a.index);
        self.used_b.insert(sentence_b.index);
        self.used_texts.insert(sentence_a.text.clone());
        self.used_texts.insert(sentence_b.text.clone());
        self.stats.accepted += 1;
        self.stats.accepted
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut MatchStats {
        &mut self.stats
    }
}
