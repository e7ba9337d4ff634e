//! Sliding word windows over a sentence

use crate::config::defaults;
use crate::text::Normalizer;

/// A window of consecutive words in original and normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub original: String,
    pub normalized: String,
}

/// Produces fixed-width chunks from sentences
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    size: usize,
    normalizer: Normalizer,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(defaults::CHUNK_SIZE, Normalizer::default())
    }
}

impl Chunker {
    pub fn new(size: usize, normalizer: Normalizer) -> Self {
        Self { size, normalizer }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// All windows of `size` words in the sentence.
    ///
    /// The normalized window is taken at the same token index from the
    /// normalized sentence. Normalization may drop whole tokens (a leading
    /// bullet, a lone parenthesis), in which case the pair no longer covers the
    /// same words; the matcher re-validates every pair before accepting it.
    /// Near the end of such a sentence the normalized window may be short or
    /// empty.
    pub fn chunks(&self, sentence: &str) -> Vec<Chunk> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if self.size == 0 || words.len() < self.size {
            return Vec::new();
        }

        let normalized = self.normalizer.normalize(sentence);
        let norm_words: Vec<&str> = normalized.split_whitespace().collect();

        (0..=words.len() - self.size)
            .map(|i| {
                let norm_start = i.min(norm_words.len());
                let norm_end = (i + self.size).min(norm_words.len());
                Chunk {
                    original: words[i..i + self.size].join(" "),
                    normalized: norm_words[norm_start..norm_end].join(" "),
                }
            })
            .collect()
    }
}

/// Chunk a sentence with the legacy normalizer
pub fn chunks(sentence: &str, size: usize) -> Vec<Chunk> {
    Chunker::new(size, Normalizer::default()).chunks(sentence)
}
