//! Sentence splitting for extracted PDF text.
//!
//! Layout-preserving extraction breaks lines wherever the PDF did, so line
//! breaks carry no meaning here. The whole document is treated as a single
//! stream and boundaries come from punctuation alone:
//!
//! 1. Bullet glyphs and `". X"` (terminator, space, uppercase letter) become
//!    split points.
//! 2. Candidates that do not end in `.`, `!` or `?` are merged with the next
//!    candidate, so a split point only becomes a boundary once punctuation
//!    seals it.

use super::normalizer::collapse_whitespace;
use super::tables::{ends_with_terminator, is_bullet};
use regex::Regex;
use std::sync::OnceLock;

static SENTENCE_END: OnceLock<Regex> = OnceLock::new();

fn sentence_end() -> &'static Regex {
    SENTENCE_END.get_or_init(|| {
        Regex::new(r"([.!?]) ([A-ZÄÖÜẞ])").expect("sentence end pattern is valid")
    })
}

/// Split raw text into sentences.
///
/// Returned sentences are trimmed, never empty, and keep their original
/// casing and punctuation. A trailing fragment without terminal punctuation
/// is still returned as the last sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let joined = collapse_whitespace(&text.lines().collect::<Vec<_>>().join(" "));

    let mut marked = String::with_capacity(joined.len() + 16);
    for ch in joined.chars() {
        if is_bullet(ch) {
            marked.push('\n');
        }
        marked.push(ch);
    }
    let marked = sentence_end().replace_all(&marked, "$1\n$2");

    let mut sentences = Vec::new();
    let mut current = String::new();

    for candidate in marked.split('\n').map(str::trim) {
        if candidate.is_empty() {
            continue;
        }

        if !current.is_empty() && !ends_with_terminator(&current) {
            current.push(' ');
            current.push_str(candidate);
        } else {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            current.push_str(candidate);
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}
