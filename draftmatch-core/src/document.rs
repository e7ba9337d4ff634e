//! Documents as ordered sentence sequences

use crate::text::split_sentences;
use serde::Serialize;

/// A sentence with its position in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// Zero-based position within the document
    pub index: usize,
    /// Original text, casing and punctuation preserved
    pub text: String,
}

/// An extracted document, split into sentences once and never modified
#[derive(Debug, Clone)]
pub struct Document {
    label: String,
    sentences: Vec<Sentence>,
}

impl Document {
    /// Split raw extracted text into a document
    pub fn from_text(label: impl Into<String>, text: &str) -> Self {
        Self::from_sentences(label, split_sentences(text))
    }

    /// Build a document from already split sentences
    pub fn from_sentences<I, S>(label: impl Into<String>, sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sentences = sentences
            .into_iter()
            .map(Into::into)
            .filter(|text: &String| !text.trim().is_empty())
            .enumerate()
            .map(|(index, text)| Sentence { index, text })
            .collect();

        Self {
            label: label.into(),
            sentences,
        }
    }

    /// Display label used in reports
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    /// First sentence containing `needle` as a substring
    pub fn find_containing(&self, needle: &str) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.text.contains(needle))
    }

    /// Sentences around `index`, clipped at both document ends
    pub fn context(&self, index: usize, width: usize) -> (&[Sentence], &[Sentence]) {
        if index >= self.sentences.len() {
            return (&[], &[]);
        }

        let start = index.saturating_sub(width);
        let end = index
            .saturating_add(width)
            .saturating_add(1)
            .min(self.sentences.len());

        (&self.sentences[start..index], &self.sentences[index + 1..end])
    }
}
