//! Text normalization for chunk comparison.
//!
//! The normalized form is only ever used as an equality key. It is never shown
//! to the user; reports always print the original text.

use super::tables::{is_list_marker, DASHES, INVISIBLES, STRIPPED_PUNCTUATION};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How non-ASCII letters are treated before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationMode {
    /// Drop control characters and everything in U+007F..=U+00FF.
    ///
    /// This removes umlauts and `ß` along with the Latin-1 symbols, which keeps
    /// chunk keys identical to reports produced by earlier versions.
    #[default]
    Legacy,
    /// Drop control characters only, then fold diacritics via NFD.
    Unicode,
}

impl NormalizationMode {
    /// Get the mode name
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationMode::Legacy => "legacy",
            NormalizationMode::Unicode => "unicode",
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormalizationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "ascii" => Ok(NormalizationMode::Legacy),
            "unicode" => Ok(NormalizationMode::Unicode),
            other => Err(Error::Configuration(format!(
                "unknown normalization mode: {other}"
            ))),
        }
    }
}

/// Maps raw text to a canonical, whitespace-collapsed comparison key
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    mode: NormalizationMode,
}

impl Normalizer {
    /// Create a normalizer for the given mode
    pub fn new(mode: NormalizationMode) -> Self {
        Self { mode }
    }

    /// Normalize text for comparison.
    ///
    /// Leading markers can be nested (`"1. • Text"`), so the pipeline is
    /// re-applied until the output no longer changes. After the first pass
    /// every change is a deletion, which bounds the loop by the text length.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.pass(text);
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        let filtered: String = text.chars().filter(|&ch| self.keeps(ch)).collect();

        let mut lowered = filtered.to_lowercase();
        if self.mode == NormalizationMode::Unicode {
            lowered = lowered.nfd().filter(|&ch| !is_combining_mark(ch)).collect();
        }

        let folded: String = lowered
            .chars()
            .filter_map(|ch| {
                if DASHES.contains(&ch) {
                    Some('-')
                } else if INVISIBLES.contains(&ch) {
                    None
                } else {
                    Some(ch)
                }
            })
            .collect();

        let collapsed = collapse_whitespace(&folded);
        let unbulleted = strip_leading_marker(&collapsed);

        let unpunctuated: String = unbulleted
            .chars()
            .filter(|ch| !STRIPPED_PUNCTUATION.contains(ch))
            .collect();

        strip_leading_number(&unpunctuated).trim().to_string()
    }

    fn keeps(&self, ch: char) -> bool {
        match self.mode {
            NormalizationMode::Legacy => {
                !matches!(ch, '\u{0}'..='\u{9}' | '\u{B}'..='\u{1F}' | '\u{7F}'..='\u{FF}')
            }
            NormalizationMode::Unicode => !ch.is_control() || ch.is_whitespace(),
        }
    }
}

/// Normalize text with the default (legacy) mode
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

/// Collapse whitespace runs to single spaces and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_leading_marker(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(ch) if is_list_marker(ch) => chars.as_str().trim_start(),
        _ => text,
    }
}

fn strip_leading_number(text: &str) -> &str {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && text[digits..].starts_with('.') {
        &text[digits + 1..]
    } else {
        text
    }
}
