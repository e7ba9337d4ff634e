//! Verbatim phrase matching between two document drafts
//!
//! This crate finds passages that two documents share word for word, after
//! a light normalization that ignores case, list markers and most
//! punctuation. It is built for comparing drafts of long policy papers
//! extracted from PDF, where a handful of reused five-word phrases is a
//! strong sign that a passage was carried over.
//!
//! # Pipeline
//!
//! - **Sentences**: extracted text is split into sentences ([`text::split_sentences`])
//! - **Chunks**: every sentence is cut into sliding windows of N words ([`chunk`])
//! - **Matching**: normalized chunks shared by both documents are paired,
//!   each sentence at most once ([`matcher`])
//! - **Reports**: accepted matches are rendered with context ([`report`])
//!
//! # Example
//!
//! ```rust
//! use draftmatch_core::{find_matches, Document, MatchConfig};
//!
//! let a = Document::from_text("a.pdf", "Wir stärken die Pflege in allen Bundesländern. Ende.");
//! let b = Document::from_text("b.pdf", "Anfang. Wir stärken die Pflege in allen Regionen.");
//!
//! let matches = find_matches(&a, &b, &MatchConfig::default());
//! assert_eq!(matches.len(), 1);
//! // Keys are visited in sorted order, so the later window wins here.
//! assert_eq!(matches[0].chunk_a, "stärken die Pflege in allen");
//! ```

pub mod chunk;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod matcher;
pub mod report;
pub mod text;

pub use chunk::{Chunk, Chunker};
pub use color::{ColorAnnotation, ColorLookup, ColorNamer, NamedColor, NoColors, PaletteNamer, RawColor, Rgb};
pub use config::{MatchConfig, MatchConfigBuilder};
pub use document::{Document, Sentence};
pub use error::{Error, Result};
pub use matcher::{find_matches, Match, MatchState, MatchStats, Matcher, Matches};
pub use report::{render, ReportFormat, ReportFormatter, ReportRenderer};
pub use text::{normalize, split_sentences, NormalizationMode, Normalizer};
