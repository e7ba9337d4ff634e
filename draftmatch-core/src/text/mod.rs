//! Text preparation: normalization, sentence splitting and glyph tables

pub mod normalizer;
pub mod sentence;
pub mod tables;

pub use normalizer::{collapse_whitespace, normalize, NormalizationMode, Normalizer};
pub use sentence::split_sentences;
