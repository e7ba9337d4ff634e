//! Configuration for chunk matching and report context

use crate::error::Error;
use crate::text::NormalizationMode;
use std::str::FromStr;

/// Default configuration constants
pub mod defaults {
    /// Words per chunk
    pub const CHUNK_SIZE: usize = 5;

    /// Sentences shown before and after a matched sentence
    pub const CONTEXT_SENTENCES: usize = 2;
}

/// Matching configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub(crate) chunk_size: usize,
    pub(crate) context_sentences: usize,
    pub(crate) normalization: NormalizationMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            context_sentences: defaults::CONTEXT_SENTENCES,
            normalization: NormalizationMode::default(),
        }
    }
}

impl MatchConfig {
    /// Create a configuration builder
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }

    /// Number of words per chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of context sentences on each side of a match
    pub fn context_sentences(&self) -> usize {
        self.context_sentences
    }

    /// Normalization mode used for chunk keys
    pub fn normalization(&self) -> NormalizationMode {
        self.normalization
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.chunk_size == 0 {
            return Err(Error::Configuration(
                "chunk_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`MatchConfig`]
#[derive(Debug, Default)]
pub struct MatchConfigBuilder {
    chunk_size: Option<usize>,
    context_sentences: Option<usize>,
    normalization: Option<String>,
}

impl MatchConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of words per chunk
    pub fn chunk_size(mut self, words: usize) -> Self {
        self.chunk_size = Some(words);
        self
    }

    /// Set the number of context sentences shown on each side
    pub fn context_sentences(mut self, count: usize) -> Self {
        self.context_sentences = Some(count);
        self
    }

    /// Set the normalization mode by name (`legacy` or `unicode`)
    pub fn normalization(mut self, mode: impl Into<String>) -> Self {
        self.normalization = Some(mode.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MatchConfig, Error> {
        let mut config = MatchConfig::default();

        if let Some(words) = self.chunk_size {
            config.chunk_size = words;
        }

        if let Some(count) = self.context_sentences {
            config.context_sentences = count;
        }

        if let Some(mode) = self.normalization {
            config.normalization = NormalizationMode::from_str(&mode)?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.chunk_size(), 5);
        assert_eq!(config.context_sentences(), 2);
        assert_eq!(config.normalization(), NormalizationMode::Legacy);
    }

    #[test]
    fn test_builder_overrides() {
        let config = MatchConfig::builder()
            .chunk_size(7)
            .context_sentences(0)
            .normalization("unicode")
            .build()
            .unwrap();

        assert_eq!(config.chunk_size(), 7);
        assert_eq!(config.context_sentences(), 0);
        assert_eq!(config.normalization(), NormalizationMode::Unicode);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = MatchConfig::builder().chunk_size(0).build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_unknown_normalization_rejected() {
        let result = MatchConfig::builder().normalization("fuzzy").build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("fuzzy"));
    }
}
