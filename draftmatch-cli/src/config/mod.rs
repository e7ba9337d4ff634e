//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use draftmatch_core::config::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default report file name
pub const DEFAULT_OUTPUT: &str = "vergleich_output.txt";

/// Default text extraction program
pub const DEFAULT_EXTRACTOR: &str = "pdftotext";

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Matching configuration
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Matching-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    /// Words per chunk
    pub chunk_size: usize,

    /// Context sentences on each side of a match
    pub context_sentences: usize,

    /// Normalization mode ("legacy" or "unicode")
    pub normalization: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            context_sentences: defaults::CONTEXT_SENTENCES,
            normalization: "legacy".to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Report file path
    pub path: PathBuf,

    /// Report format ("text", "markdown" or "json")
    pub format: String,

    /// Annotate matches with text and background colors
    pub colors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            format: "text".to_string(),
            colors: true,
        }
    }
}

/// Extraction-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Program invoked as `<program> -layout -enc UTF-8 <pdf> <txt>`
    pub program: String,

    /// Keep extracted text files after the run
    pub keep_temp_files: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_EXTRACTOR.to_string(),
            keep_temp_files: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.message().to_string()))?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
