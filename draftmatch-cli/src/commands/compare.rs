//! Compare command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::extract::{ensure_exists, TextExtractor};
use crate::pdf_colors::PdfColorAnnotator;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Parser;
use draftmatch_core::color::{ColorLookup, NoColors};
use draftmatch_core::{
    Document, MatchConfig, Matcher, NormalizationMode, Normalizer, ReportFormat, ReportRenderer,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Arguments for the compare command
#[derive(Debug, Parser)]
#[command(
    name = "compare",
    version,
    about = "Find phrases two PDF drafts share word for word",
    long_about = "Extracts the text of two PDF files, splits it into sentences and reports \
                  every pair of sentences sharing a run of words, with surrounding context."
)]
pub struct CompareArgs {
    /// First PDF file
    #[arg(value_name = "PDF_A")]
    pub first: PathBuf,

    /// Second PDF file
    #[arg(value_name = "PDF_B")]
    pub second: PathBuf,

    /// Report file [default: vergleich_output.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Words per chunk [default: 5]
    #[arg(short = 'n', long, value_name = "WORDS")]
    pub chunk_size: Option<usize>,

    /// Sentences of context around each match [default: 2]
    #[arg(long, value_name = "SENTENCES")]
    pub context: Option<usize>,

    /// Text normalization before comparison
    #[arg(long, value_enum)]
    pub normalization: Option<Normalization>,

    /// Skip text and background color lookup
    #[arg(long)]
    pub no_colors: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Text extraction program [default: pdftotext]
    #[arg(long, value_name = "PROGRAM", env = "DRAFTMATCH_PDFTOTEXT")]
    pub pdftotext: Option<String>,

    /// Keep extracted text files and log color lookup failures
    #[arg(long, env = "DEBUG", value_parser = clap::builder::FalseyValueParser::new())]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text report
    Text,
    /// Markdown sections
    Markdown,
    /// JSON Lines, one object per match
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Markdown => ReportFormat::Markdown,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Supported normalization modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Normalization {
    /// Drop all Latin-1 characters, umlauts included
    Legacy,
    /// Fold accents and keep every letter
    Unicode,
}

impl From<Normalization> for NormalizationMode {
    fn from(mode: Normalization) -> Self {
        match mode {
            Normalization::Legacy => NormalizationMode::Legacy,
            Normalization::Unicode => NormalizationMode::Unicode,
        }
    }
}

/// Settings of one run after merging command line, file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub matching: MatchConfig,
    pub format: ReportFormat,
    pub output: PathBuf,
    pub colors: bool,
    pub extractor: String,
    pub keep_temp_files: bool,
}

impl Settings {
    /// Validate a merged configuration
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let matching = MatchConfig::builder()
            .chunk_size(config.matching.chunk_size)
            .context_sentences(config.matching.context_sentences)
            .normalization(config.matching.normalization.as_str())
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let format = config
            .output
            .format
            .parse::<ReportFormat>()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(Self {
            matching,
            format,
            output: config.output.path.clone(),
            colors: config.output.colors,
            extractor: config.extraction.program.clone(),
            keep_temp_files: config.extraction.keep_temp_files,
        })
    }
}

impl CompareArgs {
    /// Execute the compare command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting comparison");
        log::debug!("Arguments: {:?}", self);

        let config = self.merged_config()?;
        log::debug!("Effective configuration:\n{}", config.to_toml()?);
        let settings = Settings::from_config(&config)?;

        ensure_exists(&self.first)?;
        ensure_exists(&self.second)?;

        let extractor = TextExtractor::new(&settings.extractor, settings.keep_temp_files);
        extractor.check_available()?;
        log::debug!("Extracting text with {}", extractor.program());

        let mut progress = ProgressReporter::new(self.quiet);

        progress.stage("Extrahiere Text aus PDF Dateien...");
        let first = extractor.extract(&self.first)?;
        let second = extractor.extract(&self.second)?;

        progress.stage(&format!("Verarbeite '{}'...", first.label));
        let doc_a = Document::from_text(first.label, &first.text);
        progress.stage(&format!("Verarbeite '{}'...", second.label));
        let doc_b = Document::from_text(second.label, &second.text);
        log::debug!(
            "Split {} sentences from '{}' and {} from '{}'",
            doc_a.len(),
            doc_a.label(),
            doc_b.len(),
            doc_b.label()
        );

        let matcher = Matcher::new(&doc_a, &doc_b, &settings.matching);
        progress.stage(&format!(
            "Vergleiche {} relevante Sätze aus '{}' mit {} relevanten Sätzen aus '{}'...",
            matcher.index_a().len(),
            doc_a.label(),
            matcher.index_b().len(),
            doc_b.label()
        ));

        let file = File::create(&settings.output).with_context(|| {
            format!("Failed to create report file: {}", settings.output.display())
        })?;
        let formatter = settings.format.formatter(BufWriter::new(file));

        let normalizer = Normalizer::new(settings.matching.normalization());
        let mut renderer = ReportRenderer::new(&doc_a, &doc_b, &settings.matching, formatter);
        if settings.colors {
            renderer = renderer.with_colors(
                self.color_lookup(&self.first, normalizer),
                self.color_lookup(&self.second, normalizer),
            );
        }

        progress.stage("Suche nach Übereinstimmungen...");
        progress.start_matching();

        let mut matches = matcher.matches();
        for found in matches.by_ref() {
            log::debug!("Match {}: {}", found.number, found.key);
            renderer
                .render_match(&found)
                .with_context(|| format!("Failed to write {}", settings.output.display()))?;
            progress.match_written(renderer.written());
        }
        let stats = matches.stats();
        let total = renderer
            .finish()
            .with_context(|| format!("Failed to write {}", settings.output.display()))?;
        progress.finish();

        log::debug!("Match statistics: {}", serde_json::to_string(&stats)?);

        progress.stage("\nVergleich abgeschlossen.");
        if total == 0 {
            progress.stage("Keine Übereinstimmungen gefunden.");
        } else {
            progress.stage(&format!("{total} einzigartige Übereinstimmungen gefunden."));
        }
        log::info!("Report written to {}", settings.output.display());

        Ok(())
    }

    /// Configuration file (or defaults) overridden by command line options
    pub fn merged_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(chunk_size) = self.chunk_size {
            config.matching.chunk_size = chunk_size;
        }
        if let Some(context) = self.context {
            config.matching.context_sentences = context;
        }
        if let Some(mode) = self.normalization {
            config.matching.normalization = NormalizationMode::from(mode).name().to_string();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(format) = self.format {
            config.output.format = ReportFormat::from(format).name().to_string();
        }
        if self.no_colors {
            config.output.colors = false;
        }
        if let Some(program) = &self.pdftotext {
            config.extraction.program = program.clone();
        }
        if self.debug {
            config.extraction.keep_temp_files = true;
        }

        Ok(config)
    }

    fn color_lookup(&self, pdf: &Path, normalizer: Normalizer) -> Box<dyn ColorLookup> {
        match PdfColorAnnotator::open(pdf, normalizer, self.debug) {
            Ok(annotator) => Box::new(annotator),
            Err(e) => {
                if self.debug {
                    log::warn!("Colors unavailable for {}: {e:#}", pdf.display());
                }
                Box::new(NoColors)
            }
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match (self.verbose, self.debug) {
            (0, false) => "warn",
            (1, false) => "info",
            (0..=2, _) => "debug",
            _ => "trace",
        };

        if !self.quiet || self.debug {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .context("Failed to initialize logging")?;
        }

        Ok(())
    }
}
