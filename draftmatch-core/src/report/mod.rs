//! Report rendering.
//!
//! Reports are written one match at a time. Every formatter flushes after each
//! block, so a report cut short by an interrupted run still holds every match
//! written so far.

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonLinesFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

use crate::color::{ColorAnnotation, ColorLookup, NoColors};
use crate::config::MatchConfig;
use crate::document::{Document, Sentence};
use crate::error::{Error, Result};
use crate::matcher::Match;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// One document's side of a match block
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    /// Document label
    pub label: &'a str,
    /// Chunk as written in this document
    pub chunk: &'a str,
    /// Sentences before the match, oldest first
    pub before: &'a [Sentence],
    /// The matched sentence
    pub sentence: &'a Sentence,
    /// Sentences after the match
    pub after: &'a [Sentence],
    /// Styling of the chunk in the source PDF
    pub colors: ColorAnnotation,
}

/// Everything a formatter needs to render one match
#[derive(Debug, Clone)]
pub struct MatchBlock<'a> {
    pub number: usize,
    /// Chunk text shown as the match headline
    pub chunk: &'a str,
    pub first: MatchContext<'a>,
    pub second: MatchContext<'a>,
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Write one match block
    fn format_match(&mut self, block: &MatchBlock<'_>) -> Result<()>;

    /// Write the summary for `total` accepted matches and flush
    fn finish(&mut self, total: usize) -> Result<()>;
}

impl<F: ReportFormatter + ?Sized> ReportFormatter for Box<F> {
    fn format_match(&mut self, block: &MatchBlock<'_>) -> Result<()> {
        (**self).format_match(block)
    }

    fn finish(&mut self, total: usize) -> Result<()> {
        (**self).finish(total)
    }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain text report
    #[default]
    Text,
    /// Markdown sections
    Markdown,
    /// One JSON object per line
    Json,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        }
    }

    /// Create a formatter of this format writing to `writer`
    pub fn formatter<'w, W: Write + 'w>(self, writer: W) -> Box<dyn ReportFormatter + 'w> {
        match self {
            ReportFormat::Text => Box::new(TextFormatter::new(writer)),
            ReportFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
            ReportFormat::Json => Box::new(JsonLinesFormatter::new(writer)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" | "jsonl" => Ok(ReportFormat::Json),
            other => Err(Error::Configuration(format!("unknown report format: {other}"))),
        }
    }
}

/// Renders matches of two documents through a formatter
pub struct ReportRenderer<'d, F: ReportFormatter> {
    first: &'d Document,
    second: &'d Document,
    context: usize,
    formatter: F,
    colors_first: Box<dyn ColorLookup + 'd>,
    colors_second: Box<dyn ColorLookup + 'd>,
    written: usize,
}

impl<'d, F: ReportFormatter> ReportRenderer<'d, F> {
    pub fn new(first: &'d Document, second: &'d Document, config: &MatchConfig, formatter: F) -> Self {
        Self {
            first,
            second,
            context: config.context_sentences(),
            formatter,
            colors_first: Box::new(NoColors),
            colors_second: Box::new(NoColors),
            written: 0,
        }
    }

    /// Attach color lookups for the first and second document
    pub fn with_colors(
        mut self,
        first: Box<dyn ColorLookup + 'd>,
        second: Box<dyn ColorLookup + 'd>,
    ) -> Self {
        self.colors_first = first;
        self.colors_second = second;
        self
    }

    /// Number of match blocks written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Render one match.
    ///
    /// Context is taken around the sentence the matcher found, which is the
    /// first sentence containing the chunk. Later sentences with the same text
    /// are never used as the anchor.
    pub fn render_match(&mut self, found: &Match) -> Result<()> {
        let (before_first, after_first) = self.first.context(found.sentence_a.index, self.context);
        let (before_second, after_second) =
            self.second.context(found.sentence_b.index, self.context);

        let block = MatchBlock {
            number: found.number,
            chunk: &found.chunk_a,
            first: MatchContext {
                label: self.first.label(),
                chunk: &found.chunk_a,
                before: before_first,
                sentence: &found.sentence_a,
                after: after_first,
                colors: self.colors_first.lookup_colors(&found.chunk_a),
            },
            second: MatchContext {
                label: self.second.label(),
                chunk: &found.chunk_b,
                before: before_second,
                sentence: &found.sentence_b,
                after: after_second,
                colors: self.colors_second.lookup_colors(&found.chunk_b),
            },
        };

        self.formatter.format_match(&block)?;
        self.written += 1;
        Ok(())
    }

    /// Write the summary and return the number of rendered matches
    pub fn finish(mut self) -> Result<usize> {
        self.formatter.finish(self.written)?;
        Ok(self.written)
    }
}

/// Render all matches and the summary in one go
pub fn render<F, I>(
    matches: I,
    first: &Document,
    second: &Document,
    config: &MatchConfig,
    formatter: F,
) -> Result<usize>
where
    F: ReportFormatter,
    I: IntoIterator<Item = Match>,
{
    let mut renderer = ReportRenderer::new(first, second, config, formatter);
    for found in matches {
        renderer.render_match(&found)?;
    }
    renderer.finish()
}
