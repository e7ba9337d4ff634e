//! Plain text report formatter

use super::{MatchBlock, MatchContext, ReportFormatter};
use crate::error::Result;
use std::io::Write;

const RULE: &str = "-------------------";
const MARKER: &str = ">>> ";
const INDENT: &str = "    ";

/// Plain text formatter - the German comparison report
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colors(&mut self, side: &MatchContext<'_>) -> Result<()> {
        if let Some(color) = side.colors.visible_foreground() {
            writeln!(self.writer, "Textfarbe in '{}': {}", side.label, color)?;
        }
        if let Some(color) = side.colors.visible_background() {
            writeln!(self.writer, "Hintergrundfarbe in '{}': {}", side.label, color)?;
        }
        Ok(())
    }

    fn write_context(&mut self, side: &MatchContext<'_>) -> Result<()> {
        writeln!(self.writer, "Kontext aus '{}':", side.label)?;
        writeln!(self.writer, "{RULE}")?;
        for sentence in side.before {
            writeln!(self.writer, "{INDENT}{}", sentence.text)?;
        }
        writeln!(self.writer, "{MARKER}{}", side.sentence.text)?;
        for sentence in side.after {
            writeln!(self.writer, "{INDENT}{}", sentence.text)?;
        }
        Ok(())
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn format_match(&mut self, block: &MatchBlock<'_>) -> Result<()> {
        writeln!(self.writer, "=== Übereinstimmung {} ===", block.number)?;
        writeln!(self.writer, "Gefundener Übereinstimmender Text:")?;
        writeln!(self.writer, "{MARKER}{}", block.chunk)?;
        self.write_colors(&block.first)?;
        self.write_colors(&block.second)?;
        writeln!(self.writer)?;

        self.write_context(&block.first)?;
        writeln!(self.writer)?;
        self.write_context(&block.second)?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;

        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self, total: usize) -> Result<()> {
        if total == 0 {
            writeln!(self.writer, "Keine Übereinstimmungen gefunden.")?;
        } else {
            writeln!(self.writer, "{total} einzigartige Übereinstimmungen gefunden.")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
