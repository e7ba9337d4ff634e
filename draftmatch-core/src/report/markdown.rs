//! Markdown report formatter

use super::{MatchBlock, MatchContext, ReportFormatter};
use crate::error::Result;
use std::io::Write;

/// Markdown formatter - one section per match, context as block quotes
pub struct MarkdownFormatter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_side(&mut self, side: &MatchContext<'_>) -> Result<()> {
        writeln!(self.writer, "### Kontext aus `{}`", side.label)?;
        writeln!(self.writer)?;
        for sentence in side.before {
            writeln!(self.writer, "> {}", sentence.text)?;
        }
        writeln!(self.writer, "> **{}**", side.sentence.text)?;
        for sentence in side.after {
            writeln!(self.writer, "> {}", sentence.text)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportFormatter for MarkdownFormatter<W> {
    fn format_match(&mut self, block: &MatchBlock<'_>) -> Result<()> {
        writeln!(self.writer, "## Übereinstimmung {}", block.number)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "`{}`", block.chunk)?;
        writeln!(self.writer)?;

        for side in [&block.first, &block.second] {
            if let Some(color) = side.colors.visible_foreground() {
                writeln!(self.writer, "- Textfarbe in `{}`: {}", side.label, color)?;
            }
            if let Some(color) = side.colors.visible_background() {
                writeln!(self.writer, "- Hintergrundfarbe in `{}`: {}", side.label, color)?;
            }
        }
        if block.first.colors.is_visible() || block.second.colors.is_visible() {
            writeln!(self.writer)?;
        }

        self.write_side(&block.first)?;
        self.write_side(&block.second)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self, total: usize) -> Result<()> {
        writeln!(self.writer, "---")?;
        if total == 0 {
            writeln!(self.writer, "*Keine Übereinstimmungen gefunden.*")?;
        } else {
            writeln!(self.writer, "*{total} einzigartige Übereinstimmungen gefunden.*")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
