//! JSON Lines report formatter

use super::{MatchBlock, MatchContext, ReportFormatter};
use crate::color::NamedColor;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One line of JSON output
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record<'a> {
    Match {
        number: usize,
        chunk: &'a str,
        documents: [DocumentRecord<'a>; 2],
    },
    Summary {
        matches: usize,
    },
}

/// One document's side of a match record
#[derive(Debug, Serialize)]
pub struct DocumentRecord<'a> {
    pub label: &'a str,
    pub chunk: &'a str,
    pub index: usize,
    pub sentence: &'a str,
    pub before: Vec<&'a str>,
    pub after: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<&'a NamedColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'a NamedColor>,
}

impl<'a> DocumentRecord<'a> {
    fn from_side(side: &'a MatchContext<'a>) -> Self {
        Self {
            label: side.label,
            chunk: side.chunk,
            index: side.sentence.index,
            sentence: &side.sentence.text,
            before: side.before.iter().map(|s| s.text.as_str()).collect(),
            after: side.after.iter().map(|s| s.text.as_str()).collect(),
            foreground: side.colors.visible_foreground(),
            background: side.colors.visible_background(),
        }
    }
}

/// JSON formatter - one object per match, then a summary object
pub struct JsonLinesFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesFormatter<W> {
    /// Create a new JSON Lines formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &Record<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ReportFormatter for JsonLinesFormatter<W> {
    fn format_match(&mut self, block: &MatchBlock<'_>) -> Result<()> {
        let record = Record::Match {
            number: block.number,
            chunk: block.chunk,
            documents: [
                DocumentRecord::from_side(&block.first),
                DocumentRecord::from_side(&block.second),
            ],
        };
        self.write_record(&record)
    }

    fn finish(&mut self, total: usize) -> Result<()> {
        self.write_record(&Record::Summary { matches: total })
    }
}
