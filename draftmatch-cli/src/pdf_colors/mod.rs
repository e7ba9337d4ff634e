//! Text and background colors of phrases in a PDF
//!
//! Pages are interpreted once when the annotator is opened. A lookup finds the
//! first place where the phrase's opening words were drawn, then reports the
//! fill color of that text and the smallest non-white rectangle behind it.

pub mod interpreter;

pub use interpreter::{FilledShape, Interpreter, PageLayout, Rect, TextRun};

use crate::error::CliError;
use anyhow::Result;
use draftmatch_core::color::{ColorAnnotation, ColorLookup, ColorNamer, NamedColor, PaletteNamer};
use draftmatch_core::{Normalizer, RawColor};
use lopdf::content::Content;
use lopdf::Document;
use std::path::Path;

/// Words of the phrase used to locate it on the page
const SEARCH_WORDS: usize = 3;

/// Where a phrase was found
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Zero-based page position
    pub page: usize,
    pub bbox: Rect,
    pub fill: Option<RawColor>,
}

/// Color lookup backed by the interpreted pages of one PDF
pub struct PdfColorAnnotator {
    label: String,
    pages: Vec<PageLayout>,
    normalizer: Normalizer,
    namer: Box<dyn ColorNamer>,
    debug: bool,
}

impl PdfColorAnnotator {
    /// Load and interpret every page of a PDF
    pub fn open(path: &Path, normalizer: Normalizer, debug: bool) -> Result<Self> {
        let document = Document::load(path)
            .map_err(|e| CliError::ColorLookup(format!("{}: {e}", path.display())))?;

        let mut pages = Vec::new();
        for (number, page_id) in document.get_pages() {
            let layout = document
                .get_page_content(page_id)
                .and_then(|data| Content::decode(&data))
                .map(|content| Interpreter::new().run(&content.operations));

            match layout {
                Ok(layout) => pages.push(layout),
                Err(e) => {
                    log::debug!("Skipping page {number} of {}: {e}", path.display());
                    pages.push(PageLayout::default());
                }
            }
        }

        log::debug!("Interpreted {} pages of {}", pages.len(), path.display());
        Ok(Self::from_pages(
            crate::extract::display_label(path),
            pages,
            normalizer,
            debug,
        ))
    }

    /// Build an annotator from already interpreted pages
    pub fn from_pages(
        label: impl Into<String>,
        pages: Vec<PageLayout>,
        normalizer: Normalizer,
        debug: bool,
    ) -> Self {
        Self {
            label: label.into(),
            pages,
            normalizer,
            namer: Box::new(PaletteNamer::default()),
            debug,
        }
    }

    /// Replace the color naming strategy
    pub fn with_namer(mut self, namer: Box<dyn ColorNamer>) -> Self {
        self.namer = namer;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Locate the first occurrence of a phrase's opening words
    pub fn locate(&self, phrase: &str) -> Option<Location> {
        let normalized = self.normalizer.normalize(phrase);
        let needle = normalized
            .split_whitespace()
            .take(SEARCH_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        if needle.is_empty() {
            return None;
        }

        self.pages
            .iter()
            .enumerate()
            .find_map(|(page, layout)| {
                self.locate_on_page(layout, &needle)
                    .map(|(bbox, fill)| Location { page, bbox, fill })
            })
    }

    fn locate_on_page(&self, layout: &PageLayout, needle: &str) -> Option<(Rect, Option<RawColor>)> {
        let mut haystack = String::new();
        let mut starts = Vec::new();
        for (index, run) in layout.runs.iter().enumerate() {
            let text = self.normalizer.normalize(&run.text);
            if text.is_empty() {
                continue;
            }
            starts.push((haystack.len(), index));
            haystack.push_str(&text);
            haystack.push(' ');
        }

        let begin = haystack.find(needle)?;
        let end = begin + needle.len();

        let covered: Vec<&TextRun> = starts
            .iter()
            .enumerate()
            .filter(|(i, (start, _))| {
                let next = starts.get(i + 1).map_or(haystack.len(), |(s, _)| *s);
                *start < end && next > begin
            })
            .map(|(_, (_, index))| &layout.runs[*index])
            .collect();

        let first = covered.first()?;
        let bbox = covered
            .iter()
            .skip(1)
            .fold(first.bbox, |acc, run| acc.union(&run.bbox));
        Some((bbox, first.fill))
    }

    /// Color of the smallest non-white filled rectangle overlapping `bbox`.
    ///
    /// A rectangle in an unread color space still counts as the background,
    /// it just has no color to report.
    fn background(&self, page: usize, bbox: &Rect) -> Option<RawColor> {
        self.pages
            .get(page)?
            .shapes
            .iter()
            .filter(|shape| {
                shape.rect.intersects(bbox)
                    && !shape.fill.is_some_and(|fill| fill.to_rgb().is_white())
            })
            .min_by(|a, b| a.rect.area().total_cmp(&b.rect.area()))
            .and_then(|shape| shape.fill)
    }
}

impl ColorLookup for PdfColorAnnotator {
    fn lookup_colors(&mut self, text: &str) -> ColorAnnotation {
        let Some(location) = self.locate(text) else {
            if self.debug {
                log::warn!("Text not found in '{}': {text}", self.label);
            }
            return ColorAnnotation::default();
        };

        log::trace!(
            "Found '{text}' in '{}' on page {} at {:?}",
            self.label,
            location.page + 1,
            location.bbox
        );

        ColorAnnotation {
            foreground: location
                .fill
                .map(|fill| NamedColor::from_raw(fill, self.namer.as_ref())),
            background: self
                .background(location.page, &location.bbox)
                .map(|fill| NamedColor::from_raw(fill, self.namer.as_ref())),
        }
    }
}
