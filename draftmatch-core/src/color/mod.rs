//! Color model for report annotations.
//!
//! The PDF side reports raw device colors; [`ColorNamer`] turns them into
//! names. Lookups are behind [`ColorLookup`] so the matcher and the report
//! renderer never depend on how colors were found.

mod palette;

pub use palette::{ColorNamer, HexNamer, PaletteEntry, PaletteNamer, GERMAN_PALETTE};

use serde::Serialize;
use std::fmt;

/// Components at or below this value count as zero for the black check
const BLACK_EPSILON: f32 = 0.005;

/// Color in RGB, each component in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Create a color, clamping each component to `0.0..=1.0`
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
        }
    }

    /// Components as percentages
    pub fn percentages(&self) -> [f32; 3] {
        [self.r * 100.0, self.g * 100.0, self.b * 100.0]
    }

    /// Euclidean distance in percentage space
    pub fn distance(&self, other: &Rgb) -> f32 {
        let [r1, g1, b1] = self.percentages();
        let [r2, g2, b2] = other.percentages();
        ((r1 - r2).powi(2) + (g1 - g2).powi(2) + (b1 - b2).powi(2)).sqrt()
    }

    /// Hex label such as `#1F4D66`
    pub fn hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    pub fn is_black(&self) -> bool {
        self.r <= BLACK_EPSILON && self.g <= BLACK_EPSILON && self.b <= BLACK_EPSILON
    }

    pub fn is_white(&self) -> bool {
        let limit = 1.0 - BLACK_EPSILON;
        self.r >= limit && self.g >= limit && self.b >= limit
    }
}

/// A device color as found in a PDF content stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawColor {
    Gray(f32),
    Rgb(f32, f32, f32),
    Cmyk(f32, f32, f32, f32),
}

impl RawColor {
    /// Interpret operands by count: 1 gray, 3 RGB, 4 CMYK
    pub fn from_components(components: &[f32]) -> Option<Self> {
        match *components {
            [gray] => Some(RawColor::Gray(gray)),
            [r, g, b] => Some(RawColor::Rgb(r, g, b)),
            [c, m, y, k] => Some(RawColor::Cmyk(c, m, y, k)),
            _ => None,
        }
    }

    /// Convert to RGB
    pub fn to_rgb(self) -> Rgb {
        match self {
            RawColor::Gray(gray) => Rgb::new(gray, gray, gray),
            RawColor::Rgb(r, g, b) => Rgb::new(r, g, b),
            RawColor::Cmyk(c, m, y, k) => Rgb::new(
                (1.0 - c) * (1.0 - k),
                (1.0 - m) * (1.0 - k),
                (1.0 - y) * (1.0 - k),
            ),
        }
    }
}

/// A color with its display name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedColor {
    pub name: String,
    pub rgb: Rgb,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    /// Name a raw color with the given strategy
    pub fn from_raw(raw: RawColor, namer: &dyn ColorNamer) -> Self {
        let rgb = raw.to_rgb();
        Self::new(namer.name(&rgb), rgb)
    }

    /// Black carries no information and is left out of reports
    pub fn is_baseline(&self) -> bool {
        self.rgb.is_black()
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Foreground and background color of a text span
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorAnnotation {
    pub foreground: Option<NamedColor>,
    pub background: Option<NamedColor>,
}

impl ColorAnnotation {
    /// Foreground worth showing, if any
    pub fn visible_foreground(&self) -> Option<&NamedColor> {
        self.foreground.as_ref().filter(|c| !c.is_baseline())
    }

    /// Background worth showing, if any
    pub fn visible_background(&self) -> Option<&NamedColor> {
        self.background.as_ref().filter(|c| !c.is_baseline())
    }

    pub fn is_visible(&self) -> bool {
        self.visible_foreground().is_some() || self.visible_background().is_some()
    }
}

/// Looks up the styling of a text span in a source document.
///
/// Implementations must not fail: anything that goes wrong yields an empty
/// annotation.
pub trait ColorLookup {
    fn lookup_colors(&mut self, text: &str) -> ColorAnnotation;
}

/// Lookup used when no styling information is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColors;

impl ColorLookup for NoColors {
    fn lookup_colors(&mut self, _text: &str) -> ColorAnnotation {
        ColorAnnotation::default()
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_byte(value: f32) -> u8 {
    (value * 255.0).round() as u8
}
