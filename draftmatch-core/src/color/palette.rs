//! Color naming strategies

use super::Rgb;

/// Turns an RGB value into a human-readable name
pub trait ColorNamer {
    fn name(&self, rgb: &Rgb) -> String;
}

/// A named palette color, components in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub percent: [f32; 3],
}

impl PaletteEntry {
    const fn new(name: &'static str, r: f32, g: f32, b: f32) -> Self {
        Self {
            name,
            percent: [r, g, b],
        }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(
            self.percent[0] / 100.0,
            self.percent[1] / 100.0,
            self.percent[2] / 100.0,
        )
    }
}

/// German color names, including the party colors common in Austrian
/// coalition papers (türkis, rot, pink).
pub const GERMAN_PALETTE: &[PaletteEntry] = &[
    PaletteEntry::new("Schwarz", 0.0, 0.0, 0.0),
    PaletteEntry::new("Weiß", 100.0, 100.0, 100.0),
    PaletteEntry::new("Grau", 50.2, 50.2, 50.2),
    PaletteEntry::new("Hellgrau", 82.7, 82.7, 82.7),
    PaletteEntry::new("Dunkelgrau", 25.1, 25.1, 25.1),
    PaletteEntry::new("Rot", 100.0, 0.0, 0.0),
    PaletteEntry::new("Dunkelrot", 54.5, 0.0, 0.0),
    PaletteEntry::new("Grün", 0.0, 50.2, 0.0),
    PaletteEntry::new("Hellgrün", 56.5, 93.3, 56.5),
    PaletteEntry::new("Leuchtgrün", 0.0, 100.0, 0.0),
    PaletteEntry::new("Olivgrün", 50.2, 50.2, 0.0),
    PaletteEntry::new("Blau", 0.0, 0.0, 100.0),
    PaletteEntry::new("Dunkelblau", 0.0, 0.0, 54.5),
    PaletteEntry::new("Hellblau", 67.8, 84.7, 90.2),
    PaletteEntry::new("Türkis", 25.1, 87.8, 81.6),
    PaletteEntry::new("Cyan", 0.0, 100.0, 100.0),
    PaletteEntry::new("Gelb", 100.0, 100.0, 0.0),
    PaletteEntry::new("Hellgelb", 100.0, 100.0, 60.0),
    PaletteEntry::new("Orange", 100.0, 64.7, 0.0),
    PaletteEntry::new("Braun", 64.7, 16.5, 16.5),
    PaletteEntry::new("Violett", 50.2, 0.0, 50.2),
    PaletteEntry::new("Magenta", 100.0, 0.0, 100.0),
    PaletteEntry::new("Rosa", 100.0, 75.3, 79.6),
    PaletteEntry::new("Pink", 91.0, 25.5, 53.3),
];

/// Nearest palette color, or the hex code when nothing is close enough
#[derive(Debug, Clone)]
pub struct PaletteNamer {
    palette: Vec<PaletteEntry>,
    max_distance: f32,
}

impl Default for PaletteNamer {
    fn default() -> Self {
        Self::new(GERMAN_PALETTE.to_vec(), 25.0)
    }
}

impl PaletteNamer {
    /// `max_distance` is measured in percentage space (0 to about 173)
    pub fn new(palette: Vec<PaletteEntry>, max_distance: f32) -> Self {
        Self {
            palette,
            max_distance,
        }
    }

    /// Closest entry and its distance
    pub fn nearest(&self, rgb: &Rgb) -> Option<(&PaletteEntry, f32)> {
        self.palette
            .iter()
            .map(|entry| (entry, entry.rgb().distance(rgb)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl ColorNamer for PaletteNamer {
    fn name(&self, rgb: &Rgb) -> String {
        match self.nearest(rgb) {
            Some((entry, distance)) if distance <= self.max_distance => entry.name.to_string(),
            _ => rgb.hex(),
        }
    }
}

/// Names every color by its hex code
#[derive(Debug, Clone, Copy, Default)]
pub struct HexNamer;

impl ColorNamer for HexNamer {
    fn name(&self, rgb: &Rgb) -> String {
        rgb.hex()
    }
}
