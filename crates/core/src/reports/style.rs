//! Report presentation settings.
//!
//! A `StyleConfig` is built once at startup and shared read-only between
//! requests.

use cashflow_shared::{ReportConfig, ReportLabels};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the color as `0xRRGGBB`.
    #[must_use]
    pub const fn hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Colors used by the expense report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Text color.
    pub black: Rgb,
    /// Header text and amount cell background.
    pub white: Rgb,
    /// Title cell background.
    pub red_light: Rgb,
    /// Amount header background.
    pub red_dark: Rgb,
    /// Description row background.
    pub green_light: Rgb,
    /// Information row background.
    pub green_dark: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            black: Rgb::new(0x00, 0x00, 0x00),
            white: Rgb::new(0xFF, 0xFF, 0xFF),
            red_light: Rgb::new(0xF5, 0xC2, 0xB6),
            red_dark: Rgb::new(0xD6, 0x49, 0x3C),
            green_light: Rgb::new(0xDF, 0xF0, 0xD8),
            green_dark: Rgb::new(0xA8, 0xD5, 0xBA),
        }
    }
}

/// Logical typefaces referenced by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Bold headings: greeting, expense titles, amount header.
    Heading,
    /// Regular running text.
    Body,
    /// Large bold figures (the month total).
    Display,
    /// Regular table contents.
    Detail,
}

impl FontFace {
    /// Whether the face is drawn bold.
    #[must_use]
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Heading | Self::Display)
    }
}

/// Font family names for each logical face.
///
/// Spreadsheets reference these by name; the PDF backend maps faces to the
/// standard Helvetica faces instead of loading font files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamilies {
    /// Family for [`FontFace::Heading`].
    pub heading: String,
    /// Family for [`FontFace::Body`].
    pub body: String,
    /// Family for [`FontFace::Display`].
    pub display: String,
    /// Family for [`FontFace::Detail`].
    pub detail: String,
}

impl FontFamilies {
    /// Returns the family name for a face.
    #[must_use]
    pub fn name(&self, face: FontFace) -> &str {
        match face {
            FontFace::Heading => &self.heading,
            FontFace::Body => &self.body,
            FontFace::Display => &self.display,
            FontFace::Detail => &self.detail,
        }
    }
}

impl Default for FontFamilies {
    fn default() -> Self {
        Self {
            heading: "Raleway Black".to_string(),
            body: "Raleway".to_string(),
            display: "Work Sans Black".to_string(),
            detail: "Work Sans".to_string(),
        }
    }
}

/// Immutable presentation settings for expense reports.
#[derive(Debug, Clone, Default)]
pub struct StyleConfig {
    /// Author written into document metadata.
    pub author: String,
    /// Greeting line in the header block.
    pub greeting: String,
    /// Report labels.
    pub labels: ReportLabels,
    /// Font families.
    pub fonts: FontFamilies,
    /// Colors.
    pub palette: Palette,
}

impl StyleConfig {
    /// Builds the style from report configuration, with the default fonts and palette.
    #[must_use]
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            author: config.author.clone(),
            greeting: config.greeting.clone(),
            labels: config.labels.clone(),
            fonts: FontFamilies::default(),
            palette: Palette::default(),
        }
    }
}
