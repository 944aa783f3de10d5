//! Gutter glyph rendering.
//!
//! A glyph is fully determined by a shape, a color and an optional glyph
//! character. [`render_glyph`] is pure: the same input always yields the same
//! SVG document, which is what lets the icon cache key files by their name
//! alone.
//!
//! # Text Rules
//!
//! - For every shape except [`ShapeKind::Unicode`], the text is kept only if
//!   it is a single ASCII letter, digit, or one of `!?+-=/$%#`. Letters are
//!   upper-cased. Anything else renders the plain shape.
//! - For [`ShapeKind::Unicode`] the text is taken verbatim and its first code
//!   point becomes the glyph.

pub mod raster;
mod templates;

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::color::HexColor;

pub use templates::{COLOR_TOKEN, TEXT_SLOT};

/// Symbols allowed as a glyph character besides ASCII letters and digits.
const GLYPH_SYMBOLS: &str = "!?+-=/$%#";

// ============================================================================
// ShapeKind
// ============================================================================

/// Base shape of a gutter glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ShapeKind {
    #[default]
    Bookmark,
    Circle,
    Heart,
    Label,
    Star,
    /// An arbitrary character drawn in the bookmark color, without a backing shape.
    Unicode,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        Self::Bookmark,
        Self::Circle,
        Self::Heart,
        Self::Label,
        Self::Star,
        Self::Unicode,
    ];

    /// Parses a shape identifier. Identifiers are case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.as_str() == name)
    }

    /// Parses a shape identifier, falling back to [`ShapeKind::Bookmark`].
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bookmark => "bookmark",
            Self::Circle => "circle",
            Self::Heart => "heart",
            Self::Label => "label",
            Self::Star => "star",
            Self::Unicode => "unicode",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GlyphSpec
// ============================================================================

/// The inputs of a glyph after normalization.
///
/// Two requests that normalize to the same spec render byte-identical
/// documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphSpec {
    /// Requested shape (before the fallback for text-less unicode glyphs).
    pub shape: ShapeKind,
    pub color: HexColor,
    /// Effective glyph text; empty when nothing renderable remains.
    pub text: String,
}

impl GlyphSpec {
    /// Normalizes raw user input. Unknown shapes become [`ShapeKind::Bookmark`].
    pub fn new(shape: &str, color: &str, text: &str) -> Self {
        let shape = ShapeKind::parse_or_default(shape);
        Self {
            shape,
            color: HexColor::normalize(color),
            text: effective_text(shape, text),
        }
    }

    /// Renders this spec into an SVG document.
    pub fn render(&self) -> RenderedGlyph {
        let first = self.text.chars().next();

        let (shape, template) = match (first, templates::plain(self.shape)) {
            (Some(_), _) => (self.shape, templates::with_text(self.shape)),
            (None, Some(plain)) => (self.shape, plain),
            // Character-only shapes have nothing to draw without a character.
            (None, None) => (ShapeKind::Bookmark, templates::FALLBACK),
        };

        let (document, key_fragment) = match first {
            Some(c) => {
                let code_point = u32::from(c).to_string();
                let document = template.replacen(TEXT_SLOT, &format!(">&#{code_point};<"), 1);
                (document, code_point)
            }
            None => (template.to_string(), String::new()),
        };

        RenderedGlyph {
            shape,
            color: self.color.clone(),
            document: document.replacen(COLOR_TOKEN, self.color.as_str(), 1),
            key_fragment,
        }
    }
}

/// Applies the text rules of a shape to raw glyph text.
fn effective_text(shape: ShapeKind, text: &str) -> String {
    let text: String = text.nfc().collect();

    if shape == ShapeKind::Unicode {
        return text;
    }

    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() || GLYPH_SYMBOLS.contains(c) => {
            c.to_ascii_uppercase().to_string()
        }
        _ => String::new(),
    }
}

// ============================================================================
// RenderedGlyph
// ============================================================================

/// Output of the glyph renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGlyph {
    /// The shape that was actually drawn.
    ///
    /// Differs from the requested shape when it was unknown, or when a unicode
    /// glyph had no character; cache keys must be built from this value.
    pub shape: ShapeKind,

    pub color: HexColor,

    /// The SVG document.
    pub document: String,

    /// Decimal code point of the glyph character, or empty for plain shapes.
    pub key_fragment: String,
}

impl RenderedGlyph {
    /// Cache file name: `<shape>_<color>_<key fragment>.svg`.
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.svg", self.shape, self.color, self.key_fragment)
    }
}

/// Renders a glyph from raw user input.
///
/// ```
/// use labeled_bookmarks::{render_glyph, ShapeKind};
///
/// let glyph = render_glyph("star", "#00FF00", "q");
/// assert_eq!(glyph.shape, ShapeKind::Star);
/// assert_eq!(glyph.key_fragment, "81");
/// assert!(glyph.document.contains("&#81;"));
/// assert!(glyph.document.contains("00ff00ff"));
///
/// // Unknown shapes fall back to a bookmark.
/// assert_eq!(render_glyph("hexagon", "fff", "").shape, ShapeKind::Bookmark);
/// ```
pub fn render_glyph(shape: &str, color: &str, text: &str) -> RenderedGlyph {
    GlyphSpec::new(shape, color, text).render()
}
