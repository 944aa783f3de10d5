//! SVG templates for the gutter glyphs.
//!
//! Every template is 32x32 and filled with [`COLOR_TOKEN`]. Templates with a
//! text slot cut the glyph character out of the shape through a mask; the
//! character is written as [`TEXT_SLOT`] and replaced at render time.

use super::ShapeKind;

/// Placeholder fill color, replaced by the normalized bookmark color.
pub const COLOR_TOKEN: &str = "888888ff";

/// Placeholder text node content, replaced by a numeric character reference.
pub const TEXT_SLOT: &str = ">Q<";

const BOOKMARK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<path d="M7 30 L7 5 Q7 2 10 2 L22 2 Q25 2 25 5 L25 30 L16 23 Z" fill="#888888ff" />
</svg>"##;

const BOOKMARK_WITH_TEXT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<mask id="x">
    <rect width="32" height="32" fill="white" x="0" y="0" />
    <text x="16" y="18" text-anchor="middle" fill="black"
        style="font-size: 16; font-family: sans-serif; alignment-baseline: bottom; font-weight:bold;">Q</text>
</mask>
<path mask="url(#x)" d="M7 30 L7 5 Q7 2 10 2 L22 2 Q25 2 25 5 L25 30 L16 23 Z" fill="#888888ff" />
</svg>"##;

const CIRCLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<circle cx="16" cy="16" r="12" fill="#888888ff" />
</svg>"##;

const CIRCLE_WITH_TEXT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<mask id="x">
    <rect width="32" height="32" fill="white" x="0" y="0" />
    <text x="16" y="21.5" text-anchor="middle" fill="black"
        style="font-size: 16; font-family: sans-serif; alignment-baseline: bottom; font-weight:bold;">Q</text>
</mask>
<circle mask="url(#x)" cx="16" cy="16" r="12" fill="#888888ff" />
</svg>"##;

const HEART: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<path fill="#888888ff"
    d="M16 8 C16 8 16 4 21 4 C24 4 28 5 28 10 C28 18 17 27 16 28 C15 27 4 18 4 10C4 5 8 4 11 4 C16 4  16 8 16 8" />
</svg>"##;

const HEART_WITH_TEXT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<mask id="x">
    <rect width="32" height="32" fill="white" x="0" y="0" />
    <text x="16" y="20" text-anchor="middle" fill="black"
        style="font-size: 14; font-family: sans-serif; alignment-baseline:bottom; font-weight:bold;">Q</text>
</mask>
<path mask="url(#x)" fill="#888888ff"
    d="M16 8 C16 8 16 4 21 4 C24 4 28 5 28 10 C28 18 17 27 16 28 C15 27 4 18 4 10C4 5 8 4 11 4 C16 4  16 8 16 8" />
</svg>"##;

const LABEL: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<path fill="#888888ff"
    d="M4 7 L24 7 L28 16 L24 25 L4 25 Z" />
</svg>"##;

const LABEL_WITH_TEXT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<mask id="x">
    <rect width="32" height="32" fill="white" x="0" y="0" />
    <text x="15" y="21.5" text-anchor="middle" fill="black"
        style="font-size: 16; font-family: sans-serif; alignment-baseline: bottom; font-weight:bold;">Q</text>
</mask>
<path mask="url(#x)" fill="#888888ff" d="M4 7 L24 7 L28 16 L24 25 L4 25 Z" />
</svg>"##;

const STAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<path fill="#888888ff"
    d="M16 2 L20.70 9.52 L29.31 11.67 L23.60 18.47 L24.22 27.32 L16 24 L7.77 27.32 L8.39 18.47 L2.68 11.67 L11.29 9.52 Z" />
</svg>"##;

const STAR_WITH_TEXT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<mask id="x">
    <rect width="32" height="32" fill="white" x="0" y="0" />
    <text x="16" y="21" text-anchor="middle" fill="black"
        style="font-size: 14; font-family: sans-serif; alignment-baseline:bottom; font-weight:bold;">Q</text>
</mask>
<path mask="url(#x)" fill="#888888ff"
    d="M16 2 L20.70 9.52 L29.31 11.67 L23.60 18.47 L24.22 27.32 L16 24 L7.77 27.32 L8.39 18.47 L2.68 11.67 L11.29 9.52 Z" />
</svg>"##;

const UNICODE_WITH_TEXT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32">
<text x="16" y="18" text-anchor="middle" fill="#888888ff"
    style="font-size: 26; alignment-baseline:middle;">Q</text>
</svg>"##;

/// Template drawn when a shape has nothing to show.
pub const FALLBACK: &str = BOOKMARK;

/// Returns the plain template of a shape, or `None` if the shape can only be
/// drawn with a character.
pub fn plain(shape: ShapeKind) -> Option<&'static str> {
    match shape {
        ShapeKind::Bookmark => Some(BOOKMARK),
        ShapeKind::Circle => Some(CIRCLE),
        ShapeKind::Heart => Some(HEART),
        ShapeKind::Label => Some(LABEL),
        ShapeKind::Star => Some(STAR),
        ShapeKind::Unicode => None,
    }
}

/// Returns the template of a shape that carries a text slot.
pub fn with_text(shape: ShapeKind) -> &'static str {
    match shape {
        ShapeKind::Bookmark => BOOKMARK_WITH_TEXT,
        ShapeKind::Circle => CIRCLE_WITH_TEXT,
        ShapeKind::Heart => HEART_WITH_TEXT,
        ShapeKind::Label => LABEL_WITH_TEXT,
        ShapeKind::Star => STAR_WITH_TEXT,
        ShapeKind::Unicode => UNICODE_WITH_TEXT,
    }
}
