//! Editor decorations for bookmarked lines.
//!
//! A [`Decoration`] is the descriptor handed to the rendering surface: the
//! gutter icon, an optional overview-ruler mark and an optional end-of-line
//! label. Descriptors serialize to camelCase JSON so hosts can forward them
//! without translation.

mod cache;

pub use cache::{CachedIcon, FileStat, IconCache, IconFileSystem, LocalFileSystem};

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::settings::DecorationSettings;

/// Padding placed on both sides of an end-of-line label (EN SPACE).
pub const LABEL_PADDING: char = '\u{2002}';

/// Margin separating an end-of-line label from the line content.
pub const LABEL_MARGIN: &str = "0px 0px 0px 10px";

/// Theme color used for label text drawn on a bookmark-colored background.
pub const EDITOR_BACKGROUND: &str = "editor.background";

// ============================================================================
// Settings enums
// ============================================================================

/// Overview-ruler lane that bookmark marks are drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum RulerLane {
    Left,
    Center,
    Right,
    Full,
}

impl RulerLane {
    /// The lane as a bit mask, left = 1, center = 2, right = 4.
    pub fn mask(&self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Center => 2,
            Self::Right => 4,
            Self::Full => 7,
        }
    }
}

/// How end-of-line labels are styled.
///
/// Parsing is lenient: any unrecognized setting value turns labels off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LineEndLabelStyle {
    /// Thin border and text in the bookmark color.
    #[default]
    Bordered,
    /// Bookmark-colored background, text in the editor background color.
    Inverse,
    /// No end-of-line label.
    Off,
}

impl LineEndLabelStyle {
    pub fn parse(value: &str) -> Self {
        match value {
            "bordered" => Self::Bordered,
            "inverse" => Self::Inverse,
            _ => Self::Off,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bordered => "bordered",
            Self::Inverse => "inverse",
            Self::Off => "none",
        }
    }
}

impl From<String> for LineEndLabelStyle {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<LineEndLabelStyle> for String {
    fn from(style: LineEndLabelStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for LineEndLabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Decoration descriptor
// ============================================================================

/// How the gutter icon is fitted into the gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GutterIconSize {
    Auto,
    #[default]
    Contain,
    Cover,
}

/// Whether a decoration grows when text is typed at its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RangeBehavior {
    OpenOpen,
    /// Boundaries are inclusive and do not grow on insertion at either edge.
    #[default]
    ClosedClosed,
    OpenClosed,
    ClosedOpen,
}

/// A color in a decoration: either a literal or a reference to a theme color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecorationColor {
    Hex(String),
    Theme { id: String },
}

impl DecorationColor {
    pub fn theme(id: impl Into<String>) -> Self {
        Self::Theme { id: id.into() }
    }
}

impl From<&HexColor> for DecorationColor {
    fn from(color: &HexColor) -> Self {
        Self::Hex(color.to_css())
    }
}

/// Overview-ruler mark of a decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewRuler {
    #[serde(rename = "overviewRulerColor")]
    pub color: String,
    #[serde(rename = "overviewRulerLane")]
    pub lane: RulerLane,
}

/// Styled text appended after the end of the decorated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEndLabel {
    pub content_text: String,
    pub color: DecorationColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub margin: String,
}

impl LineEndLabel {
    /// Builds the label for `text`, or `None` if `style` disables labels.
    pub fn styled(style: LineEndLabelStyle, color: &HexColor, text: &str) -> Option<Self> {
        let content_text = format!("{LABEL_PADDING}{text}{LABEL_PADDING}");
        match style {
            LineEndLabelStyle::Bordered => Some(Self {
                content_text,
                color: color.into(),
                border: Some(format!("1px solid {}", color.to_css())),
                background_color: None,
                margin: LABEL_MARGIN.to_string(),
            }),
            LineEndLabelStyle::Inverse => Some(Self {
                content_text,
                color: DecorationColor::theme(EDITOR_BACKGROUND),
                border: None,
                background_color: Some(color.to_css()),
                margin: LABEL_MARGIN.to_string(),
            }),
            LineEndLabelStyle::Off => None,
        }
    }
}

/// Descriptor of a bookmark decoration, ready for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub gutter_icon_path: PathBuf,
    pub gutter_icon_size: GutterIconSize,
    #[serde(flatten)]
    pub overview_ruler: Option<OverviewRuler>,
    pub range_behavior: RangeBehavior,
    pub is_whole_line: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<LineEndLabel>,
}

impl Decoration {
    /// Builds the decoration of a bookmark whose icon lives at `icon_path`.
    pub fn new(
        icon_path: PathBuf,
        color: &HexColor,
        settings: &DecorationSettings,
        line_label: Option<&str>,
    ) -> Self {
        Self {
            gutter_icon_path: icon_path,
            gutter_icon_size: GutterIconSize::Contain,
            overview_ruler: settings.overview_ruler_lane.map(|lane| OverviewRuler {
                color: color.to_css(),
                lane,
            }),
            range_behavior: RangeBehavior::ClosedClosed,
            is_whole_line: true,
            after: line_label
                .and_then(|text| LineEndLabel::styled(settings.line_end_label_style, color, text)),
        }
    }

    /// Serializes the descriptor for the rendering surface.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
