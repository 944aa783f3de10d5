//! Serializable settings for the decoration and storage subsystems.
//!
//! Hosts pass user configuration in as JSON; every field has a default so a
//! partial (or empty) object is valid.
//!
//! # Example
//!
//! ```
//! use labeled_bookmarks::{LineEndLabelStyle, RulerLane, Settings};
//!
//! let settings = Settings::from_json(
//!     r#"{ "decoration": { "overviewRulerLane": "right", "lineEndLabelStyle": "inverse" } }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.decoration.overview_ruler_lane, Some(RulerLane::Right));
//! assert_eq!(settings.decoration.line_end_label_style, LineEndLabelStyle::Inverse);
//! assert_eq!(settings.storage.slot, "");
//! ```

use serde::{Deserialize, Serialize};

use crate::decoration::{LineEndLabelStyle, RulerLane};

/// Settings of the icon cache and its decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct DecorationSettings {
    /// Lane for overview-ruler marks. `None` disables the marks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview_ruler_lane: Option<RulerLane>,

    /// Style of end-of-line labels (`bordered`, `inverse`, anything else hides them).
    #[serde(default)]
    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub line_end_label_style: LineEndLabelStyle,
}

/// Settings of the bookmark storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StorageSettings {
    /// Storage partition. Empty selects the default slot.
    #[serde(default)]
    pub slot: String,
}

/// All settings of the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Settings {
    #[serde(default)]
    pub decoration: DecorationSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoration(mut self, decoration: DecorationSettings) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.storage.slot = slot.into();
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
