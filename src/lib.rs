//! labeled-bookmarks: gutter icons and persistence for editor bookmarks
//!
//! This crate provides the core of a labeled-bookmarks editor extension:
//! rendering colored SVG glyphs for bookmarks, caching them as files for the
//! editor gutter, and storing bookmarks and groups in a versioned key-value
//! format.
//!
//! # Decorations
//!
//! ```
//! use labeled_bookmarks::{render_glyph, HexColor, ShapeKind};
//!
//! assert_eq!(HexColor::normalize("#00FF00").as_str(), "00ff00ff");
//!
//! let glyph = render_glyph("star", "#00FF00", "Q");
//! assert_eq!(glyph.shape, ShapeKind::Star);
//! assert_eq!(glyph.file_name(), "star_00ff00ff_81.svg");
//! ```
//!
//! [`IconCache`] writes glyphs into a cache directory once and builds the
//! [`Decoration`] descriptors handed to the editor.
//!
//! # Storage
//!
//! ```
//! use labeled_bookmarks::{BookmarkStorage, MemoryStore, LATEST_FORMAT_VERSION};
//!
//! let mut storage = BookmarkStorage::new(MemoryStore::new(), "");
//! let state = storage.read_storage().unwrap();
//! assert_eq!(state.format_version, LATEST_FORMAT_VERSION);
//! ```

mod color;
pub mod decoration;
mod error;
pub mod glyph;
mod settings;
pub mod storage;

pub use color::HexColor;
pub use decoration::{
    CachedIcon, Decoration, DecorationColor, FileStat, GutterIconSize, IconCache,
    IconFileSystem, LineEndLabel, LineEndLabelStyle, LocalFileSystem, OverviewRuler,
    RangeBehavior, RulerLane,
};
pub use error::{BackendError, CacheError, StorageError, StoredField};
pub use glyph::{render_glyph, GlyphSpec, RenderedGlyph, ShapeKind};
pub use settings::{DecorationSettings, Settings, StorageSettings};
pub use storage::{
    BookmarkStorage, JsonFileStore, KeyValueStore, MemoryStore, SerializableBookmark,
    SerializableGroup, SlotKeys, StoredState, LATEST_FORMAT_VERSION,
};
