//! On-disk cache of rendered gutter icons.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Decoration;
use crate::error::CacheError;
use crate::glyph::{render_glyph, RenderedGlyph};
use crate::settings::DecorationSettings;

// ============================================================================
// File system
// ============================================================================

/// Metadata returned by [`IconFileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
}

/// The file operations the icon cache needs.
pub trait IconFileSystem {
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// [`IconFileSystem`] backed by the local disk.
///
/// Missing parent directories are created on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl IconFileSystem for LocalFileSystem {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path)?;
        Ok(FileStat {
            size: metadata.len(),
        })
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }
}

// ============================================================================
// IconCache
// ============================================================================

/// A glyph materialized in the cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIcon {
    /// File name inside the cache directory; identifies the glyph.
    pub cache_key: String,
    pub path: PathBuf,
}

/// Renders glyphs into a cache directory and builds decorations for them.
///
/// Each distinct (shape, color, glyph text) tuple is written at most once;
/// later requests only stat the existing file. Decorations themselves are not
/// cached, every call returns a fresh descriptor.
///
/// # Example
///
/// ```no_run
/// use labeled_bookmarks::{DecorationSettings, IconCache, LineEndLabelStyle};
///
/// let settings = DecorationSettings {
///     overview_ruler_lane: None,
///     line_end_label_style: LineEndLabelStyle::Bordered,
/// };
/// let cache = IconCache::local("/tmp/bookmark-icons", settings);
///
/// let (decoration, path) = cache.get_decoration("star", "#00FF00", "Q", Some("done"))?;
/// assert!(path.ends_with("star_00ff00ff_81.svg"));
/// # Ok::<(), labeled_bookmarks::CacheError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IconCache<F: IconFileSystem = LocalFileSystem> {
    fs: F,
    cache_dir: PathBuf,
    settings: DecorationSettings,
}

impl IconCache<LocalFileSystem> {
    /// Creates a cache writing to `cache_dir` on the local disk.
    pub fn local(cache_dir: impl Into<PathBuf>, settings: DecorationSettings) -> Self {
        Self::new(LocalFileSystem, cache_dir, settings)
    }
}

impl<F: IconFileSystem> IconCache<F> {
    pub fn new(fs: F, cache_dir: impl Into<PathBuf>, settings: DecorationSettings) -> Self {
        Self {
            fs,
            cache_dir: cache_dir.into(),
            settings,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn settings(&self) -> &DecorationSettings {
        &self.settings
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Makes sure `glyph` exists as a non-empty file in the cache directory.
    ///
    /// A failing stat counts as a cache miss. Only the write can fail.
    pub fn ensure_icon(&self, glyph: &RenderedGlyph) -> Result<CachedIcon, CacheError> {
        let cache_key = glyph.file_name();
        let path = self.cache_dir.join(&cache_key);

        match self.fs.stat(&path) {
            Ok(stat) if stat.size > 0 => {
                debug!(icon = %cache_key, "icon cache hit");
            }
            stat => {
                debug!(icon = %cache_key, stat = ?stat.map(|s| s.size), "icon cache miss, writing");
                self.fs
                    .write_file(&path, glyph.document.as_bytes())
                    .map_err(|source| CacheError::Write {
                        path: path.clone(),
                        source,
                    })?;
            }
        }

        Ok(CachedIcon { cache_key, path })
    }

    /// Returns the decoration for a bookmark and the path of its gutter icon.
    ///
    /// `shape`, `color` and `text` are raw user input; see
    /// [`render_glyph`] for how they are normalized. The end-of-line label is
    /// only added when the configured label style allows it.
    pub fn get_decoration(
        &self,
        shape: &str,
        color: &str,
        text: &str,
        line_label: Option<&str>,
    ) -> Result<(Decoration, PathBuf), CacheError> {
        let glyph = render_glyph(shape, color, text);
        let icon = self.ensure_icon(&glyph)?;

        let decoration = Decoration::new(icon.path.clone(), &glyph.color, &self.settings, line_label);
        Ok((decoration, icon.path))
    }
}
