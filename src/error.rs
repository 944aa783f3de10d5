//! Error types for the icon cache and the bookmark storage.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while materializing a glyph in the icon cache directory.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The glyph was not cached yet and writing it failed.
    #[error("failed to write icon {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure reported by a [`KeyValueStore`](crate::storage::KeyValueStore) implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("storage backend io error: {0}")]
    Io(#[from] io::Error),

    #[error("storage backend serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A persisted field of a storage slot.
///
/// Used to name the field that could not be restored in a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredField {
    FormatVersion,
    Timestamp,
    Groups,
    Bookmarks,
    WorkspaceFolders,
}

impl StoredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FormatVersion => "format version",
            Self::Timestamp => "timestamp",
            Self::Groups => "groups",
            Self::Bookmarks => "bookmarks",
            Self::WorkspaceFolders => "workspace folders",
        }
    }
}

impl fmt::Display for StoredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while reading or persisting a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A required key is missing from a slot that already claims the latest format.
    #[error("restoring {field} failed: key is missing from an up-to-date store")]
    Corrupted { field: StoredField },

    /// A key is present but its value does not have the expected shape.
    #[error("restoring {field} failed: {source}")]
    Malformed {
        field: StoredField,
        #[source]
        source: serde_json::Error,
    },

    /// The stored format version cannot be migrated to the latest one.
    #[error("unsupported bookmark data format version {found} (latest known is {latest})")]
    UnsupportedVersion { found: u64, latest: u64 },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupted_error_names_the_field() {
        let err = StorageError::Corrupted {
            field: StoredField::Bookmarks,
        };
        assert!(err.to_string().contains("bookmarks"));
    }

    #[test]
    fn backend_error_converts_into_storage_error() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = BackendError::from(io).into();
        assert!(matches!(err, StorageError::Backend(BackendError::Io(_))));
    }
}
