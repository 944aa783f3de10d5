//! Versioned bookmark storage.
//!
//! Bookmarks and groups of one slot live under five keys of a
//! [`KeyValueStore`]. [`BookmarkStorage::read_storage`] migrates the slot to
//! [`LATEST_FORMAT_VERSION`] before returning anything, and
//! [`BookmarkStorage::persist`] writes the whole [`StoredState`] back as one
//! batch.
//!
//! # Slots
//!
//! Every key carries the slot as a suffix (`_<slot>`), so several independent
//! bookmark sets can share one backend. The empty slot is the default one and
//! has no suffix.
//!
//! # Example
//!
//! ```
//! use labeled_bookmarks::{BookmarkStorage, MemoryStore};
//!
//! let mut storage = BookmarkStorage::new(MemoryStore::new(), "");
//! let mut state = storage.read_storage()?;
//! assert_eq!(state.format_version, 1);
//!
//! state.set_timestamp(42);
//! storage.persist(&state)?;
//! assert_eq!(storage.read_storage()?.timestamp, 42);
//! # Ok::<(), labeled_bookmarks::StorageError>(())
//! ```

pub mod backend;
pub mod migration;
mod state;

pub use backend::{JsonFileStore, KeyValueStore, MemoryStore};
pub use state::{SerializableBookmark, SerializableGroup, StoredState};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BackendError, StorageError, StoredField};

/// The format version written by this crate.
pub const LATEST_FORMAT_VERSION: u64 = 1;

pub const FORMAT_VERSION_KEY: &str = "vscLabeledBookmarks.formatVersion";
pub const TIMESTAMP_KEY: &str = "vscodeLabeledBookmarks.bookmarkTimestamp";
pub const GROUPS_KEY: &str = "vscLabeledBookmarks.groups";
pub const BOOKMARKS_KEY: &str = "vscLabeledBookmarks.bookmarks";
pub const WORKSPACE_FOLDERS_KEY: &str = "vscLabeledBookmarks.workspaceFolders";

/// Backend keys of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotKeys {
    pub format_version: String,
    pub timestamp: String,
    pub groups: String,
    pub bookmarks: String,
    pub workspace_folders: String,
}

impl SlotKeys {
    pub fn new(slot: &str) -> Self {
        let suffix = if slot.is_empty() {
            String::new()
        } else {
            format!("_{slot}")
        };
        let key = |base: &str| format!("{base}{suffix}");

        Self {
            format_version: key(FORMAT_VERSION_KEY),
            timestamp: key(TIMESTAMP_KEY),
            groups: key(GROUPS_KEY),
            bookmarks: key(BOOKMARKS_KEY),
            workspace_folders: key(WORKSPACE_FOLDERS_KEY),
        }
    }
}

/// Reads and writes the bookmark state of one slot.
///
/// The storage holds no state of its own besides the backend: every
/// [`read_storage`](Self::read_storage) goes to the backend and hands out an
/// owned [`StoredState`].
#[derive(Debug)]
pub struct BookmarkStorage<S: KeyValueStore> {
    backend: S,
    slot: String,
    keys: SlotKeys,
}

impl<S: KeyValueStore> BookmarkStorage<S> {
    pub fn new(backend: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let keys = SlotKeys::new(&slot);
        Self {
            backend,
            slot,
            keys,
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn keys(&self) -> &SlotKeys {
        &self.keys
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Loads the slot, migrating it to the latest format first.
    ///
    /// A key missing from a slot that was already at version 1 or later is
    /// reported as [`StorageError::Corrupted`]. A key still missing right
    /// after a migration from version 0 is defaulted instead.
    pub fn read_storage(&mut self) -> Result<StoredState, StorageError> {
        let stored_version = match self.backend.get(&self.keys.format_version) {
            Some(value) => parse(value, StoredField::FormatVersion)?,
            None => 0,
        };
        let abort_on_error = stored_version >= 1;

        let format_version = migration::migrate(&mut self.backend, &self.keys, stored_version)?;

        let state = StoredState {
            format_version,
            timestamp: self.read_field(StoredField::Timestamp, abort_on_error)?,
            groups: self.read_field(StoredField::Groups, abort_on_error)?,
            bookmarks: self.read_field(StoredField::Bookmarks, abort_on_error)?,
            workspace_folders: self.read_field(StoredField::WorkspaceFolders, abort_on_error)?,
        };

        debug!(
            slot = %self.slot,
            groups = state.groups.len(),
            bookmarks = state.bookmarks.len(),
            "read bookmark storage"
        );
        Ok(state)
    }

    /// Writes the whole state of the slot as one batch.
    pub fn persist(&mut self, state: &StoredState) -> Result<(), StorageError> {
        let entries = vec![
            (self.keys.format_version.clone(), to_value(&state.format_version)?),
            (self.keys.timestamp.clone(), to_value(&state.timestamp)?),
            (self.keys.groups.clone(), to_value(&state.groups)?),
            (self.keys.bookmarks.clone(), to_value(&state.bookmarks)?),
            (self.keys.workspace_folders.clone(), to_value(&state.workspace_folders)?),
        ];

        self.backend.update_many(entries)?;
        debug!(slot = %self.slot, timestamp = state.timestamp, "persisted bookmark storage");
        Ok(())
    }

    fn key(&self, field: StoredField) -> &str {
        match field {
            StoredField::FormatVersion => &self.keys.format_version,
            StoredField::Timestamp => &self.keys.timestamp,
            StoredField::Groups => &self.keys.groups,
            StoredField::Bookmarks => &self.keys.bookmarks,
            StoredField::WorkspaceFolders => &self.keys.workspace_folders,
        }
    }

    fn read_field<T: DeserializeOwned + Default>(
        &self,
        field: StoredField,
        abort_on_error: bool,
    ) -> Result<T, StorageError> {
        match self.backend.get(self.key(field)) {
            Some(value) => parse(value, field),
            None if abort_on_error => Err(StorageError::Corrupted { field }),
            None => {
                warn!(slot = %self.slot, %field, "restoring {field} failed, starting empty");
                Ok(T::default())
            }
        }
    }
}

fn parse<T: DeserializeOwned>(value: Value, field: StoredField) -> Result<T, StorageError> {
    serde_json::from_value(value).map_err(|source| StorageError::Malformed { field, source })
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, StorageError> {
    serde_json::to_value(value).map_err(|err| BackendError::from(err).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bookmark(line: u32) -> SerializableBookmark {
        SerializableBookmark {
            fs_path: "/work/lib.rs".into(),
            line_number: line,
            character_number: 0,
            label: None,
            line_text: String::new(),
            is_line_number_changed: false,
            group_name: "default".into(),
        }
    }

    fn group(name: &str) -> SerializableGroup {
        SerializableGroup {
            name: name.into(),
            color: "00ff00".into(),
            shape: "star".into(),
            icon_text: "Q".into(),
        }
    }

    fn up_to_date_store(keys: &SlotKeys) -> MemoryStore {
        MemoryStore::new()
            .with_value(keys.format_version.clone(), json!(1))
            .with_value(keys.timestamp.clone(), json!(5))
            .with_value(keys.groups.clone(), json!([]))
            .with_value(keys.bookmarks.clone(), json!([]))
            .with_value(keys.workspace_folders.clone(), json!([]))
    }

    /// Store that silently drops writes to one key.
    struct ForgetfulStore {
        inner: MemoryStore,
        forget: String,
    }

    impl KeyValueStore for ForgetfulStore {
        fn get(&self, key: &str) -> Option<Value> {
            self.inner.get(key)
        }

        fn update(&mut self, key: &str, value: Value) -> Result<(), BackendError> {
            if key != self.forget {
                self.inner.update(key, value)?;
            }
            Ok(())
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<Value> {
            self.0.get(key)
        }

        fn update(&mut self, _key: &str, _value: Value) -> Result<(), BackendError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn slot_keys_are_suffixed() {
        let default = SlotKeys::new("");
        assert_eq!(default.bookmarks, "vscLabeledBookmarks.bookmarks");
        assert_eq!(default.timestamp, "vscodeLabeledBookmarks.bookmarkTimestamp");

        let work = SlotKeys::new("work");
        assert_eq!(work.format_version, "vscLabeledBookmarks.formatVersion_work");
        assert_eq!(work.workspace_folders, "vscLabeledBookmarks.workspaceFolders_work");
    }

    #[test]
    fn empty_backend_is_migrated_in_place() {
        let mut storage = BookmarkStorage::new(MemoryStore::new(), "");
        let state = storage.read_storage().unwrap();

        assert_eq!(state, StoredState::default());

        // The migration is visible in the backend without calling persist.
        let keys = storage.keys().clone();
        let backend = storage.into_backend();
        assert_eq!(backend.get(&keys.format_version), Some(json!(1)));
        assert_eq!(backend.get(&keys.timestamp), Some(json!(0)));
        assert_eq!(backend.get(&keys.groups), Some(json!([])));
        assert_eq!(backend.get(&keys.bookmarks), Some(json!([])));
        assert_eq!(backend.get(&keys.workspace_folders), Some(json!([])));
    }

    #[test]
    fn legacy_data_survives_migration() {
        let keys = SlotKeys::new("");
        let backend = MemoryStore::new()
            .with_value(keys.bookmarks.clone(), serde_json::to_value(vec![bookmark(3)]).unwrap())
            .with_value(keys.groups.clone(), serde_json::to_value(vec![group("default")]).unwrap());

        let state = BookmarkStorage::new(backend, "").read_storage().unwrap();

        assert_eq!(state.format_version, 1);
        assert_eq!(state.bookmarks, vec![bookmark(3)]);
        assert_eq!(state.groups, vec![group("default")]);
        assert!(state.workspace_folders.is_empty());
    }

    #[test]
    fn missing_bookmarks_on_current_format_is_corruption() {
        let keys = SlotKeys::new("");
        let mut backend = up_to_date_store(&keys);
        backend.remove(&keys.bookmarks);

        let err = BookmarkStorage::new(backend, "").read_storage().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Corrupted {
                field: StoredField::Bookmarks
            }
        ));
        assert!(err.to_string().contains("bookmarks"));
    }

    #[test]
    fn missing_timestamp_on_current_format_is_corruption() {
        let keys = SlotKeys::new("p");
        let mut backend = up_to_date_store(&keys);
        backend.remove(&keys.timestamp);

        let err = BookmarkStorage::new(backend, "p").read_storage().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Corrupted {
                field: StoredField::Timestamp
            }
        ));
    }

    #[test]
    fn missing_key_after_fresh_migration_is_defaulted() {
        let keys = SlotKeys::new("");
        let backend = ForgetfulStore {
            inner: MemoryStore::new(),
            forget: keys.workspace_folders.clone(),
        };

        let state = BookmarkStorage::new(backend, "").read_storage().unwrap();
        assert!(state.workspace_folders.is_empty());
        assert_eq!(state.format_version, LATEST_FORMAT_VERSION);
    }

    #[test]
    fn malformed_field_is_reported() {
        let keys = SlotKeys::new("");
        let backend = up_to_date_store(&keys).with_value(keys.groups.clone(), json!("oops"));

        let err = BookmarkStorage::new(backend, "").read_storage().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Malformed {
                field: StoredField::Groups,
                ..
            }
        ));
    }

    #[test]
    fn newer_format_is_unsupported() {
        let keys = SlotKeys::new("");
        let backend = up_to_date_store(&keys).with_value(keys.format_version.clone(), json!(7));

        let err = BookmarkStorage::new(backend, "").read_storage().unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion { found: 7, latest: 1 }));
    }

    #[test]
    fn persist_then_read_returns_same_state() {
        let mut storage = BookmarkStorage::new(MemoryStore::new(), "");
        let mut state = storage.read_storage().unwrap();

        state.set_timestamp(1_700_000_000);
        state.set_groups(vec![group("default"), group("todo")]);
        state.set_bookmarks(vec![bookmark(1), bookmark(9)]);
        state.set_workspace_folders(vec!["/work".into()]);
        storage.persist(&state).unwrap();

        assert_eq!(storage.read_storage().unwrap(), state);
    }

    #[test]
    fn slots_do_not_collide() {
        let mut backend = MemoryStore::new();

        {
            let mut primary = BookmarkStorage::new(&mut backend, "");
            let mut state = primary.read_storage().unwrap();
            state.set_bookmarks(vec![bookmark(1)]);
            primary.persist(&state).unwrap();
        }

        let mut secondary = BookmarkStorage::new(&mut backend, "profile");
        let state = secondary.read_storage().unwrap();
        assert!(state.bookmarks.is_empty());

        let primary = BookmarkStorage::new(&mut backend, "").read_storage().unwrap();
        assert_eq!(primary.bookmarks, vec![bookmark(1)]);
        assert_eq!(backend.len(), 10);
    }

    #[test]
    fn persist_failure_is_reported() {
        let keys = SlotKeys::new("");
        let mut storage = BookmarkStorage::new(ReadOnlyStore(up_to_date_store(&keys)), "");

        let state = storage.read_storage().unwrap();
        let err = storage.persist(&state).unwrap_err();
        assert!(matches!(err, StorageError::Backend(BackendError::Io(_))));
    }

    #[test]
    fn json_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace-state.json");

        let mut storage = BookmarkStorage::new(JsonFileStore::open(&path).unwrap(), "");
        let mut state = storage.read_storage().unwrap();
        state.set_groups(vec![group("default")]);
        state.set_bookmarks(vec![bookmark(12)]);
        storage.persist(&state).unwrap();

        let mut reopened = BookmarkStorage::new(JsonFileStore::open(&path).unwrap(), "");
        assert_eq!(reopened.read_storage().unwrap(), state);
    }
}
