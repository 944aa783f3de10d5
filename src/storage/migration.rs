//! Forward migrations of the stored data format.
//!
//! Each [`Migration`] upgrades a slot by exactly one version and writes its
//! changes straight to the backend, so a slot is consistent even if the
//! process exits before the next [`persist`](super::BookmarkStorage::persist).
//! To add a format version, bump [`LATEST_FORMAT_VERSION`] and append a step.

use serde_json::{json, Value};
use tracing::info;

use super::backend::KeyValueStore;
use super::{SlotKeys, LATEST_FORMAT_VERSION};
use crate::error::{BackendError, StorageError};

/// One upgrade step.
pub struct Migration {
    /// Version this step upgrades from; it leaves the slot at `from_version + 1`.
    pub from_version: u64,
    pub description: &'static str,
    pub up: fn(&mut dyn KeyValueStore, &SlotKeys) -> Result<(), BackendError>,
}

/// All migrations, ordered by `from_version`.
pub static MIGRATIONS: &[Migration] = &[Migration {
    from_version: 0,
    description: "initial setup: add format version and timestamp, create missing lists",
    up: migrate_v0_to_v1,
}];

/// Upgrades a slot from `version` to [`LATEST_FORMAT_VERSION`].
///
/// Returns the version the slot is at afterwards.
pub fn migrate(
    store: &mut dyn KeyValueStore,
    keys: &SlotKeys,
    mut version: u64,
) -> Result<u64, StorageError> {
    let unsupported = |found| StorageError::UnsupportedVersion {
        found,
        latest: LATEST_FORMAT_VERSION,
    };

    if version > LATEST_FORMAT_VERSION {
        return Err(unsupported(version));
    }

    while version < LATEST_FORMAT_VERSION {
        let step = MIGRATIONS
            .iter()
            .find(|m| m.from_version == version)
            .ok_or_else(|| unsupported(version))?;

        info!(
            from = version,
            to = version + 1,
            key = %keys.format_version,
            "migrating bookmark data: {}",
            step.description
        );
        (step.up)(store, keys)?;
        version += 1;
    }

    Ok(version)
}

fn migrate_v0_to_v1(store: &mut dyn KeyValueStore, keys: &SlotKeys) -> Result<(), BackendError> {
    let mut entries = vec![
        (keys.timestamp.clone(), json!(0)),
        (keys.format_version.clone(), json!(1)),
    ];

    for key in [&keys.groups, &keys.bookmarks, &keys.workspace_folders] {
        if store.get(key).is_none() {
            entries.push((key.clone(), Value::Array(Vec::new())));
        }
    }

    store.update_many(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryStore;

    #[test]
    fn migrations_are_contiguous_up_to_latest() {
        let versions: Vec<u64> = MIGRATIONS.iter().map(|m| m.from_version).collect();
        let expected: Vec<u64> = (0..LATEST_FORMAT_VERSION).collect();
        assert_eq!(versions, expected);
    }

    #[test]
    fn latest_version_is_a_no_op() {
        let mut store = MemoryStore::new();
        let version = migrate(&mut store, &SlotKeys::new(""), LATEST_FORMAT_VERSION).unwrap();
        assert_eq!(version, LATEST_FORMAT_VERSION);
        assert!(store.is_empty());
    }

    #[test]
    fn v0_keeps_existing_lists() {
        let keys = SlotKeys::new("");
        let mut store = MemoryStore::new()
            .with_value(keys.groups.clone(), json!([{"name": "g", "color": "f00", "shape": "star"}]));

        migrate(&mut store, &keys, 0).unwrap();

        assert_eq!(store.get(&keys.groups).unwrap().as_array().unwrap().len(), 1);
        assert_eq!(store.get(&keys.bookmarks), Some(json!([])));
        assert_eq!(store.get(&keys.workspace_folders), Some(json!([])));
        assert_eq!(store.get(&keys.timestamp), Some(json!(0)));
        assert_eq!(store.get(&keys.format_version), Some(json!(1)));
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut store = MemoryStore::new();
        let err = migrate(&mut store, &SlotKeys::new(""), LATEST_FORMAT_VERSION + 1).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion { found, .. } if found == LATEST_FORMAT_VERSION + 1));
    }
}
