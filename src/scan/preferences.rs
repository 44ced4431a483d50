// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persisted section toggles
//!
//! Preferences are named booleans that default to `true` when unset.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Error, Result};

/// Key-value store for boolean preferences
pub trait PreferenceStore: Send + Sync {
    /// Stored value, `None` when never set
    fn get(&self, name: &str) -> Result<Option<bool>>;

    fn set(&self, name: &str, value: bool) -> Result<()>;

    /// Stored value, or `true` when never set
    fn get_or_default(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.unwrap_or(true))
    }
}

/// In-memory preferences
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: DashMap<String, bool>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, name: &str) -> Result<Option<bool>> {
        Ok(self.values.get(name).map(|v| *v))
    }

    fn set(&self, name: &str, value: bool) -> Result<()> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

/// Preferences persisted as a JSON object, rewritten on every change
///
/// A change that cannot be written is not applied.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: RwLock<BTreeMap<String, bool>>,
}

impl JsonFilePreferences {
    /// Open a preference file; a missing file starts empty
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    Error::Preference(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = values.len(), "Preferences loaded");
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, bool>) -> Result<()> {
        let json = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, name: &str) -> Result<Option<bool>> {
        Ok(self.values.read().get(name).copied())
    }

    fn set(&self, name: &str, value: bool) -> Result<()> {
        let mut values = self.values.write();
        let mut updated = values.clone();
        updated.insert(name.to_string(), value);
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_defaults_to_true() {
        let store = MemoryPreferences::new();
        assert_eq!(store.get("headers").unwrap(), None);
        assert!(store.get_or_default("headers").unwrap());

        store.set("headers", false).unwrap();
        assert!(!store.get_or_default("headers").unwrap());
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = JsonFilePreferences::open(&path).unwrap();
        assert!(store.get_or_default("cookies").unwrap());
        store.set("cookies", false).unwrap();
        drop(store);

        let reopened = JsonFilePreferences::open(&path).unwrap();
        assert_eq!(reopened.get("cookies").unwrap(), Some(false));
        assert_eq!(reopened.get("server").unwrap(), None);
    }

    #[test]
    fn test_failed_write_keeps_old_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("prefs.json");

        let store = JsonFilePreferences::open(&path).unwrap();
        assert!(store.set("server", false).is_err());
        assert_eq!(store.get("server").unwrap(), None);
        assert!(store.get_or_default("server").unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_json_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFilePreferences::open(&path).unwrap_err();
        assert!(matches!(err, Error::Preference(_)));
    }
}
