//! Roster persistence: an ordered name list plus the theme index, written
//! through a pluggable key-value storage backend.

use thiserror::Error;

use crate::config::ShuffleSettings;
use crate::shuffle::{self, Rng};
use crate::theme;

/// Storage key for the serialized name list (JSON array of strings)
pub const NAMES_KEY: &str = "standup-manager-names";
/// Storage key for the theme index (decimal string)
pub const THEME_KEY: &str = "standup-manager-theme";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        source: std::io::Error,
    },
    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },
    #[error("no data directory available")]
    NoDataDir,
}

/// Flat key-value persistence. `read` returns `None` for absent keys;
/// everything else is a real I/O failure.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One file per key under the platform data directory.
pub struct FileStorage {
    dir: std::path::PathBuf,
}

impl FileStorage {
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("standup");

        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("Could not create data directory: {}", e);
        }

        Ok(Self { dir })
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.dir.join(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.dir.join(key), value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            source: e,
        })
    }
}

/// In-memory backend for tests. Clones share the same entries, so a test
/// can hold one handle and hand another to a roster.
#[cfg(test)]
#[derive(Default, Clone)]
pub struct MemoryStorage {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The team roster: an ordered name list and the current theme index.
///
/// Every mutation persists before returning, so the UI never renders state
/// that is not already on disk. Invalid operations (blank names, adds at
/// capacity, deletes out of range) are silent no-ops rather than errors.
pub struct Roster {
    names: Vec<String>,
    theme_index: usize,
    max_names: usize,
    storage: Box<dyn Storage>,
}

impl Roster {
    /// Read persisted state. Absent or malformed values degrade to an empty
    /// roster and theme 0 instead of failing startup.
    pub fn load(storage: Box<dyn Storage>, max_names: usize) -> Self {
        let mut names = match storage.read(NAMES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!("Discarding malformed name list: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read name list: {}", e);
                Vec::new()
            }
        };
        names.truncate(max_names);

        let theme_index = match storage.read(THEME_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<usize>() {
                Ok(index) => index % theme::count(),
                Err(e) => {
                    tracing::warn!("Discarding malformed theme index: {}", e);
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Could not read theme index: {}", e);
                0
            }
        };

        Self {
            names,
            theme_index,
            max_names,
            storage,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= self.max_names
    }

    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    /// Append a trimmed name. Blank input and adds at capacity are ignored.
    pub fn add(&mut self, name: &str) -> Result<(), StorageError> {
        let name = name.trim();
        if name.is_empty() || self.is_full() {
            return Ok(());
        }
        self.names.push(name.to_string());
        self.persist_names()
    }

    /// Remove the entry at `index`; out of range is ignored.
    pub fn remove_at(&mut self, index: usize) -> Result<(), StorageError> {
        if index >= self.names.len() {
            return Ok(());
        }
        self.names.remove(index);
        self.persist_names()
    }

    /// Drop every name and reset the theme back to the first one.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.names.clear();
        self.theme_index = 0;
        self.persist_names()?;
        self.persist_theme()
    }

    /// Replace the list with a fresh permutation and advance the theme.
    /// Both values are persisted before the caller can re-render.
    pub fn shuffle(
        &mut self,
        rng: &mut Rng,
        settings: &ShuffleSettings,
    ) -> Result<(), StorageError> {
        self.names = shuffle::shuffled(&self.names, rng, settings);
        self.theme_index = (self.theme_index + 1) % theme::count();
        self.persist_names()?;
        self.persist_theme()
    }

    fn persist_names(&mut self) -> Result<(), StorageError> {
        // Vec<String> to JSON cannot fail
        let raw = serde_json::to_string(&self.names).unwrap_or_default();
        self.storage.write(NAMES_KEY, &raw)
    }

    fn persist_theme(&mut self) -> Result<(), StorageError> {
        self.storage.write(THEME_KEY, &self.theme_index.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_roster() -> (Roster, MemoryStorage) {
        let storage = MemoryStorage::default();
        let roster = Roster::load(Box::new(storage.clone()), 100);
        (roster, storage)
    }

    #[test]
    fn test_starts_empty_without_persisted_state() {
        let (roster, _) = fresh_roster();
        assert!(roster.is_empty());
        assert_eq!(roster.theme_index(), 0);
    }

    #[test]
    fn test_add_trims_and_persists() {
        let (mut roster, storage) = fresh_roster();
        roster.add("  Alice  ").unwrap();

        assert_eq!(roster.names(), ["Alice"]);
        assert_eq!(
            storage.read(NAMES_KEY).unwrap().unwrap(),
            r#"["Alice"]"#
        );
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let (mut roster, _) = fresh_roster();
        roster.add("").unwrap();
        roster.add("   ").unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_add_stops_at_capacity() {
        let storage = MemoryStorage::default();
        let mut roster = Roster::load(Box::new(storage), 100);

        for i in 0..100 {
            roster.add(&format!("Member {}", i)).unwrap();
        }
        assert_eq!(roster.len(), 100);
        assert!(roster.is_full());

        roster.add("One Too Many").unwrap();
        assert_eq!(roster.len(), 100);
        assert!(!roster.names().contains(&"One Too Many".to_string()));
    }

    #[test]
    fn test_remove_at_keeps_relative_order() {
        let (mut roster, _) = fresh_roster();
        for name in ["Alice", "Bob", "Carol"] {
            roster.add(name).unwrap();
        }

        roster.remove_at(1).unwrap();
        assert_eq!(roster.names(), ["Alice", "Carol"]);
    }

    #[test]
    fn test_remove_out_of_range_is_a_noop() {
        let (mut roster, _) = fresh_roster();
        roster.add("Alice").unwrap();

        roster.remove_at(5).unwrap();
        assert_eq!(roster.names(), ["Alice"]);
    }

    #[test]
    fn test_clear_resets_names_and_theme() {
        let (mut roster, storage) = fresh_roster();
        roster.add("Alice").unwrap();
        roster
            .shuffle(&mut Rng::with_seed(1), &ShuffleSettings::default())
            .unwrap();
        assert_eq!(roster.theme_index(), 1);

        roster.clear().unwrap();
        assert!(roster.is_empty());
        assert_eq!(roster.theme_index(), 0);
        assert_eq!(storage.read(THEME_KEY).unwrap().unwrap(), "0");
    }

    #[test]
    fn test_theme_advances_modulo_theme_count() {
        let (mut roster, _) = fresh_roster();
        roster.add("Alice").unwrap();

        let shuffles = theme::count() + 2;
        let mut rng = Rng::with_seed(5);
        for _ in 0..shuffles {
            roster.shuffle(&mut rng, &ShuffleSettings::default()).unwrap();
        }
        assert_eq!(roster.theme_index(), shuffles % theme::count());
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = MemoryStorage::default();
        {
            let mut roster = Roster::load(Box::new(storage.clone()), 100);
            for name in ["Alice", "Bob", "Carol"] {
                roster.add(name).unwrap();
            }
            roster
                .shuffle(&mut Rng::with_seed(11), &ShuffleSettings::default())
                .unwrap();
        }

        let reloaded = Roster::load(Box::new(storage), 100);
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.theme_index(), 1);

        let mut sorted: Vec<_> = reloaded.names().to_vec();
        sorted.sort();
        assert_eq!(sorted, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_malformed_state_degrades_to_defaults() {
        let mut storage = MemoryStorage::default();
        storage.write(NAMES_KEY, "not json at all").unwrap();
        storage.write(THEME_KEY, "five").unwrap();

        let roster = Roster::load(Box::new(storage), 100);
        assert!(roster.is_empty());
        assert_eq!(roster.theme_index(), 0);
    }

    #[test]
    fn test_oversized_persisted_list_is_truncated() {
        let mut storage = MemoryStorage::default();
        let big: Vec<String> = (0..150).map(|i| format!("Member {}", i)).collect();
        storage
            .write(NAMES_KEY, &serde_json::to_string(&big).unwrap())
            .unwrap();

        let roster = Roster::load(Box::new(storage), 100);
        assert_eq!(roster.len(), 100);
    }

    #[test]
    fn test_persisted_theme_wraps_into_range() {
        let mut storage = MemoryStorage::default();
        storage.write(THEME_KEY, "27").unwrap();

        let roster = Roster::load(Box::new(storage), 100);
        assert_eq!(roster.theme_index(), 27 % theme::count());
    }
}
