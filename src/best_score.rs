//! Persisted best score
//!
//! A single integer under one key. Reads never fail a round: a missing or
//! unparsable value counts as 0. Persisted to LocalStorage on web and to a
//! small JSON file on native.

use std::collections::HashMap;
use std::io;

use crate::consts::BEST_SCORE_KEY;

/// String key-value storage backing the best score
pub trait ScoreStore {
    /// Raw stored value, if any
    fn read(&self, key: &str) -> Option<String>;
    /// Replace the stored value
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Volatile store for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        let storage =
            Self::storage().ok_or_else(|| io::Error::other("LocalStorage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| io::Error::other(format!("{e:?}")))
    }
}

/// JSON object file mapping keys to values (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_map(&self) -> io::Result<HashMap<String, String>> {
        let json = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        match self.load_map() {
            Ok(mut map) => map.remove(key),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        // A corrupt file is replaced rather than blocking the write
        let mut map = self.load_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&map).map_err(io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, json)
    }
}

/// Parse a stored score, tolerating the float formatting browsers sometimes
/// leave behind ("120" and "120.0" both read as 120)
pub fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(score) = raw.parse::<u64>() {
        return Some(score);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.floor() as u64),
        _ => None,
    }
}

/// Best-score tracker over a [`ScoreStore`]
pub struct BestScore {
    store: Box<dyn ScoreStore>,
    key: String,
}

impl BestScore {
    pub fn new(store: impl ScoreStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            key: BEST_SCORE_KEY.to_string(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Use a different storage key
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Current best, 0 when absent or corrupt
    pub fn load(&self) -> u64 {
        match self.store.read(&self.key) {
            None => 0,
            Some(raw) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring corrupt best score {:?}", raw);
                0
            }),
        }
    }

    /// Compare a final score against the stored best, writing it only when
    /// strictly greater. Returns the best score after the comparison and
    /// whether it was beaten.
    pub fn record(&mut self, score: u64) -> (u64, bool) {
        let best = self.load();
        if score <= best {
            return (best, false);
        }
        match self.store.write(&self.key, &score.to_string()) {
            Ok(()) => log::info!("New best score {} (was {})", score, best),
            Err(e) => log::warn!("Failed to save best score {}: {}", score, e),
        }
        (score, true)
    }
}

impl Default for BestScore {
    fn default() -> Self {
        Self::in_memory()
    }
}
