// Layout persistence: the committed size map, serialized as one JSON record
// under a fixed key of an external key-value store.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tilegrid_core::{KeyValueStore, LayoutMap, Size};

/// Key the layout record lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "launcher.tile-layout";

/// Version written by `save`. Unversioned records are read as version 0.
pub const LAYOUT_VERSION: u32 = 1;

// ──────────────────────────────────────────────
// Serialized shapes
// ──────────────────────────────────────────────

#[derive(Deserialize)]
struct StoredSize {
    width: f64,
    height: f64,
}

#[derive(Serialize)]
struct WrittenSize {
    width: i32,
    height: i32,
}

#[derive(Serialize)]
struct StoredLayoutRef<'a> {
    version: u32,
    tiles: HashMap<&'a str, WrittenSize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLayout {
    Versioned {
        version: u32,
        tiles: HashMap<String, StoredSize>,
    },
    Legacy(HashMap<String, StoredSize>),
}

fn stored_to_size(stored: &StoredSize) -> Option<Size> {
    let width = stored.width.round();
    let height = stored.height.round();
    let range = f64::from(i32::MIN)..=f64::from(i32::MAX);
    if !range.contains(&width) || !range.contains(&height) {
        return None;
    }
    Some(Size::new(width as i32, height as i32))
}

enum Decoded {
    Layout(LayoutMap),
    Corrupt(String),
    Unsupported(u32),
}

fn decode(data: &str) -> Decoded {
    let (version, tiles) = match serde_json::from_str::<StoredLayout>(data) {
        Ok(StoredLayout::Versioned { version, tiles }) => (version, tiles),
        Ok(StoredLayout::Legacy(tiles)) => (0, tiles),
        Err(e) => return Decoded::Corrupt(e.to_string()),
    };
    if version > LAYOUT_VERSION {
        return Decoded::Unsupported(version);
    }

    let mut map = LayoutMap::with_capacity(tiles.len());
    for (id, stored) in &tiles {
        match stored_to_size(stored) {
            Some(size) => {
                map.insert(id.clone(), size);
            }
            None => return Decoded::Corrupt(format!("size for tile {:?} is out of range", id)),
        }
    }
    Decoded::Layout(map)
}

// ──────────────────────────────────────────────
// LayoutStore
// ──────────────────────────────────────────────

/// Reads and writes the whole layout map. Never surfaces errors to the
/// caller: corrupt data is discarded and write failures are logged.
pub struct LayoutStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl LayoutStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&mut self) -> LayoutMap {
        let data = match self.backend.get(&self.key) {
            Ok(Some(data)) => data,
            Ok(None) => return LayoutMap::new(),
            Err(e) => {
                log::warn!("Failed to read tile layout {:?}: {}", self.key, e);
                return LayoutMap::new();
            }
        };

        match decode(&data) {
            Decoded::Layout(map) => map,
            Decoded::Unsupported(version) => {
                log::warn!(
                    "Tile layout {:?} has unsupported version {} (max {}); ignoring",
                    self.key,
                    version,
                    LAYOUT_VERSION
                );
                LayoutMap::new()
            }
            Decoded::Corrupt(reason) => {
                log::warn!("Discarding corrupt tile layout {:?}: {}", self.key, reason);
                if let Err(e) = self.backend.remove(&self.key) {
                    log::error!("Failed to remove corrupt tile layout {:?}: {}", self.key, e);
                }
                LayoutMap::new()
            }
        }
    }

    pub fn save(&mut self, map: &LayoutMap) {
        let record = StoredLayoutRef {
            version: LAYOUT_VERSION,
            tiles: map
                .iter()
                .map(|(id, size)| {
                    let written = WrittenSize {
                        width: size.width,
                        height: size.height,
                    };
                    (id.as_str(), written)
                })
                .collect(),
        };

        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.backend.set(&self.key, &json) {
                    log::error!("Failed to write tile layout {:?}: {}", self.key, e);
                }
            }
            Err(e) => {
                log::error!("Failed to serialize tile layout: {}", e);
            }
        }
    }

    /// Remove the persisted record entirely.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(&self.key) {
            log::error!("Failed to clear tile layout {:?}: {}", self.key, e);
        }
    }
}
