// Settings persistence: launcher configuration, stored separately from the layout record.
// Uses platform-native config dir: e.g. ~/Library/Application Support/tilegrid/settings.json
// on macOS, ~/.config/tilegrid/settings.json on Linux.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tilegrid_core::CellSize;
use tilegrid_layout::geometry::{self, GridMetrics};
use tilegrid_layout::store::DEFAULT_STORAGE_KEY;
use tilegrid_layout::GeometryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Overrides the store file location (defaults to the platform data dir).
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default = "default_role")]
    pub default_role: String,
    #[serde(default = "default_handle_size")]
    pub handle_size: f32,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_role() -> String {
    "admin".to_string()
}

fn default_handle_size() -> f32 {
    tilegrid_input::DEFAULT_HANDLE_SIZE
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            storage_key: default_storage_key(),
            storage_path: None,
            default_role: default_role(),
            handle_size: default_handle_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    /// Columns in the launcher grid.
    pub columns: u32,
    /// Spacing between tiles, in pixels.
    pub gap: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            min_width: geometry::MIN_WIDTH,
            max_width: geometry::MAX_WIDTH,
            min_height: geometry::MIN_HEIGHT,
            max_height: geometry::MAX_HEIGHT,
            cell_width: geometry::CELL_SIZE.width,
            cell_height: geometry::CELL_SIZE.height,
            columns: 4,
            gap: 8.0,
        }
    }
}

impl GridSettings {
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics {
            min_width: self.min_width,
            max_width: self.max_width,
            min_height: self.min_height,
            max_height: self.max_height,
            cell: CellSize::new(self.cell_width, self.cell_height),
        }
    }

    /// Validated policy, falling back to the defaults on bad metrics.
    pub fn policy(&self) -> GeometryPolicy {
        match GeometryPolicy::new(self.metrics()) {
            Ok(policy) => policy,
            Err(e) => {
                log::warn!("Invalid grid settings ({}); using defaults", e);
                GeometryPolicy::default()
            }
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns.max(1)
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("tilegrid").join("settings.json"))
}

pub fn load_settings() -> LauncherSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => LauncherSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> LauncherSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                LauncherSettings::default()
            }
        },
        Err(_) => LauncherSettings::default(),
    }
}
