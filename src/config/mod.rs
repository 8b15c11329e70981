// Application configuration
// Loaded from a TOML file in the platform config directory, with defaults
// matching the studio's original deployment (09:30-20:00, 30-minute slots,
// ten rooms)

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::day::Day;
use crate::models::grid::TimeGrid;

/// Recognized options. Unknown keys in the file are rejected so typos
/// surface instead of silently falling back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    /// Days offered in the day selector.
    pub days: Vec<Day>,
    pub step_minutes: i32,
    /// Grid opens, minutes from midnight.
    pub start_min: i32,
    /// Grid closes, minutes from midnight.
    pub end_min: i32,
    /// Ordered room labels; "Room 1: Dance" renders the first line as the
    /// column header and the part before ':' as the short label.
    pub rooms: Vec<String>,
    /// Pointer displacement in pixels separating a click from a drag.
    pub drag_threshold_px: f32,
    /// Auto-refresh interval for the live (now/next) board.
    pub live_refresh_secs: u64,
    /// Instructor name to hex color, e.g. "Riley" = "#FFD6E7".
    pub instructor_palette: HashMap<String, String>,
    /// How long to wait for a writable session before running read-only.
    pub session_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            days: Day::ALL.to_vec(),
            step_minutes: 30,
            start_min: 9 * 60 + 30,
            end_min: 20 * 60,
            rooms: vec![
                "Room 1: Dance".to_string(),
                "Room 2: Arts".to_string(),
                "Room 3: Early Music".to_string(),
                "Room 4: Multi-purpose".to_string(),
                "Room 5: Music".to_string(),
                "Room 6: Multi-purpose".to_string(),
                "Room 7: Multi-purpose".to_string(),
                "Room 8: Early Music".to_string(),
                "Room 9: Dance".to_string(),
                "Room 10: Multi-purpose".to_string(),
            ],
            drag_threshold_px: 7.0,
            live_refresh_secs: 30,
            instructor_palette: HashMap::new(),
            session_timeout_ms: 4500,
        }
    }
}

impl AppConfig {
    /// Load from the platform config directory, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Ken24T", "studio-scheduler")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        TimeGrid::new(self.start_min, self.end_min, self.step_minutes)
            .map_err(anyhow::Error::msg)?;
        if self.rooms.is_empty() {
            anyhow::bail!("Config must list at least one room");
        }
        if self.days.is_empty() {
            anyhow::bail!("Config must list at least one day");
        }
        if self.drag_threshold_px <= 0.0 {
            anyhow::bail!("drag_threshold_px must be positive");
        }
        Ok(())
    }

    /// The lattice this configuration describes. Call after `validate`.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::new(self.start_min, self.end_min, self.step_minutes)
            .expect("validated config always yields a grid")
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Short room label: text before the first ':' of the first line,
    /// falling back to "Room N".
    pub fn room_label(&self, room_index: usize) -> String {
        self.rooms
            .get(room_index)
            .and_then(|label| label.lines().next())
            .map(|line| line.split(':').next().unwrap_or(line).trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Room {}", room_index + 1))
    }
}
