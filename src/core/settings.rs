//! Settings persistence
//!
//! Loads and saves [`AppSettings`] as JSON.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory, e.g.
//! `~/.config/fairychess/settings.json` on Linux. Falls back to a local
//! `settings.json` if no configuration directory can be determined. The
//! `--config` flag overrides both.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings with a warning
//! - Save failures are returned to the caller

use super::error::AppResult;
use chess_rules::PieceType;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// User preferences for the command-line front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Castling enabled for games started from a FEN
    pub allow_castling: bool,
    /// En passant enabled for games started from a FEN
    pub allow_en_passant: bool,
    /// Piece a pawn becomes when a move gives no promotion letter
    pub default_promotion: PieceType,
    /// Print events as JSON lines instead of text
    pub json_events: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            log_level: "info".to_string(),
            allow_castling: true,
            allow_en_passant: true,
            default_promotion: PieceType::Queen,
            json_events: false,
        }
    }
}

/// Resolve the default settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "fairychess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

impl AppSettings {
    /// Read settings from `path`, failing on I/O or parse errors
    pub fn read_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    ///
    /// Uses `path` when given, otherwise [`settings_path`].
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(settings_path, Path::to_path_buf);

        if !path.exists() {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            return AppSettings::default();
        }

        match AppSettings::read_from(&path) {
            Ok(settings) => {
                info!("[SETTINGS] Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                    path, e
                );
                AppSettings::default()
            }
        }
    }

    /// Write settings to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("fairychess-{name}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn test_settings_save_then_load() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("nested").join(SETTINGS_FILENAME);
        let settings = AppSettings {
            allow_castling: false,
            default_promotion: PieceType::Chancellor,
            ..AppSettings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(Some(&path)), settings);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_settings_missing_or_corrupt_fall_back() {
        let dir = scratch_dir("corrupt");
        let path = dir.join(SETTINGS_FILENAME);
        assert_eq!(AppSettings::load(Some(&path)), AppSettings::default());

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(AppSettings::read_from(&path).is_err());
        assert_eq!(AppSettings::load(Some(&path)), AppSettings::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_settings_partial_file_uses_defaults() {
        let dir = scratch_dir("partial");
        let path = dir.join(SETTINGS_FILENAME);
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, r#"{ "json_events": true }"#).unwrap();

        let settings = AppSettings::load(Some(&path));
        assert!(settings.json_events);
        assert_eq!(settings.log_level, "info");
        fs::remove_dir_all(dir).unwrap();
    }
}
