//! Remembered user preferences, stored as `settings.json` in the data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";

/// Name and timezone reused by later `add` invocations when not given.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub user_name: Option<String>,
    pub default_timezone: Option<String>,
}

impl Settings {
    fn path(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE)
    }

    /// Load settings from `dir`, or defaults if none were saved yet.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path(dir);
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse settings: {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read settings: {}", path.display())),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path(dir);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings: {}", path.display()))
    }

    /// Remember the values just used; returns true if anything changed.
    pub fn remember(&mut self, user: &str, timezone: &str) -> bool {
        let next = Settings {
            user_name: Some(user.to_string()),
            default_timezone: Some(timezone.to_string()),
        };
        let changed = *self != next;
        *self = next;
        changed
    }
}
