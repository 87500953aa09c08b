// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration — remembers the last recipe folder between runs.
//
// The on-disk format is a single small JSON object, `{"last_path": "..."}`,
// written to a fixed per-user location. A missing or corrupt file silently
// falls back to the default folder; the scanner must never refuse to start
// over its config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

/// Persistent application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base recipe folder chosen on a previous run, if any.
    pub last_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from the given file. Missing or unparseable content yields the
    /// default config.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => {
                    debug!(path = %path.display(), "config loaded");
                    config
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "corrupt config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the per-user config location ([`config_file_path`]).
    pub fn load() -> Self {
        Self::load_from(config_file_path())
    }

    /// Write to the given file, creating parent directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string(self)?)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Save to the per-user config location, swallowing failures. Losing
    /// the remembered path is an inconvenience, not an error.
    pub fn save(&self) {
        if let Err(err) = self.save_to(config_file_path()) {
            warn!(%err, "could not persist config");
        }
    }

    /// The base folder to use for this run: the remembered path if it still
    /// exists on disk, otherwise the default `Recipes` folder.
    pub fn base_dir(&self) -> PathBuf {
        if let Some(path) = &self.last_path {
            if path.exists() {
                return path.clone();
            }
            warn!(path = %path.display(), "remembered folder is gone, using default");
        }
        default_base_dir()
    }
}

/// Default recipe folder: `Recipes` under the current working directory.
pub fn default_base_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("Recipes")
}

/// Per-user config file location.
pub fn config_file_path() -> PathBuf {
    config_base_dir().join("platen").join("config.json")
}

fn config_base_dir() -> PathBuf {
    // Try XDG config dir, then fall back to home
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    PathBuf::from("/tmp")
}
