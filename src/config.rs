use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::palette::MatchOptions;
use crate::paths::paths;

/// Top-level settings loaded from `config.toml`.
///
/// Every key is optional; a missing file yields [`Settings::default`].
///
/// Example TOML:
/// ```toml
/// always_add_all_changes = false
/// auto_add_files = true
/// git_binary = "git"
///
/// [palette]
/// limit = 7
///
/// [log]
/// preview_chars = 500
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `gct.add` stages `.` without prompting for paths.
    pub always_add_all_changes: bool,
    /// Commit and amend run `add .` first.
    pub auto_add_files: bool,
    pub git_binary: String,
    pub palette: PaletteSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub limit: usize,
    pub min_score: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub preview_chars: usize,
    pub file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_add_all_changes: true,
            auto_add_files: true,
            git_binary: "git".to_string(),
            palette: PaletteSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl Default for PaletteSettings {
    fn default() -> Self {
        let defaults = MatchOptions::default();
        Self {
            limit: defaults.limit,
            min_score: None,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            preview_chars: crate::exec::PREVIEW_CHARS,
            file: None,
        }
    }
}

impl PaletteSettings {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            limit: self.limit,
            min_score: self.min_score.unwrap_or(i64::MIN),
        }
    }
}

/// Load settings from the default location (see [`paths()`]).
///
/// # Errors
/// - Returns an error if the file exists but cannot be read.
/// - Returns an error if parsing the TOML fails.
pub fn load_settings() -> Result<Settings> {
    let p = paths()?;
    load_settings_from(&p.config)
}

/// Load settings from an explicit path. A missing file is not an error.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let settings: Settings = toml::from_str(&txt)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(settings)
}
