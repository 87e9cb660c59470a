use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::DateStyle;
use crate::palette::PaletteTable;
use crate::placer::LayoutConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    pub layout: LayoutConfig,
    pub date_style: DateStyle,
    pub label_max_chars: usize,
    pub palette: PaletteTable,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            date_style: DateStyle::Short,
            label_max_chars: 48,
            palette: PaletteTable::default(),
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "decisionline")?;
    Some(proj.config_dir().join("timeline.toml"))
}

pub fn load_or_default() -> TimelineSettings {
    let Some(path) = config_file_path() else {
        return TimelineSettings::default();
    };
    load_or_default_from_path(&path)
}

pub fn load_or_default_from_path(path: &Path) -> TimelineSettings {
    if !path.exists() {
        return TimelineSettings::default();
    }
    match load_from_path(path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "using default timeline settings");
            TimelineSettings::default()
        }
    }
}

pub fn load_from_path(path: &Path) -> anyhow::Result<TimelineSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline settings {}", path.display()))?;
    let settings: TimelineSettings = toml::from_str(&contents)
        .with_context(|| format!("failed to parse timeline settings {}", path.display()))?;
    settings
        .layout
        .validate()
        .with_context(|| format!("invalid layout in {}", path.display()))?;

    let unknown = settings.palette.unknown_keys();
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "palette entries for unknown event types are ignored");
    }
    Ok(settings)
}

pub fn save_to_path(settings: &TimelineSettings, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(settings).context("failed to serialize timeline settings")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write timeline settings {}", path.display()))?;
    Ok(())
}
