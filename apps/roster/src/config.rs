use std::{fs, path::Path};

use client_core::StoreOptions;
use serde::Deserialize;
use shared::domain::{TeamColor, TeamRemovalPolicy};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub require_photo: bool,
    pub team_removal: TeamRemovalPolicy,
    pub palette: Option<Vec<TeamColor>>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            require_photo: false,
            team_removal: TeamRemovalPolicy::Retain,
            palette: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            require_photo: self.require_photo,
            team_removal: self.team_removal,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    require_photo: Option<bool>,
    team_removal: Option<String>,
    palette: Option<Vec<String>>,
    log_filter: Option<String>,
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_from(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` if it exists, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(error) => warn!(path = %path.display(), %error, "ignoring unreadable config file"),
        }
    }

    if let Some(v) = env("ROSTER_REQUIRE_PHOTO") {
        apply_require_photo(&mut settings, &v);
    }
    if let Some(v) = env("ROSTER__REQUIRE_PHOTO") {
        apply_require_photo(&mut settings, &v);
    }

    if let Some(v) = env("ROSTER__TEAM_REMOVAL") {
        apply_team_removal(&mut settings, &v);
    }

    if let Some(v) = env("ROSTER__PALETTE") {
        let entries: Vec<String> = v.split(',').map(str::to_string).collect();
        apply_palette(&mut settings, &entries);
    }

    if let Some(v) = env("ROSTER__LOG_FILTER") {
        if !v.trim().is_empty() {
            settings.log_filter = v;
        }
    }

    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.require_photo {
        settings.require_photo = v;
    }
    if let Some(v) = file_cfg.team_removal {
        apply_team_removal(settings, &v);
    }
    if let Some(v) = file_cfg.palette {
        apply_palette(settings, &v);
    }
    if let Some(v) = file_cfg.log_filter {
        if !v.trim().is_empty() {
            settings.log_filter = v;
        }
    }
}

fn apply_require_photo(settings: &mut Settings, raw: &str) {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => settings.require_photo = true,
        "0" | "false" | "no" | "off" => settings.require_photo = false,
        other => warn!(value = other, "ignoring invalid require_photo value"),
    }
}

fn apply_team_removal(settings: &mut Settings, raw: &str) {
    match TeamRemovalPolicy::parse(raw) {
        Some(policy) => settings.team_removal = policy,
        None => warn!(value = raw, "ignoring unknown team_removal policy"),
    }
}

fn apply_palette(settings: &mut Settings, entries: &[String]) {
    let parsed: Option<Vec<TeamColor>> = entries.iter().map(|c| TeamColor::parse(c)).collect();
    match parsed {
        Some(colors) if !colors.is_empty() => settings.palette = Some(colors),
        _ => warn!(?entries, "ignoring invalid palette"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
