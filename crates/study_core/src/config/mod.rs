use crate::error::AppError;
use crate::responder::Settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::Duration;

const APP_DIR_NAME: &str = "studyagent";
const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "STUDYAGENT_CONFIG_PATH";
pub const MAX_PLAN_HOURS: f64 = 1000.0;
pub const MAX_REMINDER_DELAY_MINUTES: i64 = 525_600;

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.and_then(canonical_theme_name).as_deref() {
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        Some("solarized") => Palette {
            accent: "\x1b[38;5;108m",
            muted: "\x1b[38;5;250m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            reset: "",
        },
    }
}

/// Lower-case, collapse separators to `_`, and fold known aliases.
pub fn canonical_theme_name(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    match cleaned.trim_matches('_') {
        "" | "vanilla" | "light" => Some("default".to_string()),
        "dark" | "dark_mode" | "darkmode" => Some("noir".to_string()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    /// Plan length when the message names no "for <N> hours".
    #[serde(default)]
    pub default_hours: Option<f64>,
    /// Reminder delay when the message names no time.
    #[serde(default)]
    pub reminder_delay_minutes: Option<i64>,
    #[serde(default)]
    pub reminders_path: Option<PathBuf>,
}

impl Config {
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            default_hours: self.default_hours.unwrap_or(defaults.default_hours),
            reminder_delay: self
                .reminder_delay_minutes
                .map(Duration::minutes)
                .unwrap_or(defaults.reminder_delay),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub default_hours: Option<f64>,
    pub reminder_delay_minutes: Option<i64>,
    pub reminders_path: Option<PathBuf>,
}

/// Per-user directory holding the config and reminder files.
pub fn app_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_config() -> Result<Config, AppError> {
    let path = config_path()?;
    load_config_from_path(&path)
}

/// Never fails: problems are reported next to the default config.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path).map_err(|err| AppError::io_at(path, err))?;
    let config: Config =
        serde_json::from_str(&content).map_err(|err| AppError::malformed_at(path, err))?;
    check_config(&config).map_err(|message| {
        AppError::invalid_data(format!("{}: {}", path.display(), message))
    })?;
    Ok(normalize_config_theme(config))
}

/// Range checks shared by the config file and command-line overrides.
pub fn check_config(config: &Config) -> Result<(), String> {
    if let Some(hours) = config.default_hours {
        check_plan_hours(hours)?;
    }
    if let Some(minutes) = config.reminder_delay_minutes
        && !(0..=MAX_REMINDER_DELAY_MINUTES).contains(&minutes)
    {
        return Err(format!(
            "reminder_delay_minutes must be between 0 and {MAX_REMINDER_DELAY_MINUTES}"
        ));
    }
    Ok(())
}

/// Plan lengths accepted from configuration and the command line.
pub fn check_plan_hours(hours: f64) -> Result<(), String> {
    if hours.is_finite() && hours > 0.0 && hours <= MAX_PLAN_HOURS {
        Ok(())
    } else {
        Err(format!("hours must be greater than 0 and at most {MAX_PLAN_HOURS}"))
    }
}

fn normalize_config_theme(mut config: Config) -> Config {
    config.theme = config.theme.and_then(|name| canonical_theme_name(&name));
    config
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref()
        && let Some(normalized) = canonical_theme_name(theme)
    {
        merged.theme = Some(normalized);
    }
    if let Some(hours) = overrides.default_hours {
        merged.default_hours = Some(hours);
    }
    if let Some(minutes) = overrides.reminder_delay_minutes {
        merged.reminder_delay_minutes = Some(minutes);
    }
    if let Some(path) = overrides.reminders_path.as_ref() {
        merged.reminders_path = Some(path.clone());
    }

    merged
}
