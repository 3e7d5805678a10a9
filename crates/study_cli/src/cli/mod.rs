use clap::{Parser, Subcommand};
use std::path::PathBuf;
use study_core::config::{ConfigOverrides, check_plan_hours};

#[derive(Parser, Debug)]
#[command(author, version, about = "Study plans, reminders and progress from plain messages", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a free-text message
    ///
    /// Example: study ask "Plan my study for 2 hours on DSA"
    /// Example: study ask remind me at 6 pm
    Ask {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Build a study plan directly
    ///
    /// Example: study plan --hours 3 --topic graphs
    Plan {
        #[arg(long, value_parser = parse_hours)]
        hours: Option<f64>,
        #[arg(long)]
        topic: Option<String>,
    },
    /// Show the time a message would be scheduled for
    ///
    /// Example: study when "tomorrow"
    /// Example: study when at 7:30 pm
    When {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List saved reminders
    ///
    /// Example: study reminders
    Reminders,
    /// Run the built-in sample messages
    ///
    /// Example: study demo
    Demo,
}

fn parse_hours(raw: &str) -> Result<f64, String> {
    let hours: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    check_plan_hours(hours)?;
    Ok(hours)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    DefaultHours,
    ReminderDelayMinutes,
    RemindersPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;
    let target = match field.as_str() {
        "theme" => ConfigOverrideTarget::Theme,
        "default_hours" | "hours" => ConfigOverrideTarget::DefaultHours,
        "reminder_delay_minutes" | "reminder_delay" => ConfigOverrideTarget::ReminderDelayMinutes,
        "reminders_path" => ConfigOverrideTarget::RemindersPath,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride {
        target,
        value: value_raw.trim().to_string(),
    })
}

/// Fold every raw override into one set, later flags winning.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();

    for item in raw {
        let parsed = parse_config_override(item)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::DefaultHours => {
                overrides.default_hours = Some(parse_hours(&parsed.value)?);
            }
            ConfigOverrideTarget::ReminderDelayMinutes => {
                let minutes = parsed
                    .value
                    .parse()
                    .map_err(|_| format!("'{}' is not a whole number of minutes", parsed.value))?;
                overrides.reminder_delay_minutes = Some(minutes);
            }
            ConfigOverrideTarget::RemindersPath => {
                if parsed.value.is_empty() {
                    return Err("reminders_path cannot be empty".to_string());
                }
                overrides.reminders_path = Some(PathBuf::from(parsed.value));
            }
        }
    }

    Ok(overrides)
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
