use clap::{Parser, Subcommand};
use pitlane_core::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "pitlane", author, version, about = "Race-weekend planner for F1 fans", long_about = None)]
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
    /// Add a new plan
    ///
    /// Example: pitlane add "Watch qualifying" "Set reminder" 2025-05-10 --priority High
    Add {
        name: Option<String>,
        description: Option<String>,
        date: Option<String>,
        /// High, Medium or Low (defaults to Medium)
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Edit a plan; omitted fields keep their current value
    ///
    /// Example: pitlane edit <id> --date 2025-05-11 --priority Low
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Flip a plan between completed and upcoming
    ///
    /// Example: pitlane toggle <id>
    #[command(visible_alias = "done")]
    Toggle { id: String },
    /// Delete a plan
    ///
    /// Example: pitlane delete <id>
    Delete { id: String },
    /// Show details of a plan
    ///
    /// Example: pitlane show <id>
    Show { id: String },
    /// List plans
    ///
    /// Example: pitlane list --status pending --priority High --sort date
    List {
        /// all, completed or pending
        #[arg(long, default_value = "all")]
        status: String,
        /// all, High, Medium or Low
        #[arg(long, default_value = "all")]
        priority: String,
        /// none, name or date
        #[arg(long, default_value = "none")]
        sort: String,
    },
    /// Show total, completed and upcoming counts
    Summary,
    /// Show the most recent changes
    Activity,
    /// Look up the next race
    ///
    /// Example: pitlane race --endpoint https://api.jolpi.ca/ergast/f1/current.json
    Race {
        /// Schedule endpoint to try, in order (repeatable)
        #[arg(long = "endpoint", value_name = "URL")]
        endpoints: Vec<String>,
    },
    /// Show or change dark mode
    ///
    /// Example: pitlane theme toggle
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Send a message through the contact form
    ///
    /// Example: pitlane contact --name Ana --email ana@example.com --message "Hi"
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the current setting
    Show,
    /// Switch between dark and light
    Toggle,
    /// Enable dark mode
    On,
    /// Disable dark mode
    Off,
    /// Forget the stored setting
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Palette,
    RaceEndpoints,
    RequestTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_key =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_key.as_str() {
        "palette" | "theme" => ConfigOverrideTarget::Palette,
        "race_endpoints" | "endpoints" => ConfigOverrideTarget::RaceEndpoints,
        "timeout" | "request_timeout_secs" => ConfigOverrideTarget::RequestTimeout,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` flag into one override set; later flags win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Palette => overrides.palette = Some(parsed.value),
            ConfigOverrideTarget::RaceEndpoints => {
                overrides.race_endpoints = Some(
                    parsed
                        .value
                        .split(',')
                        .map(str::trim)
                        .filter(|url| !url.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            ConfigOverrideTarget::RequestTimeout => {
                let secs = parsed.value.parse::<u64>().map_err(|_| {
                    format!("timeout must be a number of seconds (got '{}')", parsed.value)
                })?;
                overrides.request_timeout_secs = Some(secs);
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

#[cfg(test)]
mod tests {
    use super::{ConfigOverrideTarget, collect_overrides, parse_config_override};

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" THEME = Solarized ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::Palette);
        assert_eq!(parsed.value, "Solarized");
    }

    #[test]
    fn parse_config_override_accepts_dotted_endpoint_key() {
        let parsed = parse_config_override("race.endpoints=http://a,http://b").unwrap();
        assert_eq!(parsed.target, ConfigOverrideTarget::RaceEndpoints);
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("unknown.field=value").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("palette").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn parse_config_override_rejects_empty_key() {
        let err = parse_config_override(" = noir").unwrap_err();
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn collect_overrides_splits_endpoint_lists() {
        let overrides = collect_overrides(&[
            "endpoints = http://a , ,http://b".to_string(),
            "timeout=4".to_string(),
        ])
        .unwrap();

        assert_eq!(
            overrides.race_endpoints,
            Some(vec!["http://a".to_string(), "http://b".to_string()])
        );
        assert_eq!(overrides.request_timeout_secs, Some(4));
    }

    #[test]
    fn collect_overrides_rejects_non_numeric_timeout() {
        let err = collect_overrides(&["timeout=soon".to_string()]).unwrap_err();
        assert!(err.contains("seconds"));
    }
}
