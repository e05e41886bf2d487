//! TOML configuration file loading and settings resolution
//!
//! Settings are built in layers: defaults, then the configuration file, then
//! command line flags. A file named with `--config-file` must exist; otherwise
//! the default location is used only when present.

use crate::app::cli::args::Args;
use crate::app::error::{ConfigError, ConfigResult};
use crate::feeder::api::LineFilterConfig;
use std::path::{Path, PathBuf};

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: Option<bool>,
    pub filter: LineFilterConfig,
    /// Command prefixes that pause the feed after being sent
    pub hold_on: Vec<String>,
    /// Release a hold as soon as it is taken instead of stopping the drain
    pub resume_on_hold: bool,
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

/// Default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Cmdfeed").join("cmdfeed.toml"))
}

/// Read the configuration file, if any
pub fn load_config_file(config_file: Option<&Path>) -> ConfigResult<Option<toml::Table>> {
    let path = match config_file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    log::debug!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let table = toml::from_str::<toml::Table>(&contents).map_err(|e| ConfigError::Parse {
        path,
        message: e.to_string(),
    })?;
    Ok(Some(table))
}

impl Settings {
    /// Resolve settings from an optional configuration table and the command line
    pub fn resolve(config: Option<&toml::Table>, args: &Args) -> ConfigResult<Self> {
        let mut settings = Settings::default();
        if let Some(table) = config {
            settings.apply_toml_values(table)?;
        }
        settings.apply_args(args);
        Ok(settings)
    }

    /// Apply TOML configuration values
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> ConfigResult<()> {
        if let Some(level) = Self::choice_field(config, "log-level", &LOG_LEVELS)? {
            self.log_level = Some(level);
        }
        if let Some(format) = Self::choice_field(config, "log-format", &LOG_FORMATS)? {
            self.log_format = Some(format);
        }
        if let Some(file) = Self::string_field(config, "log-file")? {
            self.log_file = Some(file);
        }
        if let Some(color) = Self::bool_field(config, "color")? {
            self.color = Some(color);
        }

        if let Some(value) = config.get("filter") {
            let filter = value
                .as_table()
                .ok_or_else(|| ConfigError::invalid("filter", "expected a table"))?;

            if let Some(strip) = Self::bool_field(filter, "strip-comments")? {
                self.filter.strip_comments = strip;
            }
            if let Some(trim) = Self::bool_field(filter, "trim")? {
                self.filter.trim = trim;
            }
            if let Some(uppercase) = Self::bool_field(filter, "uppercase")? {
                self.filter.uppercase = uppercase;
            }
            Self::apply_string_array_field(filter, "hold-on", &mut self.hold_on)?;
            if let Some(resume) = Self::bool_field(filter, "resume-on-hold")? {
                self.resume_on_hold = resume;
            }
        }
        Ok(())
    }

    /// Command line flags take precedence over file values
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(level) = &args.log_level {
            self.log_level = Some(level.clone());
        }
        if let Some(format) = &args.log_format {
            self.log_format = Some(format.clone());
        }
        if let Some(file) = &args.log_file {
            self.log_file = Some(file.clone());
        }
        if let Some(color) = args.color_choice() {
            self.color = Some(color);
        }
        if let Some(strip) = args.strip_comments_choice() {
            self.filter.strip_comments = strip;
        }
        if args.uppercase {
            self.filter.uppercase = true;
        }
        if args.resume_on_hold {
            self.resume_on_hold = true;
        }
        for token in &args.hold_on {
            if !self.hold_on.contains(token) {
                self.hold_on.push(token.clone());
            }
        }
    }

    fn bool_field(config: &toml::Table, key: &str) -> ConfigResult<Option<bool>> {
        config
            .get(key)
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| ConfigError::invalid(key, "expected true or false"))
            })
            .transpose()
    }

    fn string_field(config: &toml::Table, key: &str) -> ConfigResult<Option<String>> {
        config
            .get(key)
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ConfigError::invalid(key, "expected a string"))
            })
            .transpose()
    }

    fn choice_field(
        config: &toml::Table,
        key: &str,
        choices: &[&str],
    ) -> ConfigResult<Option<String>> {
        match Self::string_field(config, key)? {
            Some(value) if !choices.contains(&value.as_str()) => Err(ConfigError::invalid(
                key,
                format!("'{}' is not one of: {}", value, choices.join(", ")),
            )),
            other => Ok(other),
        }
    }

    /// Apply string array field (accepts both a single string and an array)
    fn apply_string_array_field(
        config: &toml::Table,
        key: &str,
        target: &mut Vec<String>,
    ) -> ConfigResult<()> {
        let Some(value) = config.get(key) else {
            return Ok(());
        };

        let items: Vec<String> = if let Some(s) = value.as_str() {
            vec![s.to_string()]
        } else if let Some(array) = value.as_array() {
            array
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ConfigError::invalid(key, "array items must be strings"))
                })
                .collect::<ConfigResult<_>>()?
        } else {
            return Err(ConfigError::invalid(
                key,
                "expected a string or an array of strings",
            ));
        };

        for item in items.into_iter().filter(|s| !s.trim().is_empty()) {
            if !target.contains(&item) {
                target.push(item);
            }
        }
        Ok(())
    }
}
