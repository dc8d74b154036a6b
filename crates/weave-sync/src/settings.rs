//! Synchronizer settings loaded from TOML.

use std::path::Path;

use serde::Deserialize;
use smol_str::SmolStr;
use weave_fields::{ReservedNames, EXTRA_FLAG_KEY, PROMPT_FLAG_KEY};

use crate::error::SyncError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings shared by the synchronizer and the prompt compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Cache key of the "extra active" flag.
    pub extra_flag_key: SmolStr,
    /// Cache key of the "prompt enabled" flag.
    pub prompt_flag_key: SmolStr,
    /// Initial value of newly created toggle-tag controls.
    pub toggle_default: bool,
    /// Default log level of the command-line tool.
    pub log_level: SmolStr,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            extra_flag_key: SmolStr::new(EXTRA_FLAG_KEY),
            prompt_flag_key: SmolStr::new(PROMPT_FLAG_KEY),
            toggle_default: true,
            log_level: SmolStr::new("info"),
        }
    }
}

impl SyncSettings {
    /// Parses settings from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
        let raw: SettingsToml =
            toml::from_str(text).map_err(|err| SyncError::InvalidConfig(err.to_string().into()))?;
        raw.into_settings()
    }

    /// Loads settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            SyncError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        Self::from_toml_str(&text)
    }

    /// Names no field may take: both flag keys and the compiled outputs.
    #[must_use]
    pub fn reserved_names(&self) -> ReservedNames {
        ReservedNames::with_flag_keys(&self.extra_flag_key, &self.prompt_flag_key)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    sync: SyncSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SyncSection {
    extra_flag_key: Option<String>,
    prompt_flag_key: Option<String>,
    toggle_default: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    level: Option<String>,
}

impl SettingsToml {
    fn into_settings(self) -> Result<SyncSettings, SyncError> {
        let defaults = SyncSettings::default();
        let extra_flag_key = flag_key("sync.extra_flag_key", self.sync.extra_flag_key)?
            .unwrap_or(defaults.extra_flag_key);
        let prompt_flag_key = flag_key("sync.prompt_flag_key", self.sync.prompt_flag_key)?
            .unwrap_or(defaults.prompt_flag_key);
        if extra_flag_key == prompt_flag_key {
            return Err(SyncError::InvalidConfig(
                format!("sync flag keys must differ (both '{extra_flag_key}')").into(),
            ));
        }

        let log_level = match self.logging.level {
            Some(level) => {
                let level = level.trim().to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(SyncError::InvalidConfig(
                        format!("logging.level '{level}' is not one of {LOG_LEVELS:?}").into(),
                    ));
                }
                SmolStr::new(level)
            }
            None => defaults.log_level,
        };

        Ok(SyncSettings {
            extra_flag_key,
            prompt_flag_key,
            toggle_default: self.sync.toggle_default.unwrap_or(defaults.toggle_default),
            log_level,
        })
    }
}

fn flag_key(field: &str, value: Option<String>) -> Result<Option<SmolStr>, SyncError> {
    match value {
        Some(key) if key.trim().is_empty() => Err(SyncError::InvalidConfig(
            format!("{field} must not be empty").into(),
        )),
        Some(key) => Ok(Some(SmolStr::new(key.trim()))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(SyncSettings::from_toml_str("").unwrap(), SyncSettings::default());
    }

    #[test]
    fn reserved_names_follow_keys() {
        let settings = SyncSettings::from_toml_str("[sync]\nextra_flag_key = \"more\"\n").unwrap();
        let reserved = settings.reserved_names();
        assert!(reserved.contains("more"));
        assert!(reserved.contains("promptTextActive"));
        assert!(reserved.contains("compiled_prompt"));
        assert!(!reserved.contains("extraActive"));
    }
}
