//! Application settings
//!
//! Resolved once at startup, later sources override earlier ones:
//! 1. built-in defaults
//! 2. `config.toml` in the platform config directory:
//!    - Linux: ~/.config/dog-fetcher/config.toml
//!    - macOS: ~/Library/Application Support/dog-fetcher/config.toml
//!    - Windows: %APPDATA%\dog-fetcher\config.toml
//! 3. `DOG_FETCHER_*` environment variables

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::api::client::DEFAULT_ENDPOINT;
use crate::state::fetch::OverlapPolicy;

/// Light or dark window theme
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

impl FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeChoice::Light),
            "dark" => Ok(ThemeChoice::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

impl From<ThemeChoice> for iced::Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => iced::Theme::Light,
            ThemeChoice::Dark => iced::Theme::Dark,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Random dog image endpoint
    pub endpoint: String,
    /// Apply only the newest request's response when fetches overlap
    pub discard_stale_responses: bool,
    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            discard_stale_responses: false,
            theme: ThemeChoice::default(),
        }
    }
}

impl Settings {
    /// Resolve settings from the config file and the process environment
    pub fn load() -> Self {
        let mut settings = match Self::config_path() {
            Some(path) => Self::from_file_or_default(path),
            None => Self::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok());

        info!(
            endpoint = %settings.endpoint,
            discard_stale_responses = settings.discard_stale_responses,
            theme = ?settings.theme,
            "settings loaded"
        );

        settings
    }

    /// Where the config file is expected
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("dog-fetcher");
        path.push("config.toml");
        Some(path)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn from_file_or_default(path: PathBuf) -> Self {
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no config file, using defaults");
                return Self::default();
            }
        };

        match Self::from_toml_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }

    /// Apply `DOG_FETCHER_*` overrides read through `lookup`
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("DOG_FETCHER_ENDPOINT") {
            let v = v.trim();
            if !v.is_empty() {
                self.endpoint = v.to_string();
            }
        }

        if let Some(v) = lookup("DOG_FETCHER_DISCARD_STALE") {
            match parse_flag(&v) {
                Some(flag) => self.discard_stale_responses = flag,
                None => warn!(value = %v, "DOG_FETCHER_DISCARD_STALE is not a boolean, ignoring"),
            }
        }

        if let Some(v) = lookup("DOG_FETCHER_THEME") {
            match v.parse() {
                Ok(theme) => self.theme = theme,
                Err(e) => warn!(error = %e, "DOG_FETCHER_THEME ignored"),
            }
        }
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        if self.discard_stale_responses {
            OverlapPolicy::LatestRequestWins
        } else {
            OverlapPolicy::LastResponseWins
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.endpoint, "https://dog.ceo/api/breeds/image/random");
        assert!(!settings.discard_stale_responses);
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.overlap_policy(), OverlapPolicy::LastResponseWins);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str("theme = \"dark\"").unwrap();

        assert_eq!(settings.theme, ThemeChoice::Dark);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_full_toml() {
        let raw = r#"
            endpoint = "http://localhost:8080/random"
            discard_stale_responses = true
            theme = "light"
        "#;

        let settings = Settings::from_toml_str(raw).unwrap();

        assert_eq!(settings.endpoint, "http://localhost:8080/random");
        assert_eq!(settings.overlap_policy(), OverlapPolicy::LatestRequestWins);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Settings::from_toml_str("theme = \"sepia\"").is_err());
        assert!(Settings::from_toml_str("endpoint = ").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::from_file_or_default(PathBuf::from("/definitely/not/here.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();

        settings.apply_env(env(&[
            ("DOG_FETCHER_ENDPOINT", " http://127.0.0.1:3000/dog "),
            ("DOG_FETCHER_DISCARD_STALE", "YES"),
            ("DOG_FETCHER_THEME", "Dark"),
        ]));

        assert_eq!(settings.endpoint, "http://127.0.0.1:3000/dog");
        assert!(settings.discard_stale_responses);
        assert_eq!(settings.theme, ThemeChoice::Dark);
    }

    #[test]
    fn test_bad_env_values_are_skipped() {
        let mut settings = Settings::default();

        settings.apply_env(env(&[
            ("DOG_FETCHER_ENDPOINT", "   "),
            ("DOG_FETCHER_DISCARD_STALE", "maybe"),
            ("DOG_FETCHER_THEME", "neon"),
        ]));

        assert_eq!(settings, Settings::default());
    }
}
