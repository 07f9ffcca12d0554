// src/common/config.rs
//! Application configuration loaded from environment variables

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which rule set checks submitted items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Hand-written item rules (`required`, `range`, `max`, `totalPriceMin`)
    Validator,
    /// Field constraint declarations plus the total price rule
    Declarative,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validator" => Ok(ValidationMode::Validator),
            "declarative" => Ok(ValidationMode::Declarative),
            other => Err(format!("expected 'validator' or 'declarative', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub validation_mode: ValidationMode,
    pub validate_on_edit: bool,
    pub seed_sample_items: bool,
    pub messages_dir: Option<PathBuf>,
    pub default_locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            log_level: "info".to_string(),
            validation_mode: ValidationMode::Validator,
            validate_on_edit: false,
            seed_sample_items: true,
            messages_dir: None,
            default_locale: "en".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, starting from the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = parse_value("HOST", &host)?;
        }

        if let Some(port) = lookup("PORT") {
            config.port = parse_value("PORT", &port)?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.log_level = level.trim().to_string();
            }
        }

        // ITEM_VALIDATION_MODE - "validator" or "declarative"
        if let Some(mode) = lookup("ITEM_VALIDATION_MODE") {
            config.validation_mode = parse_value("ITEM_VALIDATION_MODE", &mode)?;
        }

        // VALIDATE_ON_EDIT - the edit form skips item rules unless enabled
        if let Some(flag) = lookup("VALIDATE_ON_EDIT") {
            config.validate_on_edit = parse_flag("VALIDATE_ON_EDIT", &flag)?;
        }

        if let Some(flag) = lookup("SEED_SAMPLE_ITEMS") {
            config.seed_sample_items = parse_flag("SEED_SAMPLE_ITEMS", &flag)?;
        }

        if let Some(dir) = lookup("MESSAGES_DIR") {
            if !dir.trim().is_empty() {
                config.messages_dir = Some(PathBuf::from(dir.trim()));
            }
        }

        if let Some(locale) = lookup("DEFAULT_LOCALE") {
            if !locale.trim().is_empty() {
                config.default_locale = locale.trim().to_lowercase();
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.validation_mode, ValidationMode::Validator);
        assert!(!config.validate_on_edit);
        assert!(config.seed_sample_items);
        assert!(config.messages_dir.is_none());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("ITEM_VALIDATION_MODE", "Declarative"),
            ("VALIDATE_ON_EDIT", "yes"),
            ("SEED_SAMPLE_ITEMS", "false"),
            ("MESSAGES_DIR", "./messages"),
            ("DEFAULT_LOCALE", "KO"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.validation_mode, ValidationMode::Declarative);
        assert!(config.validate_on_edit);
        assert!(!config.seed_sample_items);
        assert_eq!(config.messages_dir, Some(PathBuf::from("./messages")));
        assert_eq!(config.default_locale, "ko");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(config_from(&[("ITEM_VALIDATION_MODE", "annotations")]).is_err());
        assert!(config_from(&[("VALIDATE_ON_EDIT", "maybe")]).is_err());
    }
}
