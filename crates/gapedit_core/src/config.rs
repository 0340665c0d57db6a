//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_CHAR_ADVANCE_RATIO, DEFAULT_FONT_SIZE, DEFAULT_INITIAL_CAPACITY, DEFAULT_WRAP_WIDTH,
};
use crate::error::EditorError;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Initial gap buffer capacity.
pub const ENV_INITIAL_CAPACITY: &str = "GAPEDIT_INITIAL_CAPACITY";
/// Measurement font size.
pub const ENV_FONT_SIZE: &str = "GAPEDIT_FONT_SIZE";
/// Wrap width in pixels.
pub const ENV_WRAP_WIDTH: &str = "GAPEDIT_WRAP_WIDTH";
/// Monospace advance ratio.
pub const ENV_CHAR_ADVANCE: &str = "GAPEDIT_CHAR_ADVANCE";
/// Use bulk gap relocation instead of single steps.
pub const ENV_DIRECT_JUMP: &str = "GAPEDIT_DIRECT_JUMP";

/// Runtime configuration for the editing engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub initial_capacity: usize,
    pub font_size: f32,
    pub wrap_width: f32,
    pub char_advance_ratio: f32,
    pub direct_jump: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            font_size: DEFAULT_FONT_SIZE,
            wrap_width: DEFAULT_WRAP_WIDTH,
            char_advance_ratio: DEFAULT_CHAR_ADVANCE_RATIO,
            direct_jump: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parsed_or<T: FromStr>(raw: Option<String>, fallback: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(fallback)
}

impl EditorConfig {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`EditorConfig`] with defaults applied when env vars are
    /// missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// # Arguments
    /// - `lookup`: Returns the raw value for an `ENV_*` key, if set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            initial_capacity: parsed_or(lookup(ENV_INITIAL_CAPACITY), defaults.initial_capacity),
            font_size: parsed_or(lookup(ENV_FONT_SIZE), defaults.font_size),
            wrap_width: parsed_or(lookup(ENV_WRAP_WIDTH), defaults.wrap_width),
            char_advance_ratio: parsed_or(lookup(ENV_CHAR_ADVANCE), defaults.char_advance_ratio),
            direct_jump: lookup(ENV_DIRECT_JUMP)
                .and_then(|value| parse_env_flag(&value))
                .unwrap_or(defaults.direct_jump),
        }
    }

    /// Reject values the layout and buffer cannot work with.
    ///
    /// # Errors
    /// Returns [`EditorError::InvalidConfig`] naming the first offending key.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.initial_capacity == 0 {
            return Err(EditorError::InvalidConfig {
                key: ENV_INITIAL_CAPACITY,
                value: self.initial_capacity.to_string(),
            });
        }
        let positive = [
            (ENV_FONT_SIZE, self.font_size),
            (ENV_WRAP_WIDTH, self.wrap_width),
            (ENV_CHAR_ADVANCE, self.char_advance_ratio),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditorError::InvalidConfig {
                    key,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = EditorConfig::from_lookup(|_| None);
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.initial_capacity, 10);
    }

    #[test]
    fn lookup_values_override_defaults() {
        let config = EditorConfig::from_lookup(lookup_from(&[
            (ENV_INITIAL_CAPACITY, "64"),
            (ENV_FONT_SIZE, " 16 "),
            (ENV_WRAP_WIDTH, "300.5"),
            (ENV_DIRECT_JUMP, "yes"),
        ]));
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.wrap_width, 300.5);
        assert!(config.direct_jump);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = EditorConfig::from_lookup(lookup_from(&[
            (ENV_FONT_SIZE, "large"),
            (ENV_DIRECT_JUMP, "sometimes"),
        ]));
        assert_eq!(config.font_size, DEFAULT_FONT_SIZE);
        assert!(!config.direct_jump);
    }

    #[test]
    fn validate_rejects_zero_capacity_and_negative_sizes() {
        let mut config = EditorConfig {
            initial_capacity: 0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EditorError::InvalidConfig { key: ENV_INITIAL_CAPACITY, .. })
        ));
        config.initial_capacity = 4;
        config.wrap_width = -1.0;
        assert!(matches!(
            config.validate(),
            Err(EditorError::InvalidConfig { key: ENV_WRAP_WIDTH, .. })
        ));
        config.wrap_width = 100.0;
        assert!(config.validate().is_ok());
    }
}
