//! Generator configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, a JSON
//! file, the environment (`.env` is loaded first), and finally whatever the
//! caller overrides explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GRANULARITY_SECONDS, DEFAULT_PASSCODE_LENGTH, DEFAULT_SQUEEZE_BUDGET_BASE,
    DEFAULT_SQUEEZE_BUDGET_PER_SYMBOL,
};
use crate::error::{Result, SpongepassError};

/// Environment variable holding the window width in seconds.
pub const ENV_GRANULARITY: &str = "SPONGEPASS_GRANULARITY";

/// Environment variable holding the default passcode length.
pub const ENV_LENGTH: &str = "SPONGEPASS_LENGTH";

/// Tunables for a passcode generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Width of a time window in seconds. Must be non-zero.
    pub granularity_seconds: u32,
    /// Passcode length used when the caller does not ask for one.
    pub passcode_length: usize,
    /// Squeeze attempts allowed per requested symbol at bound 24.
    pub squeeze_budget_per_symbol: usize,
    /// Fixed squeeze attempts allowed per request at bound 24.
    pub squeeze_budget_base: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            granularity_seconds: DEFAULT_GRANULARITY_SECONDS,
            passcode_length: DEFAULT_PASSCODE_LENGTH,
            squeeze_budget_per_symbol: DEFAULT_SQUEEZE_BUDGET_PER_SYMBOL,
            squeeze_budget_base: DEFAULT_SQUEEZE_BUDGET_BASE,
        }
    }
}

impl GeneratorConfig {
    /// Defaults overlaid with `SPONGEPASS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::default().with_env()
    }

    /// Reads a JSON config file; missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays `SPONGEPASS_*` environment variables onto `self`.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var(ENV_GRANULARITY) {
            self.granularity_seconds = parse_var(ENV_GRANULARITY, &value)?;
        }
        if let Ok(value) = std::env::var(ENV_LENGTH) {
            self.passcode_length = parse_var(ENV_LENGTH, &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Sets the window width.
    pub fn with_granularity(mut self, seconds: u32) -> Self {
        self.granularity_seconds = seconds;
        self
    }

    /// Sets the default passcode length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.passcode_length = length;
        self
    }

    /// Checks that the configuration can produce passcodes.
    pub fn validate(&self) -> Result<()> {
        if self.granularity_seconds == 0 {
            return Err(SpongepassError::ConfigError(
                "granularity_seconds must be greater than zero".into(),
            ));
        }
        if self.squeeze_budget_per_symbol == 0 && self.squeeze_budget_base == 0 {
            return Err(SpongepassError::ConfigError(
                "squeeze budget must allow at least one attempt".into(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SpongepassError::ConfigError(format!("{name}: cannot parse {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.granularity_seconds, 30);
        assert_eq!(config.passcode_length, 16);
    }

    #[test]
    fn test_zero_granularity_rejected() {
        let config = GeneratorConfig::default().with_granularity(0);
        assert!(matches!(config.validate(), Err(SpongepassError::ConfigError(_))));
    }

    // Must stay the only test in this crate that touches SPONGEPASS_* vars.
    #[test]
    fn test_with_env_overlay() {
        std::env::remove_var(ENV_GRANULARITY);
        std::env::remove_var(ENV_LENGTH);
        let base = GeneratorConfig::default().with_length(10);
        assert_eq!(base.clone().with_env().unwrap(), base);

        std::env::set_var(ENV_GRANULARITY, "90");
        std::env::set_var(ENV_LENGTH, " 8 ");
        let config = base.clone().with_env().unwrap();
        assert_eq!(config.granularity_seconds, 90);
        assert_eq!(config.passcode_length, 8);
        assert_eq!(config.squeeze_budget_base, base.squeeze_budget_base);

        std::env::set_var(ENV_LENGTH, "sixteen");
        assert!(matches!(
            base.clone().with_env(),
            Err(SpongepassError::ConfigError(msg)) if msg.contains(ENV_LENGTH)
        ));

        std::env::set_var(ENV_LENGTH, "8");
        std::env::set_var(ENV_GRANULARITY, "0");
        assert!(matches!(base.clone().with_env(), Err(SpongepassError::ConfigError(_))));

        std::env::remove_var(ENV_GRANULARITY);
        std::env::remove_var(ENV_LENGTH);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "granularity_seconds": 60 }}"#).unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.granularity_seconds, 60);
        assert_eq!(config.passcode_length, 16);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "granularity_seconds": 0 }}"#).unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(file.path()),
            Err(SpongepassError::ConfigError(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(file.path()),
            Err(SpongepassError::JsonError(_))
        ));
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<u32>("X", " 45 ").unwrap(), 45);
        assert!(matches!(
            parse_var::<u32>("X", "forty"),
            Err(SpongepassError::ConfigError(msg)) if msg.contains("X")
        ));
    }
}
