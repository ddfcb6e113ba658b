// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HostlinkError, Result};

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Bridge settings, usually read from `hostlink.json` next to the app bundle.
///
/// Every field has a default so partial files are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Locale the bridge resets to on `initialize()`.
    pub default_locale: String,
    /// App protocol (e.g. "myapp" or "myapp://"). When set, the host shell
    /// pushes it to the web layer once the page has loaded.
    pub protocol: Option<String>,
    /// Commands every mock controller must provide to be accepted.
    pub required_commands: Vec<String>,
    /// How long the host waits for a `get_value_from_js` answer.
    pub value_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            protocol: None,
            required_commands: Vec::new(),
            value_timeout_ms: 1000,
        }
    }
}

impl BridgeConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Parse a JSON config document.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)
            .map_err(|e| HostlinkError::Config(format!("invalid bridge config: {e}")))?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// The configured locale, falling back to [`DEFAULT_LOCALE`] when blank.
    pub fn locale(&self) -> &str {
        if self.default_locale.is_empty() {
            DEFAULT_LOCALE
        } else {
            &self.default_locale
        }
    }

    pub fn value_timeout(&self) -> Duration {
        Duration::from_millis(self.value_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_uses_defaults() {
        let config = BridgeConfig::from_json(r#"{"protocol": "myapp"}"#).unwrap();
        assert_eq!(config.protocol.as_deref(), Some("myapp"));
        assert_eq!(config.locale(), "en");
        assert_eq!(config.value_timeout(), Duration::from_secs(1));
        assert!(config.required_commands.is_empty());
    }

    #[test]
    fn blank_locale_falls_back() {
        let config = BridgeConfig {
            default_locale: String::new(),
            ..Default::default()
        };
        assert_eq!(config.locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn malformed_config_is_config_error() {
        let err = BridgeConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, HostlinkError::Config(_)));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostlink.json");
        let config = BridgeConfig {
            default_locale: "fr".into(),
            protocol: Some("myapp://".into()),
            required_commands: vec!["web_error".into()],
            value_timeout_ms: 250,
        };
        config.save(&path).unwrap();

        let loaded = BridgeConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BridgeConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, HostlinkError::Io(_)));
    }
}
