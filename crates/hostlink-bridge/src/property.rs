// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Readable properties for host value requests.
//
// The host can only ask for paths listed here: the bridge's own state, or
// getters the UI registered up front.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::validate_command_name;

const LOCALE: &str = "locale";
const TRANSPORT_ENDPOINT: &str = "transport_endpoint";
const APP_DATA: &str = "app_data";

/// Getter for a UI-registered property.
pub type PropertyGetter = Arc<dyn Fn() -> Value + Send + Sync>;

/// A resolved property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostProperty {
    Locale,
    TransportEndpoint,
    /// The whole application-data map.
    AppData,
    /// One application-data entry (`app_data.<key>`).
    AppDataEntry(String),
    /// A getter registered in the [`PropertyTable`].
    Custom(String),
}

impl HostProperty {
    fn builtin(path: &str) -> Option<Self> {
        match path {
            LOCALE => Some(Self::Locale),
            TRANSPORT_ENDPOINT => Some(Self::TransportEndpoint),
            APP_DATA => Some(Self::AppData),
            _ => path
                .strip_prefix("app_data.")
                .filter(|key| !key.is_empty())
                .map(|key| Self::AppDataEntry(key.to_string())),
        }
    }
}

/// Getters registered ahead of time, plus the built-in paths.
#[derive(Clone, Default)]
pub struct PropertyTable {
    getters: BTreeMap<String, PropertyGetter>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a getter. Built-in paths cannot be shadowed.
    pub fn register<F>(&mut self, name: &str, getter: F) -> Result<()>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        validate_command_name(name)?;
        if HostProperty::builtin(name).is_some() {
            return Err(HostlinkError::InvalidCommandName(format!(
                "{name} is a built-in property"
            )));
        }
        self.getters.insert(name.to_string(), Arc::new(getter));
        Ok(())
    }

    /// Map a requested path to a property.
    pub fn resolve(&self, path: &str) -> Result<HostProperty> {
        if let Some(builtin) = HostProperty::builtin(path) {
            return Ok(builtin);
        }
        if self.getters.contains_key(path) {
            return Ok(HostProperty::Custom(path.to_string()));
        }
        Err(HostlinkError::UnknownProperty(path.to_string()))
    }

    /// Run the getter registered under `name`.
    pub fn read(&self, name: &str) -> Option<Value> {
        self.getters.get(name).map(|getter| getter())
    }
}

impl std::fmt::Debug for PropertyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyTable")
            .field("custom", &self.getters.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_paths() {
        let table = PropertyTable::new();
        assert_eq!(table.resolve("locale").unwrap(), HostProperty::Locale);
        assert_eq!(
            table.resolve("transport_endpoint").unwrap(),
            HostProperty::TransportEndpoint
        );
        assert_eq!(table.resolve("app_data").unwrap(), HostProperty::AppData);
        assert_eq!(
            table.resolve("app_data.user").unwrap(),
            HostProperty::AppDataEntry("user".into())
        );
    }

    #[test]
    fn unknown_path_is_rejected() {
        let table = PropertyTable::new();
        for path in ["window.location", "app_data.", "", "locale()"] {
            assert!(matches!(
                table.resolve(path),
                Err(HostlinkError::UnknownProperty(_))
            ));
        }
    }

    #[test]
    fn custom_getter() {
        let mut table = PropertyTable::new();
        table.register("ui.current_view", || json!("home")).unwrap();
        assert_eq!(
            table.resolve("ui.current_view").unwrap(),
            HostProperty::Custom("ui.current_view".into())
        );
        assert_eq!(table.read("ui.current_view"), Some(json!("home")));
    }

    #[test]
    fn builtins_cannot_be_shadowed() {
        let mut table = PropertyTable::new();
        assert!(table.register("locale", || json!("xx")).is_err());
        assert!(table.register("app_data.user", || json!(null)).is_err());
    }
}
