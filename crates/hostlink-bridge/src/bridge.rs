// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The web-side bridge context.
//
// One `Bridge` exists per web view. It is constructed explicitly, passed to
// whatever UI code needs it, and torn down when the view goes away. All
// operations are synchronous and never block: host-mode sends are handed to
// the transport and forgotten.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::{BridgeMode, GET_VALUE_COMMAND, HostCall, WEB_ERROR_COMMAND};

use crate::address::{arg_text, build_address};
use crate::commands::CommandTable;
use crate::property::{HostProperty, PropertyTable};
use crate::transport::HostTransport;

/// First argument of every `web_error` report.
const WEB_ERROR_KIND: &str = "JavaScript exception";

/// Bridge between UI code and the native host (or its in-process mock).
pub struct Bridge {
    config: BridgeConfig,
    transport: Arc<dyn HostTransport>,
    properties: PropertyTable,

    // Per-session state, reset by `initialize`.
    transport_endpoint: Option<String>,
    locale: String,
    application_data: BTreeMap<String, Value>,
    mock_controller: Option<CommandTable>,
}

impl Bridge {
    /// Create an initialized bridge with the default configuration.
    pub fn new(transport: Arc<dyn HostTransport>) -> Self {
        Self::with_config(BridgeConfig::default(), transport)
    }

    /// Create an initialized bridge.
    ///
    /// `transport` is only used once an endpoint is set.
    pub fn with_config(config: BridgeConfig, transport: Arc<dyn HostTransport>) -> Self {
        let mut bridge = Self {
            locale: config.locale().to_string(),
            config,
            transport,
            properties: PropertyTable::new(),
            transport_endpoint: None,
            application_data: BTreeMap::new(),
            mock_controller: None,
        };
        bridge.initialize();
        bridge
    }

    /// Reset endpoint, locale, application data and mock controller to
    /// their defaults. Safe to call any number of times.
    ///
    /// Registered properties and the transport survive.
    pub fn initialize(&mut self) {
        self.transport_endpoint = None;
        self.locale = self.config.locale().to_string();
        self.application_data.clear();
        self.mock_controller = None;
        debug!(locale = %self.locale, "bridge initialized");
    }

    /// Shut the bridge down and release the transport.
    pub fn teardown(self) {
        info!(mode = %self.mode(), "bridge teardown");
        self.transport.close();
    }

    /// Which dispatch path `send_command` will take right now.
    pub fn mode(&self) -> BridgeMode {
        if self.transport_endpoint.is_some() {
            BridgeMode::Host
        } else if self.mock_controller.is_some() {
            BridgeMode::Mock
        } else {
            BridgeMode::Unhandled
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // -- State accessors ------------------------------------------------------

    /// Store the endpoint prefix. No validation: a bad endpoint only shows up
    /// when the transport rejects an address.
    pub fn set_transport_endpoint(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        info!(endpoint = %endpoint, "transport endpoint set");
        self.transport_endpoint = Some(endpoint);
    }

    pub fn transport_endpoint(&self) -> Option<&str> {
        self.transport_endpoint.as_deref()
    }

    /// Register the mock controller used when no endpoint is set.
    ///
    /// The table must provide every command in
    /// `BridgeConfig::required_commands`; other names are only checked when
    /// they are dispatched.
    pub fn set_mock_controller(&mut self, controller: CommandTable) -> Result<()> {
        let missing = controller.missing(&self.config.required_commands);
        if !missing.is_empty() {
            return Err(HostlinkError::MissingCommands(missing));
        }
        info!(commands = controller.len(), "mock controller registered");
        self.mock_controller = Some(controller);
        Ok(())
    }

    pub fn mock_controller(&self) -> Option<&CommandTable> {
        self.mock_controller.as_ref()
    }

    /// Store the locale verbatim. An empty value is ignored so the bridge
    /// always has a usable locale.
    pub fn set_locale(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            warn!("ignoring empty locale");
            return;
        }
        self.locale = value;
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Parse `raw_json` and store the result under `key`, replacing any
    /// previous value. Malformed JSON is returned as `Parse` and leaves the
    /// map untouched.
    pub fn set_application_data(&mut self, key: impl Into<String>, raw_json: &str) -> Result<()> {
        let value: Value = serde_json::from_str(raw_json)?;
        self.application_data.insert(key.into(), value);
        Ok(())
    }

    /// The whole application-data map.
    pub fn application_data(&self) -> &BTreeMap<String, Value> {
        &self.application_data
    }

    /// One application-data entry; `None` if the key was never stored.
    pub fn application_data_entry(&self, key: &str) -> Option<&Value> {
        self.application_data.get(key)
    }

    /// Make an extra property readable through `request_host_value`.
    pub fn register_property<F>(&mut self, name: &str, getter: F) -> Result<()>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.properties.register(name, getter)
    }

    // -- Dispatch -------------------------------------------------------------

    /// Read `path` and send its value to the host as `get_value_from_js`.
    ///
    /// Only built-in paths (`locale`, `transport_endpoint`, `app_data`,
    /// `app_data.<key>`) and registered properties resolve; anything else is
    /// `UnknownProperty`. A missing application-data key reads as `null`.
    pub fn request_host_value(&self, path: &str) -> Result<()> {
        let value = self.read_property(&self.properties.resolve(path)?);
        self.send_command(GET_VALUE_COMMAND, &[value]);
        Ok(())
    }

    fn read_property(&self, property: &HostProperty) -> Value {
        match property {
            HostProperty::Locale => Value::String(self.locale.clone()),
            HostProperty::TransportEndpoint => self
                .transport_endpoint
                .clone()
                .map_or(Value::Null, Value::String),
            HostProperty::AppData => Value::Object(
                self.application_data
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            HostProperty::AppDataEntry(key) => self
                .application_data
                .get(key)
                .cloned()
                .unwrap_or(Value::Null),
            HostProperty::Custom(name) => self.properties.read(name).unwrap_or(Value::Null),
        }
    }

    /// Send `command` with positional `args` to the host, or to the mock
    /// controller when no endpoint is set.
    ///
    /// Never fails: encoding, transport and handler errors are logged and
    /// dropped, since a one-way channel has nobody to report them to.
    pub fn send_command(&self, command: &str, args: &[Value]) {
        let outcome = match self.mode() {
            BridgeMode::Host => self.send_to_host(command, args),
            BridgeMode::Mock => self.send_to_mock(command, args),
            BridgeMode::Unhandled => {
                info!(command, args = args.len(), "not handling message: no host or mock");
                return;
            }
        };

        if let Err(err) = outcome {
            match err {
                HostlinkError::Handler(_) => error!(command, error = %err, "command handler failed"),
                _ => warn!(command, error = %err, "command not delivered"),
            }
        }
    }

    fn send_to_host(&self, command: &str, args: &[Value]) -> Result<()> {
        let endpoint = self.transport_endpoint.as_deref().unwrap_or_default();
        let address = build_address(endpoint, command, args)?;
        debug!(%address, "sending message");
        self.transport.dispatch(&address)
    }

    fn send_to_mock(&self, command: &str, args: &[Value]) -> Result<()> {
        let Some(controller) = self.mock_controller.as_ref() else {
            return Err(HostlinkError::Dispatch("no mock controller".into()));
        };
        let method = command.replacen('/', ".", 1);
        let text_args = args.iter().map(arg_text).collect::<Result<Vec<_>>>()?;
        debug!(method = %method, args = ?text_args, "sending message to mock controller");
        catch_unwind(AssertUnwindSafe(|| controller.invoke(&method, &text_args))).unwrap_or_else(
            |payload| {
                Err(HostlinkError::Dispatch(format!(
                    "handler for {method:?} panicked: {}",
                    panic_message(payload.as_ref())
                )))
            },
        )
    }

    /// Report an unhandled UI fault to the host as `web_error`.
    pub fn report_error(&self, message: &str, line: u32, column: u32) {
        let location = format!("line: {line} col: {column}\n\n{message}");
        self.send_command(
            WEB_ERROR_COMMAND,
            &[Value::from(WEB_ERROR_KIND), Value::from(location)],
        );
    }

    /// Apply a callback made by the host shell.
    pub fn apply_host_call(&mut self, call: HostCall) -> Result<()> {
        debug!(?call, "host call");
        match call {
            HostCall::SetProtocol { protocol } => self.set_transport_endpoint(protocol),
            HostCall::SetLocale { locale } => self.set_locale(locale),
            HostCall::SetAppData { key, json } => self.set_application_data(key, &json)?,
            HostCall::GetValue { property } => self.request_host_value(&property)?,
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("mode", &self.mode())
            .field("transport_endpoint", &self.transport_endpoint)
            .field("locale", &self.locale)
            .field("application_data", &self.application_data)
            .field("mock_controller", &self.mock_controller)
            .field("properties", &self.properties)
            .finish()
    }
}
