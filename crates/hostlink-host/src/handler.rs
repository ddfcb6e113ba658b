// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host-side dispatch of decoded bridge messages.
//
// App commands live in a `HostCommands` table. `get_value_from_js` is
// reserved: its first argument is stored in the handler's `ValueSlot` so
// that `request_value` can hand it back to whoever asked.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::{Endpoint, GET_VALUE_COMMAND, HostCall, validate_command_name};

use crate::message::HostMessage;
use crate::value_slot::ValueSlot;

/// Handler for one host command.
pub type HostHandler = Arc<dyn Fn(&HostMessage) -> Result<()> + Send + Sync>;

/// Host commands keyed by dotted name.
#[derive(Clone, Default)]
pub struct HostCommands {
    handlers: BTreeMap<String, HostHandler>,
}

impl HostCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`. `get_value_from_js` is reserved.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<&mut Self>
    where
        F: Fn(&HostMessage) -> Result<()> + Send + Sync + 'static,
    {
        validate_command_name(name)?;
        if name == GET_VALUE_COMMAND {
            return Err(HostlinkError::InvalidCommandName(format!(
                "{name} is handled by the bridge itself"
            )));
        }
        self.handlers.insert(name.to_string(), Arc::new(handler));
        Ok(self)
    }

    pub fn with<F>(mut self, name: &str, handler: F) -> Result<Self>
    where
        F: Fn(&HostMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.register(name, handler)?;
        Ok(self)
    }

    pub fn resolve(&self, name: &str) -> Option<&HostHandler> {
        self.handlers.get(name)
    }
}

impl std::fmt::Debug for HostCommands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCommands")
            .field("commands", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Decodes and dispatches addresses arriving from the web layer.
#[derive(Debug)]
pub struct MessageHandler {
    endpoint: Endpoint,
    commands: HostCommands,
    values: ValueSlot,
    value_timeout: Duration,
    message_received: AtomicBool,
}

impl MessageHandler {
    pub fn new(endpoint: Endpoint, commands: HostCommands) -> Self {
        Self::with_config(endpoint, commands, &BridgeConfig::default())
    }

    /// Take the value-request timeout from `config`.
    pub fn with_config(endpoint: Endpoint, commands: HostCommands, config: &BridgeConfig) -> Self {
        Self {
            endpoint,
            commands,
            values: ValueSlot::new(),
            value_timeout: config.value_timeout(),
            message_received: AtomicBool::new(false),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether `address` is meant for this handler at all.
    pub fn accepts(&self, address: &str) -> bool {
        address.starts_with(self.endpoint.as_str())
    }

    /// Decode and dispatch one address. Returns `true` if a handler ran
    /// successfully; failures are logged.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub fn handle(&self, address: &str) -> bool {
        let outcome = HostMessage::parse(address, self.endpoint.as_str())
            .and_then(|message| self.dispatch(&message));
        match outcome {
            Ok(()) => true,
            Err(err @ HostlinkError::Handler(_)) => {
                error!(error = %err, "host command failed");
                false
            }
            Err(err) => {
                warn!(error = %err, "message not handled");
                false
            }
        }
    }

    /// Run the handler for an already decoded message.
    pub fn dispatch(&self, message: &HostMessage) -> Result<()> {
        debug!(command = %message.command, args = message.args.len(), "dispatching");
        if message.command == GET_VALUE_COMMAND {
            let value = message.args.first().cloned().unwrap_or(Value::Null);
            self.values.put(value);
        } else {
            let handler = self.commands.resolve(&message.command).ok_or_else(|| {
                HostlinkError::Dispatch(format!("no host command {:?}", message.command))
            })?;
            handler(message)?;
        }
        self.message_received.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Set once any message has been dispatched successfully.
    pub fn message_received(&self) -> bool {
        self.message_received.load(Ordering::SeqCst)
    }

    /// Reset the received flag, e.g. before triggering a UI action in a test
    /// and waiting for its answer.
    pub fn clear_message_received_flag(&self) {
        self.message_received.store(false, Ordering::SeqCst);
    }

    /// Ask the web layer for `property` and wait for its answer.
    ///
    /// `send` delivers the host call to the web view. Any stale unread value
    /// is discarded first. Fails with `Timeout` if no answer arrives within
    /// the configured value timeout.
    pub async fn request_value<F>(&self, property: &str, send: F) -> Result<Value>
    where
        F: FnOnce(HostCall) -> Result<()>,
    {
        if let Some(stale) = self.values.take() {
            debug!(?stale, "discarding unread value");
        }
        send(HostCall::GetValue {
            property: property.to_string(),
        })?;
        self.values.wait(property, self.value_timeout).await
    }
}
