// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared wire-level types for the Hostlink bridge.

use serde::{Deserialize, Serialize};

use crate::error::{HostlinkError, Result};

/// Command the web layer uses to answer a host value request.
pub const GET_VALUE_COMMAND: &str = "get_value_from_js";

/// Command the web layer uses to report an unhandled UI-side fault.
pub const WEB_ERROR_COMMAND: &str = "web_error";

/// Placeholder token the host decodes to an empty string argument.
pub const EMPTY_STRING_TOKEN: &str = "empty_string";

/// Address prefix that outbound commands are appended to, e.g. `myapp://`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint(String);

impl Endpoint {
    /// Build an endpoint from an app protocol.
    ///
    /// A bare scheme name gets `://` appended; anything already containing
    /// `://` is kept as-is.
    pub fn from_protocol(protocol: &str) -> Self {
        if protocol.contains("://") {
            Self(protocol.to_string())
        } else {
            Self(format!("{protocol}://"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which path `send_command` takes, derived from the bridge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeMode {
    /// An endpoint is set: commands go to the native host.
    Host,
    /// No endpoint, but a mock controller is registered.
    Mock,
    /// Neither is configured; commands are dropped.
    Unhandled,
}

impl std::fmt::Display for BridgeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Host => "host",
            Self::Mock => "mock",
            Self::Unhandled => "unhandled",
        };
        f.write_str(name)
    }
}

/// Callback the host shell makes into the web-side bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    /// Switch the bridge into host mode using this protocol.
    SetProtocol { protocol: String },
    /// Change the UI locale.
    SetLocale { locale: String },
    /// Store a JSON document under `key`. `json` is raw text; the bridge parses it.
    SetAppData { key: String, json: String },
    /// Ask the bridge to send back the value of a property.
    GetValue { property: String },
}

/// Check that a name can be registered in a command table.
///
/// Accepted: ASCII letters, digits and `_`, optionally grouped into
/// dot-separated segments (`ui.set_view`). Empty segments are rejected.
pub fn validate_command_name(name: &str) -> Result<()> {
    let well_formed = !name.is_empty()
        && name.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if well_formed {
        Ok(())
    } else {
        Err(HostlinkError::InvalidCommandName(name.to_string()))
    }
}
