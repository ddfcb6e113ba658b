// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoding of addresses sent by the web-side bridge.
//
//   <endpoint><command path>?<token>&<token>...
//
// The command path uses `/` for nesting and becomes a dotted name. A token
// that contains a literal `=` is a keyword argument; everything else is
// positional. Values are percent-decoded, the `empty_string` placeholder
// becomes "", and anything that parses as JSON is returned parsed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde_json::Value;

use hostlink_core::error::{HostlinkError, Result};
use hostlink_core::types::{EMPTY_STRING_TOKEN, validate_command_name};

/// One decoded bridge call.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMessage {
    /// Dotted command name (`web_error`, `ui.set_view`).
    pub command: String,
    pub args: Vec<Value>,
    pub kwargs: BTreeMap<String, Value>,
    pub received_at: DateTime<Utc>,
}

impl HostMessage {
    /// Decode `address`, which must start with `endpoint`.
    pub fn parse(address: &str, endpoint: &str) -> Result<Self> {
        let rest = address.strip_prefix(endpoint).ok_or_else(|| {
            HostlinkError::Decode(format!("{address:?} does not start with {endpoint:?}"))
        })?;

        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let command = path.trim_end_matches('/').replace('/', ".");
        validate_command_name(&command)?;

        let mut args = Vec::new();
        let mut kwargs = BTreeMap::new();
        if !query.is_empty() {
            for token in query.split('&') {
                match token.split_once('=') {
                    Some((name, value)) => {
                        kwargs.insert(decode_text(name)?, decode_value(value)?);
                    }
                    None => args.push(decode_value(token)?),
                }
            }
        }

        Ok(Self {
            command,
            args,
            kwargs,
            received_at: Utc::now(),
        })
    }

    /// Positional argument `idx` as text. Non-string JSON values are
    /// rendered back to compact JSON.
    pub fn arg_text(&self, idx: usize) -> Option<String> {
        self.args.get(idx).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn decode_text(raw: &str) -> Result<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|e| HostlinkError::Decode(format!("argument {raw:?} is not UTF-8: {e}")))
}

fn decode_value(raw: &str) -> Result<Value> {
    let text = decode_text(raw)?;
    if text == EMPTY_STRING_TOKEN {
        return Ok(Value::String(String::new()));
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
