// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outbound address encoding.
//
// Wire shape:
//   <endpoint><command>
//   <endpoint><command>?<arg1>&<arg2>&...
//
// Each argument is turned into text (scalars stringified, arrays/objects
// rendered as ASCII JSON) and then percent-encoded with the
// `encodeURIComponent` character set. The command name is appended verbatim.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Number, Value};

use hostlink_core::error::{HostlinkError, Result};

use crate::escape::to_ascii_json;

/// Characters left unescaped: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Largest magnitude at which an integral float is still printed in plain
/// decimal rather than exponent form.
const PLAIN_FLOAT_LIMIT: f64 = 1e21;

/// Text form of a single argument, before percent-encoding.
///
/// This is also exactly what a mock controller handler receives.
pub fn arg_text(arg: &Value) -> Result<String> {
    match arg {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Number(n) => Ok(number_text(n)),
        Value::Array(_) | Value::Object(_) => {
            to_ascii_json(arg).map_err(|e| HostlinkError::Encode(e.to_string()))
        }
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < PLAIN_FLOAT_LIMIT => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Percent-encode one component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// `&`-joined, percent-encoded argument list (no leading `?`).
pub fn query_string(args: &[Value]) -> Result<String> {
    let parts = args
        .iter()
        .map(|arg| arg_text(arg).map(|text| encode_component(&text)))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("&"))
}

/// Full address for a command sent to the host.
pub fn build_address(endpoint: &str, command: &str, args: &[Value]) -> Result<String> {
    let mut address = format!("{endpoint}{command}");
    if !args.is_empty() {
        address.push('?');
        address.push_str(&query_string(args)?);
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_args_has_no_separator() {
        let address = build_address("app://cmd/", "ping", &[]).unwrap();
        assert_eq!(address, "app://cmd/ping");
    }

    #[test]
    fn object_arg_is_json_then_percent_encoded() {
        let address = build_address("app://cmd/", "ping", &[json!({"a": 1})]).unwrap();
        assert_eq!(address, "app://cmd/ping?%7B%22a%22%3A1%7D");
    }

    #[test]
    fn one_token_per_scalar_arg() {
        let args = [json!("hello world"), json!(42), json!(true), json!(null)];
        let address = build_address("myapp://", "log", &args).unwrap();
        assert_eq!(address, "myapp://log?hello%20world&42&true&null");

        let query = address.split_once('?').unwrap().1;
        assert_eq!(query.split('&').count(), args.len());
        assert!(!query.ends_with('&'));
    }

    #[test]
    fn separators_inside_args_are_encoded() {
        let address = build_address("x://", "c", &[json!("a&b=c?d/e")]).unwrap();
        assert_eq!(address, "x://c?a%26b%3Dc%3Fd%2Fe");
    }

    #[test]
    fn unreserved_marks_are_kept() {
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn non_ascii_scalar_is_utf8_percent_encoded() {
        assert_eq!(encode_component("\u{e9}"), "%C3%A9");
    }

    #[test]
    fn array_arg_escapes_before_encoding() {
        let text = arg_text(&json!(["a\nb"])).unwrap();
        assert_eq!(text, r#"["a\nb"]"#);
        assert_eq!(encode_component(&text), "%5B%22a%5Cnb%22%5D");
    }

    #[test]
    fn object_keys_are_not_sorted() {
        let arg: Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        assert_eq!(arg_text(&arg).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(arg_text(&json!(1.0)).unwrap(), "1");
        assert_eq!(arg_text(&json!(2.5)).unwrap(), "2.5");
        assert_eq!(arg_text(&json!(-7)).unwrap(), "-7");
        assert_eq!(arg_text(&json!(-0.0)).unwrap(), "0");
    }
}
