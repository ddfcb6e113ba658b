// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// 7-bit clean JSON rendering for values that travel inside bridge addresses.
//
// serde_json already escapes `"`, `\`, and everything below 0x20 (short forms
// for \b \t \n \f \r, `\u00XX` otherwise). The formatter below additionally
// turns DEL and every non-ASCII char into `\uXXXX` escapes, one per UTF-16
// code unit, so the output is plain ASCII before it is percent-encoded.

use std::io;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};

/// First code point that is escaped even though serde_json would pass it through.
const FIRST_ESCAPED: u32 = 0x7f;

/// JSON formatter that emits ASCII-only output.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (ch as u32) < FIRST_ESCAPED {
                continue;
            }
            if start < idx {
                writer.write_all(fragment[start..idx].as_bytes())?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Render `value` as compact, ASCII-only JSON text.
pub fn to_ascii_json(value: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(64);
    let mut ser = Serializer::with_formatter(&mut buf, AsciiFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        to_ascii_json(&value).unwrap()
    }

    #[test]
    fn short_escapes() {
        assert_eq!(render(json!("a\nb")), r#""a\nb""#);
        assert_eq!(render(json!("\t\r\u{8}\u{c}")), r#""\t\r\b\f""#);
        assert_eq!(render(json!("back\\slash")), r#""back\\slash""#);
    }

    #[test]
    fn quotes_stay_valid_json() {
        assert_eq!(render(json!("say \"hi\"")), r#""say \"hi\"""#);
    }

    #[test]
    fn control_range_uses_unicode_escape() {
        assert_eq!(render(json!("\u{0}\u{1f}")), r#""\u0000\u001f""#);
    }

    #[test]
    fn del_and_non_ascii_are_escaped() {
        assert_eq!(render(json!("\u{7f}")), r#""\u007f""#);
        assert_eq!(render(json!("caf\u{e9}")), r#""caf\u00e9""#);
        assert_eq!(render(json!("\u{20ac}")), r#""\u20ac""#);
    }

    #[test]
    fn astral_chars_become_surrogate_pairs() {
        assert_eq!(render(json!("\u{1f600}")), r#""\ud83d\ude00""#);
    }

    #[test]
    fn printable_ascii_passes_through() {
        let printable: String = (0x20u8..0x7f)
            .map(char::from)
            .filter(|c| *c != '"' && *c != '\\')
            .collect();
        assert_eq!(render(json!(printable.clone())), format!("\"{printable}\""));
    }

    #[test]
    fn object_keys_are_escaped_too() {
        assert_eq!(render(json!({"k\u{e9}y": 1})), r#"{"k\u00e9y":1}"#);
    }

    #[test]
    fn output_is_ascii_and_parses_back() {
        let original = json!({
            "text": "line\none\u{7f}\u{1}\u{fc}\u{1f600}",
            "list": [1, "zwei", null, true],
        });
        let text = render(original.clone());
        assert!(text.is_ascii());
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }
}
