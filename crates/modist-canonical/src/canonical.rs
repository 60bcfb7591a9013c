//! Canonical JSON serialization

use crate::error::CanonicalError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write as FmtWrite;

/// Serialize a value to canonical JSON bytes
///
/// # Rules
///
/// - Object keys sorted lexicographically
/// - Arrays preserve order
/// - No whitespace
/// - ASCII-only output (non-ASCII text is `\uXXXX`-escaped)
/// - Non-integer numbers are rejected (use strings)
///
/// # Errors
///
/// Returns `CanonicalError::UnsupportedNumber` if any non-integer number
/// is detected.
///
/// # Example
///
/// ```rust
/// use modist_canonical::to_canonical_json;
///
/// let value = serde_json::json!({"z": 1, "a": 2});
/// let canonical = to_canonical_json(&value).unwrap();
/// assert_eq!(canonical, b"{\"a\":2,\"z\":1}");
/// ```
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    let json_value = serde_json::to_value(value)?;
    canonical_json_value(&json_value)
}

/// Serialize a serde_json::Value to canonical JSON bytes
pub fn to_canonical_json_value(value: &Value) -> Result<Vec<u8>, CanonicalError> {
    canonical_json_value(value)
}

/// Serialize a value to canonical JSON string
pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    let bytes = to_canonical_json(value)?;
    // Safe because the output is ASCII by construction
    Ok(String::from_utf8(bytes).expect("canonical JSON is always valid UTF-8"))
}

fn canonical_json_value(value: &Value) -> Result<Vec<u8>, CanonicalError> {
    let mut output = Vec::new();
    write_canonical_value(&mut output, value)?;
    Ok(output)
}

/// Write a JSON value in canonical form
fn write_canonical_value(output: &mut Vec<u8>, value: &Value) -> Result<(), CanonicalError> {
    match value {
        Value::Null => {
            output.extend_from_slice(b"null");
        }
        Value::Bool(b) => {
            if *b {
                output.extend_from_slice(b"true");
            } else {
                output.extend_from_slice(b"false");
            }
        }
        Value::Number(n) => {
            // Only integers have a platform-independent rendering
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                return Err(CanonicalError::UnsupportedNumber);
            }
            output.extend_from_slice(n.to_string().as_bytes());
        }
        Value::String(s) => {
            write_canonical_string(output, s);
        }
        Value::Array(arr) => {
            output.push(b'[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    output.push(b',');
                }
                write_canonical_value(output, item)?;
            }
            output.push(b']');
        }
        Value::Object(obj) => {
            write_canonical_object(output, obj)?;
        }
    }
    Ok(())
}

/// Write a JSON object with sorted keys
fn write_canonical_object(
    output: &mut Vec<u8>,
    obj: &Map<String, Value>,
) -> Result<(), CanonicalError> {
    output.push(b'{');

    // Sort keys lexicographically by UTF-8 bytes
    let mut keys: Vec<&String> = obj.keys().collect();
    keys.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));

    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            output.push(b',');
        }

        write_canonical_string(output, key);
        output.push(b':');

        if let Some(value) = obj.get(*key) {
            write_canonical_value(output, value)?;
        }
    }

    output.push(b'}');
    Ok(())
}

/// Write a JSON string with ASCII-only escaping
///
/// Non-ASCII characters never appear raw in the output. This guarantees the
/// same byte sequence regardless of the encoding environment of whatever
/// produced or re-serialized the manifest.
fn write_canonical_string(output: &mut Vec<u8>, s: &str) {
    output.push(b'"');

    for c in s.chars() {
        match c {
            '"' => output.extend_from_slice(b"\\\""),
            '\\' => output.extend_from_slice(b"\\\\"),
            '\u{0008}' => output.extend_from_slice(b"\\b"),
            '\u{000c}' => output.extend_from_slice(b"\\f"),
            '\n' => output.extend_from_slice(b"\\n"),
            '\r' => output.extend_from_slice(b"\\r"),
            '\t' => output.extend_from_slice(b"\\t"),
            c if c.is_ascii() && !c.is_ascii_control() => {
                output.push(c as u8);
            }
            c => {
                write_unicode_escape(output, c);
            }
        }
    }

    output.push(b'"');
}

/// Escape a character as `\uXXXX`, with a surrogate pair above the BMP
fn write_unicode_escape(output: &mut Vec<u8>, c: char) {
    let code = c as u32;
    let mut buf = String::new();
    if code <= 0xFFFF {
        write!(buf, "\\u{:04x}", code).unwrap();
    } else {
        let v = code - 0x1_0000;
        let high = 0xD800 + (v >> 10);
        let low = 0xDC00 + (v & 0x3FF);
        write!(buf, "\\u{:04x}\\u{:04x}", high, low).unwrap();
    }
    output.extend_from_slice(buf.as_bytes());
}
