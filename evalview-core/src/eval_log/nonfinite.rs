//! Non-finite float handling.
//!
//! JSON has no spelling for `NaN` or `Infinity`. Logs written here encode them as
//! the string sentinels `"NaN"`, `"Infinity"` and `"-Infinity"`. Logs produced by
//! other writers may instead contain the bare tokens, which strict JSON parsers
//! reject; [`sanitize_non_finite`] rewrites those into sentinels so the lenient
//! (full-read) path can decode them.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::borrow::Cow;
use std::fmt;

const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// Longest first so `-Infinity` wins over `Infinity`.
const BARE_TOKENS: [&str; 3] = [NEG_INFINITY, INFINITY, NAN];

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_nan() {
        serializer.serialize_str(NAN)
    } else if *value == f64::INFINITY {
        serializer.serialize_str(INFINITY)
    } else if *value == f64::NEG_INFINITY {
        serializer.serialize_str(NEG_INFINITY)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FloatVisitor)
}

struct FloatVisitor;

impl Visitor<'_> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or one of \"NaN\", \"Infinity\", \"-Infinity\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            NAN => Ok(f64::NAN),
            INFINITY => Ok(f64::INFINITY),
            NEG_INFINITY => Ok(f64::NEG_INFINITY),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

/// Rewrites bare `NaN` / `Infinity` / `-Infinity` tokens that appear outside of
/// JSON strings into their quoted sentinels.
///
/// Returns `Cow::Borrowed` when the text contained no bare tokens.
pub fn sanitize_non_finite(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        if let Some(token) = BARE_TOKENS
            .iter()
            .find(|token| bytes[i..].starts_with(token.as_bytes()))
        {
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 16));
            buf.push_str(&text[copied..i]);
            buf.push('"');
            buf.push_str(token);
            buf.push('"');
            i += token.len();
            copied = i;
            continue;
        }

        i += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

/// True when the text holds at least one bare non-finite token.
pub fn contains_non_finite(text: &str) -> bool {
    matches!(sanitize_non_finite(text), Cow::Owned(_))
}
