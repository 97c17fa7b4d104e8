// ============================================================================
// JSON Codec
// Decimals as quoted JSON strings; `null` reads as zero
// ============================================================================
//
// Quoting keeps every digit: JSON numbers go through f64 in most readers.
// Unquoted numbers are still accepted on input.

use crate::config::DecimalConfig;
use crate::decimal::Decimal;
use crate::numeric::DecimalResult;

#[cfg(feature = "serde")]
use serde::{de, ser, Deserialize, Deserializer, Serialize};
#[cfg(feature = "serde")]
use std::fmt;

impl Decimal {
    /// JSON encoding: the text form in double quotes.
    pub fn to_json(&self) -> String {
        format!("\"{self}\"")
    }

    /// Decodes a JSON value under the installed configuration.
    pub fn from_json(json: &[u8]) -> DecimalResult<Self> {
        Self::from_json_with(json, &DecimalConfig::global())
    }

    /// Decodes a quoted or bare decimal; the literal `null` yields zero.
    /// Whitespace around the value is ignored.
    ///
    /// # Errors
    /// Any parse error of the unquoted text.
    pub fn from_json_with(json: &[u8], config: &DecimalConfig) -> DecimalResult<Self> {
        let json = json.trim_ascii();
        if json == b"null" {
            return Ok(Self::ZERO);
        }

        let text = json
            .strip_prefix(b"\"")
            .and_then(|rest| rest.strip_suffix(b"\""))
            .unwrap_or(json);
        Self::parse_bytes_with(text, config)
    }
}

// ============================================================================
// serde
// ============================================================================

/// Serializes as a decimal string
#[cfg(feature = "serde")]
impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Deserializes from a decimal string, an integer, a float (lossy) or null
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

#[cfg(feature = "serde")]
struct DecimalVisitor;

#[cfg(feature = "serde")]
impl<'de> de::Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("string-encoded decimal")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Decimal::parse(v).map_err(|e| E::custom(format_args!("invalid decimal '{v}': {e}")))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Decimal::from_f64(v).map_err(E::custom)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Decimal::ZERO)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Decimal::ZERO)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

#[cfg(feature = "serde")]
impl Decimal {
    /// The value as a JSON string node.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }

    /// Reads a JSON node: strings and numbers parse, `null` is zero.
    ///
    /// # Errors
    /// `InvalidFormat` for booleans, arrays and objects; otherwise any parse
    /// error.
    pub fn from_json_value(value: &serde_json::Value) -> DecimalResult<Self> {
        use crate::numeric::DecimalError;
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::ZERO),
            Value::String(s) => Self::parse(s),
            // Number's Display is its shortest round-trip form.
            Value::Number(n) => Self::parse(&n.to_string()),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(DecimalError::InvalidFormat),
        }
    }
}
