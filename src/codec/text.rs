// ============================================================================
// Text Codec
// Decimal as UTF-8 bytes, for byte-oriented storage and wire formats
// ============================================================================

use crate::config::DecimalConfig;
use crate::decimal::Decimal;
use crate::numeric::DecimalResult;
use std::fmt::Write;

impl Decimal {
    /// Appends the shortest text form to `out`.
    pub fn append_text(&self, out: &mut String) {
        // fmt::Write for String never fails.
        let _ = write!(out, "{self}");
    }

    /// Text form as bytes; same digits as `Display`.
    pub fn to_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses text bytes under the installed configuration.
    pub fn from_text(text: &[u8]) -> DecimalResult<Self> {
        Self::from_text_with(text, &DecimalConfig::global())
    }

    /// Parses text bytes with the grammar of [`Decimal::parse_with`].
    pub fn from_text_with(text: &[u8], config: &DecimalConfig) -> DecimalResult<Self> {
        Self::parse_bytes_with(text, config)
    }
}
