// ============================================================================
// Codec Module
// Text, JSON and binary (de)serialization of decimals
// ============================================================================
//
// All three build on the decimal's own formatting and parsing:
// - text: the `Display` digits as bytes
// - json: a quoted string, with `null` read as zero (serde impls behind the
//   `serde` feature)
// - binary: a 3-byte header followed by the big-endian coefficient

mod binary;
mod json;
mod text;

pub use binary::{EncodedDecimal, MAX_FIXED_ENCODED_LEN};
