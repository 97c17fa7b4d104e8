// ============================================================================
// Binary Codec
// Compact big-endian encoding: [flags, prec, total_len, coefficient...]
// ============================================================================
//
// Layout:
//
//     byte 0    flags: bit 1 = overflow, bit 0 = sign
//     byte 1    precision (0..=19)
//     byte 2    total encoded length, header included
//     byte 3..  coefficient, big-endian
//
// A 128-bit coefficient takes 8 bytes when its high word is zero and 16
// otherwise. An overflowed coefficient takes as many bytes as it needs, up to
// the 255-byte total the length byte can describe.

use crate::config::MAX_PRECISION;
use crate::decimal::Decimal;
use crate::numeric::{DecimalError, DecimalResult, Fixed128, OverflowCoefficient};
use num_bigint::BigUint;
use smallvec::SmallVec;
use tracing::debug;

/// Sign bit of the flags byte
const SIGN_FLAG: u8 = 0b01;

/// Overflow bit of the flags byte
const OVERFLOW_FLAG: u8 = 0b10;

const HEADER_LEN: usize = 3;

/// Largest inline encoding: header plus a 16-byte coefficient.
pub const MAX_FIXED_ENCODED_LEN: usize = HEADER_LEN + 16;

/// Encoded bytes; fast-path values never allocate.
pub type EncodedDecimal = SmallVec<[u8; MAX_FIXED_ENCODED_LEN]>;

impl Decimal {
    /// Encodes the value in the binary layout.
    ///
    /// # Errors
    /// Returns `MaxLengthExceeded` if an overflowed coefficient needs more
    /// than 252 bytes.
    pub fn to_bytes(&self) -> DecimalResult<EncodedDecimal> {
        let mut flags = if self.is_neg() { SIGN_FLAG } else { 0 };
        let mut out = EncodedDecimal::new();

        match self.coefficient() {
            OverflowCoefficient::Fixed(coef) => {
                let len = if coef.hi() == 0 { HEADER_LEN + 8 } else { MAX_FIXED_ENCODED_LEN };
                // Both lengths are below 256.
                out.extend_from_slice(&[flags, self.prec(), len as u8]);
                if coef.hi() != 0 {
                    out.extend_from_slice(&coef.hi().to_be_bytes());
                }
                out.extend_from_slice(&coef.lo().to_be_bytes());
            },
            OverflowCoefficient::Big(coef) => {
                flags |= OVERFLOW_FLAG;
                let bytes = coef.to_bytes_be();
                let len = u8::try_from(HEADER_LEN + bytes.len())
                    .map_err(|_| DecimalError::MaxLengthExceeded)?;
                out.extend_from_slice(&[flags, self.prec(), len]);
                out.extend_from_slice(&bytes);
            },
        }

        Ok(out)
    }

    /// Decodes the binary layout produced by [`Decimal::to_bytes`].
    ///
    /// # Errors
    /// Returns `InvalidBinaryData` for a short buffer, a length byte that
    /// disagrees with the buffer, unknown flag bits, a precision above 19 or a
    /// fixed coefficient that is neither 8 nor 16 bytes.
    pub fn from_bytes(data: &[u8]) -> DecimalResult<Self> {
        let (header, payload) = match data.split_first_chunk::<HEADER_LEN>() {
            Some(parts) => parts,
            None => return Err(reject("buffer shorter than header", data.len())),
        };
        let [flags, prec, len] = *header;

        if usize::from(len) != data.len() {
            return Err(reject("length byte disagrees with buffer", data.len()));
        }
        if flags & !(SIGN_FLAG | OVERFLOW_FLAG) != 0 {
            return Err(reject("unknown flag bits", usize::from(flags)));
        }
        if prec > MAX_PRECISION {
            return Err(reject("precision out of range", usize::from(prec)));
        }

        let neg = flags & SIGN_FLAG != 0;
        let coef = if flags & OVERFLOW_FLAG != 0 {
            if payload.is_empty() {
                return Err(reject("empty overflow coefficient", data.len()));
            }
            OverflowCoefficient::from_big(BigUint::from_bytes_be(payload))
        } else {
            decode_fixed(payload)?.into()
        };

        Ok(Self::from_parts(neg, coef, prec))
    }
}

fn decode_fixed(payload: &[u8]) -> DecimalResult<Fixed128> {
    if let Ok(lo) = <[u8; 8]>::try_from(payload) {
        return Ok(Fixed128::from_u64(u64::from_be_bytes(lo)));
    }
    if let Ok(word) = <[u8; 16]>::try_from(payload) {
        return Ok(Fixed128::from_u128(u128::from_be_bytes(word)));
    }
    Err(reject("fixed coefficient must be 8 or 16 bytes", payload.len()))
}

#[cold]
fn reject(reason: &'static str, value: usize) -> DecimalError {
    debug!(reason, value, "rejected binary decimal");
    DecimalError::InvalidBinaryData
}
