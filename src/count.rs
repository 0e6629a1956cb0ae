//! Parsing of the chunk size and the total length.
//!
//! Lengths are unbounded and may be written as plain digits (`_` allowed
//! between them), in scientific form (`1e100`) or as a power (`10^100`).

use std::num::NonZeroUsize;

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Largest exponent accepted in `AeB` and `A^B` forms.
pub const MAX_EXPONENT: u32 = 100_000;

/// Largest chunk accepted. The whole chunk is rendered into one buffer.
pub const MAX_CHUNK: usize = 1 << 24;

pub fn parse_chunk(input: &str) -> Result<NonZeroUsize> {
    input
        .trim()
        .parse::<NonZeroUsize>()
        .ok()
        .filter(|chunk| chunk.get() <= MAX_CHUNK)
        .ok_or_else(|| Error::InvalidChunk(input.to_string()))
}

pub fn parse_length(input: &str) -> Result<BigUint> {
    let invalid = |reason: &'static str| Error::InvalidLength {
        input: input.to_string(),
        reason,
    };
    let trimmed = input.trim();

    if let Some((mantissa, exponent)) = trimmed.split_once(|c: char| c == 'e' || c == 'E') {
        let mantissa = digits(mantissa).ok_or_else(|| invalid("bad mantissa"))?;
        let exponent = exponent_of(exponent).ok_or_else(|| invalid("bad exponent"))?;
        return Ok(mantissa * BigUint::from(10u32).pow(exponent));
    }

    if let Some((base, exponent)) = trimmed.split_once('^') {
        let base = digits(base).ok_or_else(|| invalid("bad base"))?;
        let exponent = exponent_of(exponent).ok_or_else(|| invalid("bad exponent"))?;
        if base.bits().saturating_mul(u64::from(exponent)) > u64::from(MAX_EXPONENT) * 4 {
            return Err(invalid("value too large"));
        }
        return Ok(base.pow(exponent));
    }

    digits(trimmed).ok_or_else(|| invalid("expected digits"))
}

fn digits(input: &str) -> Option<BigUint> {
    if input.starts_with('_') || input.ends_with('_') {
        return None;
    }
    let cleaned: Vec<u8> = input.bytes().filter(|&b| b != b'_').collect();
    if cleaned.is_empty() || !cleaned.iter().all(u8::is_ascii_digit) {
        return None;
    }
    BigUint::parse_bytes(&cleaned, 10)
}

fn exponent_of(input: &str) -> Option<u32> {
    let exponent = input.parse::<u32>().ok()?;
    (exponent <= MAX_EXPONENT).then_some(exponent)
}
