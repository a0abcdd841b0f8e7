//! Displaced operands: `disp` or `disp(rN)`.
//!
//! `disp` is `$<hex>`, `-<decimal>` or `<decimal>`. The resolved value is
//! packed into the 19-bit two's-complement field shared by load/store
//! offsets, ALU immediates and branch offsets.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;
use crate::reg::Register;

pub const FIELD_BITS: u32 = 19;
pub const FIELD_MASK: u32 = (1 << FIELD_BITS) - 1;

/// Signed range of the field, enforced for decimal displacements.
pub const MAX_DISPLACEMENT: i64 = (1 << (FIELD_BITS - 1)) - 1;
pub const MIN_DISPLACEMENT: i64 = -(1 << (FIELD_BITS - 1));
/// `$hex` displacements are raw bit patterns and may use all 19 bits.
pub const MAX_HEX_PATTERN: i64 = FIELD_MASK as i64;

/// What to do with a displacement that does not fit in 19 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
    #[default]
    Strict,
    /// Keep the low 19 bits.
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Displaced {
    pub base: Register,
    pub value: i64,
    /// `value` packed into the low 19 bits.
    pub field: u32,
}

pub fn parse_displaced(s: &str, mode: RangeMode) -> Result<Displaced, AsmError> {
    let malformed = || AsmError::MalformedOperand(s.to_string());

    let (disp, base) = match s.find('(') {
        Some(open) => {
            let reg = s[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
            if reg.contains(['(', ')']) {
                return Err(malformed());
            }
            (&s[..open], Some(reg))
        }
        None if s.contains(')') => return Err(malformed()),
        None => (s, None),
    };

    let parsed = parse_value(disp).ok_or_else(malformed)?;
    let base = match base {
        Some(reg) => Register::parse(reg)?,
        None => Register::R0,
    };
    let value = parsed?;
    let field = if disp.starts_with('$') {
        encode_pattern(value, mode)?
    } else {
        encode_field(value, mode)?
    };
    Ok(Displaced { base, value, field })
}

/// Outer `None` is a grammar mismatch; inner `Err` is an overflowing literal.
fn parse_value(disp: &str) -> Option<Result<i64, AsmError>> {
    let (digits, radix, negative) = if let Some(hex) = disp.strip_prefix('$') {
        (hex, 16, false)
    } else if let Some(dec) = disp.strip_prefix('-') {
        (dec, 10, true)
    } else {
        (disp, 10, false)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let parsed = match i64::from_str_radix(digits, radix) {
        Ok(m) => Ok(if negative { -m } else { m }),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => {
            let value = if negative { i64::MIN } else { i64::MAX };
            Err(AsmError::DisplacementOutOfRange { value })
        }
        Err(_) => return None,
    };
    Some(parsed)
}

/// Packs `value` into the 19-bit field.
///
/// Negative values are complemented and incremented from the zero-extended
/// magnitude, so the result is the 19-bit two's-complement pattern.
pub fn encode_field(value: i64, mode: RangeMode) -> Result<u32, AsmError> {
    if mode == RangeMode::Strict && !(MIN_DISPLACEMENT..=MAX_DISPLACEMENT).contains(&value) {
        return Err(AsmError::DisplacementOutOfRange { value });
    }
    let magnitude = value.unsigned_abs();
    let bits = if value < 0 {
        (!magnitude).wrapping_add(1)
    } else {
        magnitude
    };
    Ok((bits & FIELD_MASK as u64) as u32)
}

/// Packs a `$hex` bit pattern; in strict mode it must fit 19 unsigned bits.
fn encode_pattern(value: i64, mode: RangeMode) -> Result<u32, AsmError> {
    if mode == RangeMode::Strict && !(0..=MAX_HEX_PATTERN).contains(&value) {
        return Err(AsmError::DisplacementOutOfRange { value });
    }
    Ok((value as u64 & FIELD_MASK as u64) as u32)
}

/// Reads a 19-bit field back as a signed value.
pub fn decode_field(field: u32) -> i32 {
    let s = 32 - FIELD_BITS;
    (((field & FIELD_MASK) << s) as i32) >> s
}
