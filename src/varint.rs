// Encoded Polyline variable-length integers.
//
// Base-32, little-endian: least-significant group first.
// Continuation bytes carry 5 data bits offset by 95 ([95, 127)).
// The terminal byte carries the remaining bits offset by 63 ([63, 95)).
// Signed values are zig-zag mapped before encoding.
//
// The target width is fixed at 64 bits regardless of the host word size.

use crate::error::DecodeError;

/// Maximum encoded length for a 64-bit value (12 full groups + 4 bits).
pub const MAX_VARINT_LEN: usize = 13;

/// Offset added to a terminal byte's payload.
const TERMINAL_BASE: u8 = 63;

/// Offset added to a continuation byte's payload.
const CONTINUATION_BASE: u8 = 95;

/// One past the largest valid byte.
const BYTE_LIMIT: u8 = 127;

/// Number of full 5-bit groups that fit in a `u64`.
const FULL_GROUPS: usize = 64 / 5;

/// Largest payload the byte after `FULL_GROUPS` continuations may carry.
const LAST_GROUP_MAX: u8 = (1 << (64 - 5 * FULL_GROUPS)) - 1;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Append the encoding of `value` to `buf`.
#[inline]
pub fn encode_uint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 32 {
        buf.push((value & 0x1F) as u8 + CONTINUATION_BASE);
        value >>= 5;
    }
    buf.push(value as u8 + TERMINAL_BASE);
}

/// Append the zig-zag encoding of `value` to `buf`.
#[inline]
pub fn encode_int(buf: &mut Vec<u8>, value: i64) {
    encode_uint(buf, zigzag_encode(value));
}

/// Map a signed integer onto the unsigned range so small magnitudes of
/// either sign stay small.
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    if value < 0 {
        !(value << 1) as u64
    } else {
        (value << 1) as u64
    }
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    if value & 1 == 0 {
        (value >> 1) as i64
    } else if value == u64::MAX {
        i64::MIN
    } else {
        -(((value + 1) >> 1) as i64)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode one unsigned integer from the front of `buf`.
///
/// Returns the value and the unconsumed remainder of `buf`. Offsets in
/// [`DecodeError::InvalidByte`] are relative to the start of `buf`.
pub fn decode_uint(buf: &[u8]) -> Result<(u64, &[u8]), DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut value: u64 = 0;
    let mut shift = 0u32;
    for (i, &byte) in buf.iter().take(FULL_GROUPS).enumerate() {
        match byte {
            CONTINUATION_BASE..BYTE_LIMIT => {
                value |= u64::from(byte - CONTINUATION_BASE) << shift;
                shift += 5;
            }
            TERMINAL_BASE..CONTINUATION_BASE => {
                value |= u64::from(byte - TERMINAL_BASE) << shift;
                return Ok((value, &buf[i + 1..]));
            }
            _ => return Err(DecodeError::InvalidByte { byte, offset: i }),
        }
    }

    // Every byte so far was a continuation.
    let Some(&last) = buf.get(FULL_GROUPS) else {
        return Err(DecodeError::UnterminatedSequence);
    };
    match last {
        b if (TERMINAL_BASE..=TERMINAL_BASE + LAST_GROUP_MAX).contains(&b) => {
            value |= u64::from(b - TERMINAL_BASE) << shift;
            Ok((value, &buf[FULL_GROUPS + 1..]))
        }
        TERMINAL_BASE..BYTE_LIMIT => Err(DecodeError::Overflow),
        byte => Err(DecodeError::InvalidByte {
            byte,
            offset: FULL_GROUPS,
        }),
    }
}

/// Decode one zig-zag encoded signed integer from the front of `buf`.
pub fn decode_int(buf: &[u8]) -> Result<(i64, &[u8]), DecodeError> {
    let (value, rest) = decode_uint(buf)?;
    Ok((zigzag_decode(value), rest))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Return the encoded byte-length of an unsigned value (1..=13).
#[inline]
pub fn uint_encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros();
    bits.max(1).div_ceil(5) as usize
}

/// Return the encoded byte-length of a signed value (1..=13).
#[inline]
pub fn int_encoded_len(value: i64) -> usize {
    uint_encoded_len(zigzag_encode(value))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
