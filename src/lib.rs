//! Encoded Polyline codec for sequences of N-dimensional coordinates.
//!
//! Each axis is scaled to a fixed-point integer, delta-coded against the
//! previous coordinate, zig-zag mapped, and written as printable ASCII
//! varint bytes (Google's Encoded Polyline Algorithm Format).
//!
//! The crate provides:
//! - Raw varint encoding (`varint`)
//! - Codec configuration and single-coordinate encoding (`codec`)
//! - Delta-coded sequences (`sequence`)
//! - A pluggable simplification step (`simplify`)
//! - Parallel batch helpers (`parallel` feature)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use polyline_codec::Codec;
//!
//! let points = [[38.5, -120.2], [40.7, -120.95], [43.252, -126.453]];
//!
//! let mut buf = Vec::new();
//! Codec::DEFAULT.encode(&mut buf, &points).unwrap();
//! assert_eq!(buf, b"_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//!
//! let (decoded, _) = Codec::DEFAULT.decode(&buf).unwrap();
//! assert_eq!(decoded.len(), 3);
//! ```

pub mod codec;
pub mod error;
pub mod sequence;
pub mod simplify;
pub mod varint;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "cli")]
pub mod cli;

pub use codec::{Codec, DEFAULT_DIM, DEFAULT_SCALE, round_half_away};
pub use error::{ConfigError, DecodeError, EncodeError};
pub use sequence::{SequenceDecoder, SequenceEncoder};
pub use simplify::{Identity, Point, Simplifier};
pub use varint::{MAX_VARINT_LEN, decode_int, decode_uint, encode_int, encode_uint};

// ---------------------------------------------------------------------------
// Default-codec shorthands
// ---------------------------------------------------------------------------

/// Encode `coords` with [`Codec::DEFAULT`], appending to `buf`.
pub fn encode_coords<C: AsRef<[f64]>>(buf: &mut Vec<u8>, coords: &[C]) -> Result<(), EncodeError> {
    Codec::DEFAULT.encode(buf, coords)
}

/// Decode a polyline with [`Codec::DEFAULT`].
pub fn decode_coords(buf: &[u8]) -> Result<(Vec<Vec<f64>>, &[u8]), DecodeError> {
    Codec::DEFAULT.decode(buf)
}

/// Encode one absolute coordinate with [`Codec::DEFAULT`].
pub fn encode_coord(buf: &mut Vec<u8>, coord: &[f64]) -> Result<(), EncodeError> {
    Codec::DEFAULT.encode_coord(buf, coord)
}

/// Decode one absolute coordinate with [`Codec::DEFAULT`].
pub fn decode_coord(buf: &[u8]) -> Result<(Vec<f64>, &[u8]), DecodeError> {
    Codec::DEFAULT.decode_coord(buf)
}
