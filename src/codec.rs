// Codec configuration and single-coordinate encoding.
//
// A coordinate is `dim` real values. Each axis is scaled to a fixed-point
// integer with round-half-away-from-zero and written as one signed varint.

use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::varint;

/// Dimensionality of the default codec (latitude, longitude).
pub const DEFAULT_DIM: usize = 2;

/// Fixed-point scale of the default codec (5 decimal places).
pub const DEFAULT_SCALE: f64 = 1e5;

/// Immutable codec parameters: number of axes per coordinate and the
/// fixed-point scale applied to every axis.
///
/// `Codec` is `Copy` and holds no interior state, so one value can be shared
/// freely between threads and calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Codec {
    dim: usize,
    scale: f64,
}

impl Default for Codec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Codec {
    /// Two axes scaled by 1e5, as used by Google Maps polylines.
    pub const DEFAULT: Codec = Codec {
        dim: DEFAULT_DIM,
        scale: DEFAULT_SCALE,
    };

    /// Create a codec with `dim` axes per coordinate and the given scale.
    pub fn new(dim: usize, scale: f64) -> Result<Self, ConfigError> {
        if dim == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(Self { dim, scale })
    }

    /// Number of axes per coordinate.
    #[inline]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Fixed-point scale factor.
    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert one axis value to its fixed-point integer.
    #[inline]
    pub fn to_fixed(&self, value: f64) -> i64 {
        round_half_away(self.scale * value)
    }

    /// Convert a fixed-point integer back to an axis value.
    #[inline]
    pub fn from_fixed(&self, value: i64) -> f64 {
        value as f64 / self.scale
    }

    pub(crate) fn check_dim(&self, actual: usize) -> Result<(), EncodeError> {
        if actual != self.dim {
            return Err(EncodeError::DimensionalMismatch {
                expected: self.dim,
                actual,
            });
        }
        Ok(())
    }

    /// Append the encoding of one absolute coordinate to `buf`.
    ///
    /// Fails without touching `buf` if `coord.len()` differs from the codec
    /// dimension.
    pub fn encode_coord(&self, buf: &mut Vec<u8>, coord: &[f64]) -> Result<(), EncodeError> {
        self.check_dim(coord.len())?;
        for &x in coord {
            varint::encode_int(buf, self.to_fixed(x));
        }
        Ok(())
    }

    /// Decode one absolute coordinate from the front of `buf`.
    ///
    /// Returns the coordinate and the unconsumed bytes. Running out of bytes
    /// partway through a coordinate is an error.
    pub fn decode_coord<'a>(&self, buf: &'a [u8]) -> Result<(Vec<f64>, &'a [u8]), DecodeError> {
        let mut fixed = vec![0i64; self.dim];
        let rest = self.decode_fixed(buf, &mut fixed)?;
        let coord = fixed.into_iter().map(|v| self.from_fixed(v)).collect();
        Ok((coord, rest))
    }

    /// Decode `out.len()` signed varints from `buf` into `out`.
    ///
    /// Byte offsets in errors are relative to the start of `buf`.
    pub(crate) fn decode_fixed<'a>(
        &self,
        buf: &'a [u8],
        out: &mut [i64],
    ) -> Result<&'a [u8], DecodeError> {
        let mut rest = buf;
        for slot in out.iter_mut() {
            let consumed = buf.len() - rest.len();
            let (value, tail) = varint::decode_int(rest).map_err(|e| e.rebase(consumed))?;
            *slot = value;
            rest = tail;
        }
        Ok(rest)
    }
}

/// Round to the nearest integer, ties away from zero.
///
/// Computed as `floor(x + 0.5)` for non-negative `x` and `-floor(-x + 0.5)`
/// otherwise. The cast saturates: NaN maps to 0 and out-of-range values to
/// `i64::MIN` / `i64::MAX`.
#[inline]
pub fn round_half_away(x: f64) -> i64 {
    if x < 0.0 {
        -(-x + 0.5).floor() as i64
    } else {
        (x + 0.5).floor() as i64
    }
}
