// Error types for polyline encoding and decoding.

use thiserror::Error;

/// Error returned when a byte buffer cannot be decoded.
///
/// Every decode error is terminal: the call that produced it returns no
/// partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// At least one more byte was expected but the buffer is empty.
    #[error("empty")]
    Empty,

    /// A byte outside the encoding range `[63, 127)`.
    #[error("invalid byte {byte} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    /// The buffer ended before a terminal byte was found.
    #[error("unterminated sequence")]
    UnterminatedSequence,

    /// The encoded value does not fit in 64 bits.
    #[error("overflow")]
    Overflow,

    /// A decoded coordinate count is inconsistent with the codec dimension.
    #[error("dimensional mismatch: expected {expected} axes, found {actual}")]
    DimensionalMismatch { expected: usize, actual: usize },
}

impl DecodeError {
    /// Shift a byte offset reported relative to a sub-slice so it is relative
    /// to the enclosing buffer.
    pub(crate) fn rebase(self, base: usize) -> Self {
        match self {
            Self::InvalidByte { byte, offset } => Self::InvalidByte {
                byte,
                offset: offset + base,
            },
            other => other,
        }
    }
}

/// Error returned by encode entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A coordinate's length differs from the codec dimension.
    #[error("dimensional mismatch: expected {expected} axes, found {actual}")]
    DimensionalMismatch { expected: usize, actual: usize },
}

/// Error returned when constructing a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("dimension must be at least 1")]
    ZeroDimension,

    #[error("scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(DecodeError::Empty.to_string(), "empty");
        assert_eq!(
            DecodeError::InvalidByte {
                byte: 200,
                offset: 3
            }
            .to_string(),
            "invalid byte 200 at offset 3"
        );
        assert_eq!(
            EncodeError::DimensionalMismatch {
                expected: 2,
                actual: 3
            }
            .to_string(),
            "dimensional mismatch: expected 2 axes, found 3"
        );
        assert!(ConfigError::InvalidScale(-1.0).to_string().contains("-1"));
    }

    #[test]
    fn rebase_only_moves_byte_offsets() {
        let err = DecodeError::InvalidByte { byte: 7, offset: 2 };
        assert_eq!(
            err.rebase(10),
            DecodeError::InvalidByte {
                byte: 7,
                offset: 12
            }
        );
        assert_eq!(DecodeError::Overflow.rebase(10), DecodeError::Overflow);
    }
}
