// Incremental sequence encoder.
//
// SequenceEncoder owns the running per-axis accumulator, so coordinates can
// be fed one at a time (e.g. while reading a GPS track) and the buffer taken
// once the sequence is complete.

use crate::codec::Codec;
use crate::error::EncodeError;
use crate::varint;

/// Delta-encodes coordinates one at a time into an owned buffer.
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    codec: Codec,
    last: Vec<i64>,
    buf: Vec<u8>,
    coords_encoded: u64,
}

impl SequenceEncoder {
    /// Create an encoder with an empty output buffer.
    pub fn new(codec: Codec) -> Self {
        Self::with_buffer(codec, Vec::new())
    }

    /// Create an encoder that appends to `buf`.
    ///
    /// Existing contents of `buf` are kept; pass `Vec::with_capacity(n)` to
    /// pre-allocate.
    pub fn with_buffer(codec: Codec, buf: Vec<u8>) -> Self {
        Self {
            codec,
            last: vec![0; codec.dim()],
            buf,
            coords_encoded: 0,
        }
    }

    /// Encode the next coordinate as a delta from the previous one.
    ///
    /// On a dimension mismatch neither the buffer nor the accumulator change.
    pub fn push(&mut self, coord: &[f64]) -> Result<(), EncodeError> {
        self.codec.check_dim(coord.len())?;
        for (last, &x) in self.last.iter_mut().zip(coord) {
            let fixed = self.codec.to_fixed(x);
            varint::encode_int(&mut self.buf, fixed.wrapping_sub(*last));
            *last = fixed;
        }
        self.coords_encoded += 1;
        Ok(())
    }

    /// Encode every coordinate in `coords`, stopping at the first error.
    pub fn extend<C: AsRef<[f64]>>(&mut self, coords: &[C]) -> Result<(), EncodeError> {
        coords.iter().try_for_each(|c| self.push(c.as_ref()))
    }

    /// Number of coordinates encoded so far.
    pub fn coords_encoded(&self) -> u64 {
        self.coords_encoded
    }

    /// Total bytes in the output buffer, including any initial contents.
    pub fn bytes_out(&self) -> usize {
        self.buf.len()
    }

    /// The encoded bytes so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish the sequence and return the buffer.
    pub fn finish(self) -> Vec<u8> {
        log::trace!(
            "encoded {} coordinates into {} bytes",
            self.coords_encoded,
            self.buf.len()
        );
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_matches_reference_vector() {
        let mut enc = SequenceEncoder::new(Codec::DEFAULT);
        enc.push(&[38.5, -120.2]).unwrap();
        enc.push(&[40.7, -120.95]).unwrap();
        enc.push(&[43.252, -126.453]).unwrap();
        assert_eq!(enc.coords_encoded(), 3);
        assert_eq!(enc.finish(), b"_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn repeated_coordinate_is_zero_delta() {
        let mut enc = SequenceEncoder::new(Codec::DEFAULT);
        enc.push(&[1.0, 2.0]).unwrap();
        let first = enc.bytes_out();
        enc.push(&[1.0, 2.0]).unwrap();
        assert_eq!(&enc.as_bytes()[first..], b"??");
    }

    #[test]
    fn mismatch_leaves_state_untouched() {
        let mut enc = SequenceEncoder::new(Codec::DEFAULT);
        enc.push(&[1.0, 2.0]).unwrap();
        let before = enc.as_bytes().to_vec();
        assert_eq!(
            enc.push(&[1.0]),
            Err(EncodeError::DimensionalMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(enc.as_bytes(), &before[..]);
        assert_eq!(enc.coords_encoded(), 1);
        // The accumulator still holds the first coordinate.
        enc.push(&[1.0, 2.0]).unwrap();
        assert_eq!(&enc.as_bytes()[before.len()..], b"??");
    }

    #[test]
    fn with_buffer_appends() {
        let mut enc = SequenceEncoder::with_buffer(Codec::DEFAULT, b"ab".to_vec());
        enc.push(&[0.0, 0.0]).unwrap();
        assert_eq!(enc.bytes_out(), 4);
        assert_eq!(enc.finish(), b"ab??");
    }

    #[test]
    fn extreme_deltas_wrap() {
        let codec = Codec::new(1, 1.0).unwrap();
        let mut enc = SequenceEncoder::new(codec);
        enc.push(&[f64::NEG_INFINITY]).unwrap();
        enc.push(&[f64::INFINITY]).unwrap();
        let bytes = enc.finish();
        let (coords, _) = codec.decode(&bytes).unwrap();
        assert_eq!(coords, vec![vec![i64::MIN as f64], vec![i64::MAX as f64]]);
    }
}
