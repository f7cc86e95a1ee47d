// Delta-coded coordinate sequences.
//
// - `encoder` — SequenceEncoder: incremental encode with an owned accumulator
// - `decoder` — SequenceDecoder: lazy decode over a borrowed buffer
//
// The whole-buffer entry points below are thin wrappers over the two.

pub mod decoder;
pub mod encoder;

pub use decoder::SequenceDecoder;
pub use encoder::SequenceEncoder;

use crate::codec::Codec;
use crate::error::{DecodeError, EncodeError};

impl Codec {
    /// Append the delta-coded encoding of `coords` to `buf`.
    ///
    /// Every coordinate must have exactly `dim` axes. On error `buf` is left
    /// as it was on entry.
    pub fn encode<C: AsRef<[f64]>>(
        &self,
        buf: &mut Vec<u8>,
        coords: &[C],
    ) -> Result<(), EncodeError> {
        coords
            .iter()
            .try_for_each(|c| self.check_dim(c.as_ref().len()))?;
        let mut enc = SequenceEncoder::with_buffer(*self, std::mem::take(buf));
        let result = enc.extend(coords);
        *buf = enc.finish();
        result
    }

    /// Decode a complete polyline.
    ///
    /// Decoding stops when the buffer is exhausted after a whole coordinate,
    /// so the returned remainder is always empty. An empty buffer decodes to
    /// an empty sequence. Any error discards everything decoded so far.
    pub fn decode<'a>(&self, buf: &'a [u8]) -> Result<(Vec<Vec<f64>>, &'a [u8]), DecodeError> {
        let mut dec = self.iter(buf);
        let coords = dec.by_ref().collect::<Result<Vec<_>, _>>()?;
        log::trace!("decoded {} coordinates from {} bytes", coords.len(), buf.len());
        Ok((coords, dec.remaining()))
    }

    /// Lazily decode the coordinates of `buf`.
    pub fn iter<'a>(&self, buf: &'a [u8]) -> SequenceDecoder<'a> {
        SequenceDecoder::new(*self, buf)
    }

    /// Decode exactly `out.len() / dim` coordinates from the front of `buf`
    /// into the flat slice `out`, returning the unconsumed bytes.
    ///
    /// `out.len()` must be a multiple of `dim`. The contents of `out` are
    /// unspecified if an error is returned.
    pub fn decode_into<'a>(
        &self,
        buf: &'a [u8],
        out: &mut [f64],
    ) -> Result<&'a [u8], DecodeError> {
        let partial = out.len() % self.dim();
        if partial != 0 {
            return Err(DecodeError::DimensionalMismatch {
                expected: self.dim(),
                actual: partial,
            });
        }
        let mut dec = self.iter(buf);
        let mut fixed = vec![0i64; self.dim()];
        for chunk in out.chunks_exact_mut(self.dim()) {
            if !dec.next_fixed(&mut fixed)? {
                return Err(DecodeError::Empty);
            }
            for (slot, &v) in chunk.iter_mut().zip(&fixed) {
                *slot = self.from_fixed(v);
            }
        }
        Ok(dec.remaining())
    }

    /// Encode `coords` as a polyline string.
    pub fn encode_to_string<C: AsRef<[f64]>>(&self, coords: &[C]) -> Result<String, EncodeError> {
        let mut buf = Vec::new();
        self.encode(&mut buf, coords)?;
        // Every encoded byte lies in [63, 127), so each is one ASCII char.
        Ok(buf.into_iter().map(char::from).collect())
    }

    /// Decode a polyline string.
    pub fn decode_str(&self, s: &str) -> Result<Vec<Vec<f64>>, DecodeError> {
        self.decode(s.as_bytes()).map(|(coords, _)| coords)
    }
}
