// Lazy sequence decoder.
//
// SequenceDecoder walks a borrowed buffer one coordinate at a time,
// reconstructing absolute values from the per-axis running totals. The
// sequence ends when the buffer is exhausted after a complete coordinate.

use crate::codec::Codec;
use crate::error::DecodeError;

/// Iterator over the coordinates of an encoded polyline.
///
/// Yields `Err` at most once; afterwards the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct SequenceDecoder<'a> {
    codec: Codec,
    buf: &'a [u8],
    pos: usize,
    last: Vec<i64>,
    failed: bool,
}

impl<'a> SequenceDecoder<'a> {
    pub fn new(codec: Codec, buf: &'a [u8]) -> Self {
        Self {
            codec,
            buf,
            pos: 0,
            last: vec![0; codec.dim()],
            failed: false,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Decode the next coordinate's fixed-point values into `out`.
    ///
    /// Returns `Ok(false)` once the buffer is exhausted. `out` must have
    /// `dim` elements.
    pub(crate) fn next_fixed(&mut self, out: &mut [i64]) -> Result<bool, DecodeError> {
        if self.failed || self.pos == self.buf.len() {
            return Ok(false);
        }
        let rest = match self.codec.decode_fixed(self.remaining(), out) {
            Ok(rest) => rest,
            Err(e) => {
                self.failed = true;
                let e = e.rebase(self.pos);
                log::debug!("polyline decode aborted at byte {}: {e}", self.pos);
                return Err(e);
            }
        };
        for (last, delta) in self.last.iter_mut().zip(out.iter_mut()) {
            *last = last.wrapping_add(*delta);
            *delta = *last;
        }
        self.pos = self.buf.len() - rest.len();
        Ok(true)
    }
}

impl Iterator for SequenceDecoder<'_> {
    type Item = Result<Vec<f64>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut fixed = vec![0i64; self.codec.dim()];
        match self.next_fixed(&mut fixed) {
            Ok(true) => Some(Ok(fixed
                .into_iter()
                .map(|v| self.codec.from_fixed(v))
                .collect())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl std::iter::FusedIterator for SequenceDecoder<'_> {}
