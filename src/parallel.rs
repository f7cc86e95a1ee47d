// Batch helpers running independent polylines on the rayon pool.
//
// Each polyline is encoded or decoded by its own call with its own
// accumulator; only the `Codec` value is shared.

use rayon::prelude::*;

use crate::codec::Codec;
use crate::error::{DecodeError, EncodeError};

/// Encode many polylines in parallel. Output order matches input order.
pub fn encode_batch<P, C>(codec: Codec, polylines: &[P]) -> Result<Vec<Vec<u8>>, EncodeError>
where
    P: AsRef<[C]> + Sync,
    C: AsRef<[f64]> + Sync,
{
    polylines
        .par_iter()
        .map(|coords| -> Result<Vec<u8>, EncodeError> {
            let mut buf = Vec::new();
            codec.encode(&mut buf, coords.as_ref())?;
            Ok(buf)
        })
        .collect()
}

/// Decode many polylines in parallel. Fails if any one buffer fails.
pub fn decode_batch<B>(codec: Codec, buffers: &[B]) -> Result<Vec<Vec<Vec<f64>>>, DecodeError>
where
    B: AsRef<[u8]> + Sync,
{
    buffers
        .par_iter()
        .map(|buf| codec.decode(buf.as_ref()).map(|(coords, _)| coords))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(seed: usize) -> Vec<[f64; 2]> {
        (0..200)
            .map(|i| {
                let t = (seed * 1000 + i) as f64;
                [45.0 + (t * 0.001).sin(), -122.0 + (t * 0.0007).cos()]
            })
            .collect()
    }

    #[test]
    fn parallel_matches_sequential() {
        let tracks: Vec<_> = (0..16).map(track).collect();
        let encoded = encode_batch::<_, [f64; 2]>(Codec::DEFAULT, &tracks).unwrap();
        for (track, bytes) in tracks.iter().zip(&encoded) {
            let mut expected = Vec::new();
            Codec::DEFAULT.encode(&mut expected, track).unwrap();
            assert_eq!(bytes, &expected);
        }

        let decoded = decode_batch(Codec::DEFAULT, &encoded).unwrap();
        assert_eq!(decoded.len(), tracks.len());
        assert_eq!(decoded[3].len(), 200);
    }

    #[test]
    fn one_bad_buffer_fails_the_batch() {
        let buffers: Vec<&[u8]> = vec![b"??", b"\xC8", b"??"];
        assert!(matches!(
            decode_batch(Codec::DEFAULT, &buffers),
            Err(DecodeError::InvalidByte { byte: 0xC8, .. })
        ));
    }
}
