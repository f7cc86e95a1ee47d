// Point simplification seam.
//
// Simplification is supplied by the caller: any `Simplifier` (including a
// plain closure) can reduce a 2-D point sequence before it is encoded.

use crate::codec::Codec;
use crate::error::EncodeError;
use crate::sequence::SequenceEncoder;

/// A 2-D point. `x` is encoded before `y`, so for Google-style polylines
/// `x` holds the latitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Reduces an ordered point sequence to an ordered subset within `tolerance`.
///
/// `high_quality` asks for the slower, more faithful variant where the
/// implementation offers one.
pub trait Simplifier {
    fn simplify(&self, points: &[Point], tolerance: f64, high_quality: bool) -> Vec<Point>;
}

impl<F> Simplifier for F
where
    F: Fn(&[Point], f64, bool) -> Vec<Point>,
{
    fn simplify(&self, points: &[Point], tolerance: f64, high_quality: bool) -> Vec<Point> {
        self(points, tolerance, high_quality)
    }
}

/// Passes points through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Simplifier for Identity {
    fn simplify(&self, points: &[Point], _tolerance: f64, _high_quality: bool) -> Vec<Point> {
        points.to_vec()
    }
}

impl Codec {
    /// Simplify `points` with `simplifier`, then append their delta-coded
    /// encoding to `buf`.
    ///
    /// Requires a two-dimensional codec.
    pub fn encode_points<S: Simplifier + ?Sized>(
        &self,
        buf: &mut Vec<u8>,
        points: &[Point],
        tolerance: f64,
        high_quality: bool,
        simplifier: &S,
    ) -> Result<(), EncodeError> {
        self.check_dim(2)?;
        let simplified = simplifier.simplify(points, tolerance, high_quality);
        log::trace!(
            "simplified {} points to {} (tolerance {tolerance}, high_quality {high_quality})",
            points.len(),
            simplified.len()
        );
        let mut enc = SequenceEncoder::with_buffer(*self, std::mem::take(buf));
        let result = simplified
            .iter()
            .try_for_each(|p| enc.push(&[p.x, p.y]));
        *buf = enc.finish();
        result
    }
}
