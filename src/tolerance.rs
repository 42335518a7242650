use crate::memory::*;

/// Tolerances deciding whether a recomputed centroid is "the same" as its predecessor.
///
/// Two coordinates `new` and `old` are considered close when
/// `|new - old| <= atol + rtol * |old|`. A centroid is stable when all of its coordinates are close.
///
/// ## Default
/// `rtol = 1e-5`, `atol = 1e-8`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<T: Primitive> {
    /// Relative tolerance, scaled by the magnitude of the previous value
    pub rtol: T,
    /// Absolute tolerance
    pub atol: T,
}
impl<T: Primitive> Default for Tolerance<T> {
    fn default() -> Self {
        Self { rtol: constant(1e-5), atol: constant(1e-8) }
    }
}
impl<T: Primitive> Tolerance<T> {
    pub fn new(rtol: T, atol: T) -> Self { Self { rtol, atol } }

    /// Coordinate-wise closeness of **actual** to **expected**.
    /// Slices of differing length are never close. NaN is never close to anything.
    pub fn all_close(&self, actual: &[T], expected: &[T]) -> bool {
        actual.len() == expected.len()
            && actual.iter().zip(expected.iter())
                .all(|(&a, &e)| (a - e).abs() <= self.atol + self.rtol * e.abs())
    }
}
