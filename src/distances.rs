use crate::memory::*;

/// Sum of squared coordinate differences between **a** and **b**.
/// Both slices are expected to have the same length; surplus coordinates are ignored.
#[inline(always)]
pub(crate) fn squared_euclidean<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter().cloned()
        .zip(b.iter().cloned())
        .map(|(av, bv)| av - bv)       // <a> - <b>
        .map(|v| v * v)                // <components> ^2
        .sum()
}
