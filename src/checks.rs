//! Pure precondition predicates used at the construction boundaries of
//! [`crate::Dataset`], [`crate::Cluster`] and [`crate::Algorithm`].
use std::collections::HashSet;

/// A point has at least one coordinate.
pub fn is_point<T>(point: &[T]) -> bool {
    !point.is_empty()
}

/// A point list is non-empty and all of its points share the same (non-zero) length.
pub fn is_point_list<T>(points: &[Vec<T>]) -> bool {
    match points.first() {
        Some(first) => is_point(first) && points.iter().all(|p| p.len() == first.len()),
        None => false,
    }
}

/// A seed list holds exactly `k` pairwise distinct indices, each in `[0, size)`.
pub fn is_seed_list(seeds: &[usize], k: usize, size: usize) -> bool {
    let mut seen = HashSet::with_capacity(seeds.len());
    seeds.len() == k && seeds.iter().all(|&s| s < size && seen.insert(s))
}
