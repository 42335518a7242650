use crate::{distances, memory::*, Dataset, KMeansConfig, KMeansError, Result};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<Vec<Vec<T>>> {
    let points = dataset.contents();
    if k == 0 || k > points.len() {
        return Err(KMeansError::InvalidArgument(format!("cannot pick {} centroids from {} points", k, points.len())));
    }
    let mut rnd = config.rnd.borrow_mut();
    let mut chosen = Vec::with_capacity(k);

    // Randomly select first centroid
    chosen.push(rnd.gen_range(0..points.len()));
    // Squared distance from every point to its nearest chosen centroid
    let mut min_distances: Vec<T> = points.iter()
        .map(|p| distances::squared_euclidean(p, &points[chosen[0]]))
        .collect();

    while chosen.len() < k {
        // Points are drawn with a probability proportional to their squared distance. Already
        // chosen points have weight 0. If only duplicates of chosen points remain, all weights
        // are 0 and the next centroid is drawn uniformly among the remaining indices.
        let next = match WeightedIndex::<T>::new(min_distances.iter()) {
            Ok(weights) => weights.sample(rnd.deref_mut()),
            Err(_) => {
                let remaining: Vec<usize> = (0..points.len()).filter(|i| !chosen.contains(i)).collect();
                remaining[rnd.gen_range(0..remaining.len())]
            }
        };
        chosen.push(next);
        min_distances.iter_mut().zip(points.iter()).for_each(|(d, p)| {
            let dist = distances::squared_euclidean(p, &points[next]);
            if dist < *d {
                *d = dist;
            }
        });
    }
    Ok(chosen.into_iter().map(|i| points[i].clone()).collect())
}
