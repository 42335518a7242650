use crate::{memory::*, Cluster, Dataset, KMeansConfig, KMeansError, Result};
use rayon::prelude::*;
use tracing::{debug, info};

/// Entrypoint of this crate's API-Surface: a k-means run over one [`Dataset`].
///
/// An instance owns `k` [`Cluster`]s over a borrowed dataset. Each [`Algorithm::step`] first
/// partitions the dataset (every point is assigned to its nearest cluster), then recomputes
/// every cluster's centroid. [`Algorithm::run`] repeats this until the centroids are stable or
/// a step budget is used up.
///
/// ## Supported initialization methods
/// - Precomputed seed indices [`Algorithm::init_precomputed`]
/// - Random-Sample [`Algorithm::init_random_sample`]
/// - K-Mean++ [`Algorithm::init_kmeanplusplus`]
pub struct Algorithm<'a, T: Primitive> {
    dataset: &'a Dataset<T>,
    clusters: Vec<Cluster<'a, T>>,
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> Algorithm<'a, T> {
    /// Create a new k-means run over **dataset** with **k** clusters.
    ///
    /// ## Arguments
    /// - **dataset**: Dataset to cluster
    /// - **k**: Amount of clusters (`0 < k <= dataset.size()`)
    /// - **seeds**: Optional dataset indices of the initial centroids (exactly **k** distinct indices).
    ///   Without seeds, **k** distinct points are picked at random, using the random generator of **config**.
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Example
    /// ```rust
    /// use kcluster::*;
    ///
    /// let points = vec![vec![1.0f64], vec![1.5], vec![5.0], vec![5.5]];
    /// let dataset = Dataset::new(1, Some(&points)).unwrap();
    /// let mut algorithm = Algorithm::new(&dataset, 2, Some(&[0, 2]), KMeansConfig::default()).unwrap();
    /// assert!(algorithm.run(10).unwrap());
    /// assert_eq!(algorithm.clusters()[0].centroid(), &[1.25]);
    /// ```
    pub fn new(dataset: &'a Dataset<T>, k: usize, seeds: Option<&[usize]>, config: KMeansConfig<'a, T>) -> Result<Self> {
        match seeds {
            Some(seeds) => Self::with_init(dataset, k, Self::init_precomputed(seeds), config),
            None => Self::with_init(dataset, k, Self::init_random_sample, config),
        }
    }

    /// Create a new k-means run over **dataset**, using **init** to pick the **k** initial centroids.
    ///
    /// **init** is one of the initialization methods of this struct (or any function with the same
    /// signature). It has to return exactly **k** points of the dataset's dimension.
    pub fn with_init<F>(dataset: &'a Dataset<T>, k: usize, init: F, config: KMeansConfig<'a, T>) -> Result<Self>
                where F: FnOnce(&Dataset<T>, usize, &KMeansConfig<'_, T>) -> Result<Vec<Vec<T>>> {
        if k == 0 || k > dataset.size() {
            return Err(KMeansError::InvalidArgument(format!(
                "k must satisfy 0 < k <= {}, got {}", dataset.size(), k)));
        }
        let centroids = init(dataset, k, &config)?;
        if centroids.len() != k {
            return Err(KMeansError::InvalidArgument(format!(
                "initialization produced {} centroids, expected {}", centroids.len(), k)));
        }
        let clusters = centroids.iter()
            .map(|c| Cluster::new(dataset, c))
            .collect::<Result<Vec<_>>>()?;
        debug!(k, dimension = dataset.dimension(), size = dataset.size(), "initialized clusters");

        // Notify subscriber
        (config.init_done)(clusters.as_slice());
        Ok(Self { dataset, clusters, config })
    }

    pub fn dataset(&self) -> &'a Dataset<T> { self.dataset }

    /// The clusters of this run, in their fixed order. No copy is made.
    pub fn clusters(&self) -> &[Cluster<'a, T>] { &self.clusters }

    /// Mutable access to the clusters of this run. The amount of clusters is fixed.
    pub fn clusters_mut(&mut self) -> &mut [Cluster<'a, T>] { &mut self.clusters }

    pub fn k(&self) -> usize { self.clusters.len() }

    /// Index of the cluster nearest to **point**, i.e. the cluster the point would join in the next
    /// partition. Ties go to the cluster that comes first.
    pub fn nearest(&self, point: &[T]) -> Result<usize> {
        if point.len() != self.dataset.dimension() {
            return Err(KMeansError::InvalidArgument(format!(
                "point has {} coordinates, dataset dimension is {}", point.len(), self.dataset.dimension())));
        }
        nearest_cluster(&self.clusters, point)
    }

    /// Re-partition the dataset, so that every point is a member of exactly one cluster.
    pub(crate) fn partition(&mut self) -> Result<()> {
        // Nearest clusters only depend on the centroids: search them in parallel, then apply the
        // assignments in ascending index order.
        let clusters = &self.clusters;
        let assignments = self.dataset.contents().par_iter()
            .map(|p| nearest_cluster(clusters, p))
            .collect::<Result<Vec<usize>>>()?;

        self.clusters.iter_mut().for_each(|c| c.clear());
        for (i, assignment) in assignments.into_iter().enumerate() {
            self.clusters[assignment].add_member(i)?;
        }
        Ok(())
    }

    /// Recompute all centroids.
    /// ## Returns
    /// **true** if every centroid remained unchanged
    pub(crate) fn update(&mut self) -> Result<bool> {
        let tolerance = self.config.tolerance;
        // every cluster has to be updated, whatever the outcome of the others
        let stable = self.clusters.par_iter_mut()
            .map(|c| c.update_with(&tolerance))
            .collect::<Result<Vec<bool>>>()?;
        Ok(stable.into_iter().all(|s| s))
    }

    /// Perform one cycle: partition the dataset, then update the centroids.
    /// ## Returns
    /// **true** if the algorithm converged, i.e. no centroid changed during this step
    pub fn step(&mut self) -> Result<bool> {
        self.partition()?;
        self.update()
    }

    /// Step until convergence, but at most **max_steps** times.
    ///
    /// ## Returns
    /// **true** if a step reported convergence within the budget. `run(0)` does nothing and returns **false**.
    pub fn run(&mut self, max_steps: usize) -> Result<bool> {
        for step in 1..=max_steps {
            let stable = self.step()?;
            debug!(step, stable, "step done");

            // Notify subscriber about finished step
            (self.config.iteration_done)(self.clusters.as_slice(), step, stable);
            if stable {
                info!(steps = step, "converged");
                return Ok(true);
            }
        }
        info!(max_steps, "stopped without convergence");
        Ok(false)
    }

    /// Initialization method copying the centroids from the given dataset indices.
    ///
    /// ## Description
    /// The i-th cluster starts at a copy of the point at index `seeds[i]`. The seeds have to be
    /// exactly `k` distinct, valid indices.
    pub fn init_precomputed(seeds: &[usize]) -> impl FnOnce(&Dataset<T>, usize, &KMeansConfig<'_, T>) -> Result<Vec<Vec<T>>> + '_ {
        move |dataset, k, _config| crate::inits::precomputed::calculate(dataset, k, seeds)
    }

    /// Random sample initialization method (a.k.a. Forgy)
    ///
    /// ## Description
    /// This initialization method randomly selects k distinct points (uniformly, without replacement)
    /// as initial centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it to [`Algorithm::with_init`].
    pub fn init_random_sample(dataset: &Dataset<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<Vec<Vec<T>>> {
        crate::inits::randomsample::calculate(dataset, k, config)
    }

    /// K-Mean++ initialization method
    ///
    /// ## Description
    /// This initialization method starts by selecting one point as first centroid.
    /// Proceeding from there, the method iteratively selects one new centroid by drawing a point with
    /// a probability proportional to its squared distance to the nearest centroid selected so far.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it to [`Algorithm::with_init`].
    pub fn init_kmeanplusplus(dataset: &Dataset<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<Vec<Vec<T>>> {
        crate::inits::kmeanplusplus::calculate(dataset, k, config)
    }
}
impl<T: Primitive> std::fmt::Debug for Algorithm<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Algorithm").field("clusters", &self.clusters).field("config", &self.config).finish()
    }
}

fn nearest_cluster<T: Primitive>(clusters: &[Cluster<'_, T>], point: &[T]) -> Result<usize> {
    let mut best_idx = 0;
    let mut best_dist = T::infinity();
    for (idx, cluster) in clusters.iter().enumerate() {
        let dist = cluster.distance(point)?;
        if idx == 0 || dist < best_dist {
            best_idx = idx;
            best_dist = dist;
        }
    }
    Ok(best_idx)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use std::cell::{Cell, RefCell};

    fn snapshot(algorithm: &Algorithm<'_, f64>) -> Vec<(Vec<usize>, Vec<f64>)> {
        algorithm.clusters().iter()
            .map(|c| (c.members().iter().cloned().collect(), c.centroid().to_vec()))
            .collect()
    }

    #[test]
    fn construction_with_seeds() {
        let ds = plane_dataset();
        let algorithm = Algorithm::new(&ds, 2, Some(&[3, 1]), KMeansConfig::default()).unwrap();
        assert_eq!(algorithm.k(), 2);
        assert_eq!(algorithm.clusters()[0].centroid(), &[10.0, 11.0]);
        assert_eq!(algorithm.clusters()[1].centroid(), &[0.0, 1.0]);
        assert!(algorithm.clusters().iter().all(|c| c.members().is_empty()));
    }

    #[test]
    fn construction_rejects_invalid_k_and_seeds() {
        let ds = plane_dataset();
        let invalid = |k: usize, seeds: Option<&[usize]>| {
            matches!(Algorithm::new(&ds, k, seeds, KMeansConfig::default()), Err(KMeansError::InvalidArgument(_)))
        };
        assert!(invalid(0, None));
        assert!(invalid(5, None));
        assert!(invalid(0, Some(&[])));
        assert!(invalid(2, Some(&[0])));
        assert!(invalid(2, Some(&[1, 1])));
        assert!(invalid(2, Some(&[0, 4])));
        assert!(invalid(1, Some(&[0, 1])));
    }

    #[test]
    fn random_construction_uses_injected_generator() {
        let ds = plane_dataset();
        let centroids = || {
            let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
            let algorithm = Algorithm::new(&ds, 4, None, conf).unwrap();
            algorithm.clusters().iter().map(|c| c.centroid().to_vec()).collect::<Vec<_>>()
        };
        let first = centroids();
        assert_eq!(first, centroids());

        // k == size: every point is picked exactly once
        let mut sorted = first.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sorted, ds.contents());
    }

    #[test]
    fn custom_initialization() {
        let ds = plane_dataset();
        let algorithm = Algorithm::with_init(&ds, 2, |_, _, _| {
            Ok(vec![vec![5.0, 5.0], vec![-5.0, -5.0]])
        }, KMeansConfig::default()).unwrap();
        assert_eq!(algorithm.clusters()[0].centroid(), &[5.0, 5.0]);

        let too_few = Algorithm::with_init(&ds, 2, |_, _, _| {
            Ok(vec![vec![5.0, 5.0]])
        }, KMeansConfig::default());
        assert!(matches!(too_few, Err(KMeansError::InvalidArgument(_))));

        let wrong_dimension = Algorithm::with_init(&ds, 1, |_, _, _| {
            Ok(vec![vec![5.0]])
        }, KMeansConfig::default());
        assert!(matches!(wrong_dimension, Err(KMeansError::InvalidArgument(_))));
    }

    #[test]
    fn kmeanplusplus_initialization() {
        let ds = plane_dataset();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(3)).build();
        let mut algorithm = Algorithm::with_init(&ds, 2, Algorithm::init_kmeanplusplus, conf).unwrap();
        assert!(algorithm.run(10).unwrap());

        let mut centroids: Vec<Vec<f64>> = algorithm.clusters().iter().map(|c| c.centroid().to_vec()).collect();
        centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_centroid_eq(&centroids[0], &[0.0, 0.5], 1e-12);
        assert_centroid_eq(&centroids[1], &[10.0, 10.5], 1e-12);
    }

    #[test]
    fn nearest_prefers_first_on_ties() {
        let ds = line_dataset();
        let algorithm = Algorithm::with_init(&ds, 3, |_, _, _| {
            Ok(vec![vec![4.0], vec![2.0], vec![2.0]])
        }, KMeansConfig::default()).unwrap();
        assert_eq!(algorithm.nearest(&[2.0]).unwrap(), 1);
        assert_eq!(algorithm.nearest(&[3.0]).unwrap(), 0); // equally far from all three
        assert_eq!(algorithm.nearest(&[1.0]).unwrap(), 1);
        assert!(matches!(algorithm.nearest(&[1.0, 2.0]), Err(KMeansError::InvalidArgument(_))));
    }

    #[test]
    fn partition_assigns_every_point_once() {
        let ds = plane_dataset();
        let mut algorithm = Algorithm::new(&ds, 2, Some(&[0, 2]), KMeansConfig::default()).unwrap();
        algorithm.clusters_mut()[1].add_member(0).unwrap(); // stale membership, removed by partition
        algorithm.partition().unwrap();

        assert_eq!(snapshot(&algorithm), vec![
            (vec![0, 1], vec![0.0, 0.0]),
            (vec![2, 3], vec![10.0, 10.0]),
        ]);
    }

    #[test]
    fn update_does_not_short_circuit() {
        let ds = line_dataset();
        let mut algorithm = Algorithm::new(&ds, 2, Some(&[0, 2]), KMeansConfig::default()).unwrap();
        algorithm.partition().unwrap();
        assert!(!algorithm.update().unwrap());
        // both clusters moved, not only the first unstable one
        assert_eq!(algorithm.clusters()[0].centroid(), &[1.25]);
        assert_eq!(algorithm.clusters()[1].centroid(), &[5.25]);
    }

    #[test]
    fn line_scenario() {
        let ds = line_dataset();
        let mut algorithm = Algorithm::new(&ds, 2, Some(&[0, 2]), KMeansConfig::default()).unwrap();

        assert!(!algorithm.step().unwrap());
        assert_eq!(snapshot(&algorithm), vec![(vec![0, 1], vec![1.25]), (vec![2, 3], vec![5.25])]);

        assert!(algorithm.step().unwrap());
        assert_eq!(snapshot(&algorithm), vec![(vec![0, 1], vec![1.25]), (vec![2, 3], vec![5.25])]);
    }

    #[test]
    fn steps_at_a_fixed_point_are_idempotent() {
        let ds = Dataset::new(2, Some(&[
            vec![0.0, 0.0], vec![1.0, 0.2], vec![0.3, 0.9], vec![8.0, 8.0], vec![9.0, 7.5], vec![4.0, 4.5],
        ])).unwrap();
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(1337)).build();
        let mut algorithm = Algorithm::new(&ds, 2, None, conf).unwrap();
        assert!(algorithm.run(100).unwrap());

        let converged = snapshot(&algorithm);
        for _ in 0..3 {
            assert!(algorithm.step().unwrap());
            assert_eq!(snapshot(&algorithm), converged);
        }
    }

    #[test]
    fn run_zero_steps_changes_nothing() {
        let ds = plane_dataset();
        let steps = Cell::new(0);
        let conf = KMeansConfig::build().iteration_done(|_, _, _| steps.set(steps.get() + 1)).build();
        let mut algorithm = Algorithm::new(&ds, 2, Some(&[0, 2]), conf).unwrap();
        let initial = snapshot(&algorithm);

        assert!(!algorithm.run(0).unwrap());
        assert_eq!(snapshot(&algorithm), initial);
        assert_eq!(steps.get(), 0);
    }

    #[test]
    fn run_stops_at_convergence() {
        let ds = plane_dataset();
        let steps = RefCell::new(Vec::new());
        let initialized = Cell::new(false);
        let conf = KMeansConfig::build()
            .init_done(|clusters| initialized.set(clusters.len() == 2))
            .iteration_done(|_, step, stable| steps.borrow_mut().push((step, stable)))
            .build();
        let mut algorithm = Algorithm::new(&ds, 2, Some(&[0, 2]), conf).unwrap();
        assert!(initialized.get());

        assert!(algorithm.run(10).unwrap());
        assert_eq!(algorithm.clusters()[0].centroid(), &[0.0, 0.5]);
        assert_eq!(algorithm.clusters()[1].centroid(), &[10.0, 10.5]);
        drop(algorithm);
        assert_eq!(steps.into_inner(), vec![(1, false), (2, true)]);
    }

    #[test]
    fn run_respects_budget() {
        let ds = plane_dataset();
        let steps = Cell::new(0);
        let conf = KMeansConfig::build().iteration_done(|_, _, _| steps.set(steps.get() + 1)).build();
        let mut algorithm = Algorithm::new(&ds, 2, Some(&[0, 2]), conf).unwrap();

        assert!(!algorithm.run(1).unwrap());
        assert_eq!(steps.get(), 1);
        assert_eq!(algorithm.clusters()[0].centroid(), &[0.0, 0.5]);
    }
}
