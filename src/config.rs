use crate::{memory::*, Cluster, Tolerance};
use rand::prelude::*;
use std::cell::RefCell;

pub type InitDoneCallbackFn<'a, T> = Box<dyn Fn(&[Cluster<'_, T>]) + 'a>;
pub type IterationDoneCallbackFn<'a, T> = Box<dyn Fn(&[Cluster<'_, T>], usize, bool) + 'a>;

fn ignore_init_done<T: Primitive>(_: &[Cluster<'_, T>]) {}
fn ignore_iteration_done<T: Primitive>(_: &[Cluster<'_, T>], _: usize, _: bool) {}

/// This is a structure holding various configuration options for a k-means calculation, such as
/// the random number generator to use, the tolerances deciding convergence, or a couple of callbacks,
/// that can be set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **clusters**: The freshly initialized (still empty) clusters
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each step of [`crate::Algorithm::run`]
    /// ## Arguments
    /// - **clusters**: Clusters after the step
    /// - **step**: Number of the step, starting at 1
    /// - **stable**: Whether every centroid remained unchanged during this step
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Tolerances used to decide whether a centroid moved
    pub(crate) tolerance: Tolerance<T>,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: Box::new(ignore_init_done::<T>),
            iteration_done: Box::new(ignore_iteration_done::<T>),
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            tolerance: Tolerance::default(),
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub fn tolerance(&self) -> &Tolerance<T> { &self.tolerance }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("tolerance", &self.tolerance).finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the cluster initialization, before the first step.
    pub fn init_done<F>(mut self, init_done: F) -> Self
            where F: Fn(&[Cluster<'_, T>]) + 'a {
        self.config.init_done = Box::new(init_done); self
    }
    /// Set the callback that should be called after each step of a running k-means calculation.
    pub fn iteration_done<F>(mut self, iteration_done: F) -> Self
            where F: Fn(&[Cluster<'_, T>], usize, bool) + 'a {
        self.config.iteration_done = Box::new(iteration_done); self
    }
    /// Set the random number generator that should be used to pick initial centroids.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the tolerances that decide whether a recomputed centroid counts as unchanged.
    /// ## Default
    /// [`Tolerance::default`] `{ rtol: 1e-5, atol: 1e-8 }`
    pub fn tolerance(mut self, tolerance: Tolerance<T>) -> Self {
        self.config.tolerance = tolerance; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}
