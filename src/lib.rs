//! # kcluster - API documentation
//!
//! Kcluster is a small rust library for the calculation of k-means-clustering.
//!
//! ## Design target
//! Its main target is a textbook-correct and reproducible convergence procedure, not raw throughput.
//! Points are plain vectors of a [`Primitive`] type, stored in a [`Dataset`] whose dimension never
//! changes. A k-means run is an [`Algorithm`] over such a dataset, owning one [`Cluster`] per group.
//! Every step assigns each point to its nearest cluster (ties go to the cluster that comes first) and
//! then moves every centroid to the mean of its members. The run has converged when no centroid moved
//! by more than the configured [`Tolerance`].
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. Centroids can either
//! be given as dataset indices, or picked randomly. For a list of implemented initialization methods,
//! see [`Algorithm`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kcluster::*;
//!
//! let points = vec![vec![0.0f64, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
//! let dataset = Dataset::new(2, Some(&points)).unwrap();
//!
//! let mut algorithm = Algorithm::new(&dataset, 2, Some(&[0, 2]), KMeansConfig::default()).unwrap();
//! let converged = algorithm.run(10).unwrap();
//!
//! assert!(converged);
//! for cluster in algorithm.clusters() {
//!     println!("Centroid: {} Members: {:?}", cluster, cluster.members());
//! }
//! ```
//!
//! ## Example (using a seeded generator and the status event callbacks)
//! ```rust
//! use kcluster::*;
//! use rand::prelude::*;
//!
//! let mut rnd = rand::rngs::StdRng::seed_from_u64(1337);
//! let points: Vec<Vec<f64>> = (0..200).map(|_| vec![rnd.gen(), rnd.gen()]).collect();
//! let dataset = Dataset::new(2, Some(&points)).unwrap();
//!
//! let conf = KMeansConfig::<f64>::build()
//!     .random_generator(rnd)
//!     .init_done(|clusters| println!("Initialized {} clusters.", clusters.len()))
//!     .iteration_done(|clusters, nr, stable|
//!         println!("Step {} - stable: {} | first centroid: {}", nr, stable, clusters[0]))
//!     .build();
//!
//! let mut algorithm = Algorithm::with_init(&dataset, 4, Algorithm::init_kmeanplusplus, conf).unwrap();
//! algorithm.run(100).unwrap();
//! ```
//!
//! ## Short API-Overview / Description
//! - [`Dataset`]: Point store. [`Dataset::point_at`] hands out copies, [`Dataset::contents`] and
//!   [`Dataset::contents_mut`] give access to the live storage.
//! - [`Cluster`]: Centroid plus the set of member indices. [`Cluster::update`] reports whether the
//!   centroid was stable.
//! - [`Algorithm`]: Drives [`Algorithm::step`] and [`Algorithm::run`].
//! - [`checks`]: The precondition predicates used to validate input.
//!
//! Errors are reported as [`KMeansError`]. Every operation validates its input before touching any
//! state. Progress is logged through [`tracing`]; this crate does not install a subscriber.

#[macro_use] mod helpers;
mod memory;
mod error;
mod tolerance;
mod distances;
mod dataset;
mod cluster;
mod config;
mod inits;
mod algorithm;
pub mod checks;

pub use algorithm::Algorithm;
pub use cluster::Cluster;
pub use config::{KMeansConfig, KMeansConfigBuilder, InitDoneCallbackFn, IterationDoneCallbackFn};
pub use dataset::Dataset;
pub use error::{KMeansError, Result};
pub use memory::Primitive;
pub use tolerance::Tolerance;
