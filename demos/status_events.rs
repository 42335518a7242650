use kcluster::*;
use rand::prelude::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_steps) = (2000, 2, 6, 250);

    // Generate some random data, reproducibly
    let mut rnd = rand::rngs::StdRng::seed_from_u64(1337);
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rnd.gen()).collect())
        .collect();
    let dataset = Dataset::new(sample_dims, Some(&samples)).unwrap();

    let conf = KMeansConfig::<f64>::build()
        .random_generator(rnd)
        .init_done(|clusters| println!("Initialization of {} clusters completed.", clusters.len()))
        .iteration_done(|clusters, nr, stable| {
            let radius = clusters.iter().filter_map(|c| c.radius().ok()).fold(0.0, f64::max);
            println!("Step {} - stable: {} | largest radius: {:.4}", nr, stable, radius)
        })
        .build();

    // Run kmeans, using kmean++ as initialization-method
    let mut algorithm = Algorithm::with_init(&dataset, k, Algorithm::init_kmeanplusplus, conf).unwrap();
    algorithm.run(max_steps).unwrap();

    for cluster in algorithm.clusters() {
        println!("Centroid: {}", cluster);
    }
}
