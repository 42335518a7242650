use kcluster::*;

fn main() {
    let (sample_cnt, sample_dims, k, max_steps) = (2000, 8, 4, 100);

    // Generate some random data
    let samples: Vec<Vec<f64>> = (0..sample_cnt)
        .map(|_| (0..sample_dims).map(|_| rand::random()).collect())
        .collect();
    let dataset = Dataset::new(sample_dims, Some(&samples)).unwrap();

    // Run kmeans, using randomly sampled points as initial centroids
    let mut algorithm = Algorithm::new(&dataset, k, None, KMeansConfig::default()).unwrap();
    let converged = algorithm.run(max_steps).unwrap();

    println!("Converged: {}", converged);
    for cluster in algorithm.clusters() {
        println!("Centroid: {} | Members: {} | Radius: {:.4}", cluster, cluster.members().len(), cluster.radius().unwrap());
    }
}
