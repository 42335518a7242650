use crate::{checks, memory::*, Dataset, KMeansError, Result};

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, seeds: &[usize]) -> Result<Vec<Vec<T>>> {
    if !checks::is_seed_list(seeds, k, dataset.size()) {
        return Err(KMeansError::InvalidArgument(format!(
            "seeds must be {} distinct indices below {}, got {:?}", k, dataset.size(), seeds)));
    }
    seeds.iter().map(|&s| dataset.point_at(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test]
    fn centroids_are_copies_of_the_seeds() {
        let ds = plane_dataset();
        assert_eq!(calculate(&ds, 2, &[3, 0]).unwrap(), vec![vec![10.0, 11.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn rejects_invalid_seed_lists() {
        let ds = plane_dataset();
        for seeds in [&[0usize][..], &[0, 0], &[0, 4], &[0, 1, 2]] {
            assert!(matches!(calculate(&ds, 2, seeds), Err(KMeansError::InvalidArgument(_))));
        }
    }
}
