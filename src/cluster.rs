use crate::{checks, distances, memory::*, Dataset, KMeansError, Result, Tolerance};
use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;

/// A cluster, i.e. a subset of the points of a [`Dataset`] together with a centroid.
///
/// The subset is stored as indices into the dataset. The centroid is a point of the dataset's
/// dimension, but generally not one of the dataset's points; it usually lies in between them.
///
/// ## Fields
/// - **centroid**: Current cluster center, the only value drifting across iterations
/// - **members**: Set of dataset indices currently assigned to this cluster
#[derive(Clone)]
pub struct Cluster<'a, T: Primitive> {
    dataset: &'a Dataset<T>,
    centroid: Vec<T>,
    members: BTreeSet<usize>,
}
impl<'a, T: Primitive> Cluster<'a, T> {
    /// Create a new, empty cluster over **dataset**, with a copy of **centroid** as center.
    pub fn new(dataset: &'a Dataset<T>, centroid: &[T]) -> Result<Self> {
        if !checks::is_point(centroid) || centroid.len() != dataset.dimension() {
            return Err(KMeansError::InvalidArgument(format!(
                "centroid has {} coordinates, dataset dimension is {}",
                centroid.len(),
                dataset.dimension()
            )));
        }
        Ok(Self { dataset, centroid: centroid.to_vec(), members: BTreeSet::new() })
    }

    pub fn dataset(&self) -> &'a Dataset<T> { self.dataset }

    /// The current centroid. Only [`Cluster::update`] ever changes it.
    pub fn centroid(&self) -> &[T] { &self.centroid }

    /// The live set of member indices. No copy is made.
    pub fn members(&self) -> &BTreeSet<usize> { &self.members }

    /// Mutable access to the live set of member indices.
    ///
    /// ## Note
    /// Nothing stops callers from inserting indices outside of the dataset here. Operations
    /// reading member points then fail with [`KMeansError::IndexOutOfRange`].
    pub fn members_mut(&mut self) -> &mut BTreeSet<usize> { &mut self.members }

    /// Add the dataset index **index** to this cluster. Adding an index twice is a no-op.
    pub fn add_member(&mut self, index: usize) -> Result<()> {
        if index >= self.dataset.size() {
            return Err(KMeansError::IndexOutOfRange { index, size: self.dataset.size() });
        }
        self.members.insert(index);
        Ok(())
    }

    /// Remove all members, leaving the centroid untouched.
    pub fn clear(&mut self) { self.members.clear(); }

    /// Copies of the points of all members, in member order.
    pub fn contents(&self) -> Result<Vec<Vec<T>>> {
        self.members.iter().map(|&i| self.dataset.point_at(i)).collect()
    }

    /// Euclidean distance from **point** to this cluster's centroid.
    pub fn distance(&self, point: &[T]) -> Result<T> {
        if point.len() != self.centroid.len() {
            return Err(KMeansError::InvalidArgument(format!(
                "point has {} coordinates, centroid has {}",
                point.len(),
                self.centroid.len()
            )));
        }
        Ok(distances::squared_euclidean(point, &self.centroid).sqrt())
    }

    /// Maximum distance from any member to the centroid. An empty cluster has radius 0.
    pub fn radius(&self) -> Result<T> {
        self.members.iter().try_fold(T::zero(), |radius, &i| {
            let dist = self.distance(self.member_point(i)?)?;
            Ok(if dist > radius { dist } else { radius })
        })
    }

    /// Recompute the centroid as the mean of all members, using the default [`Tolerance`].
    /// See [`Cluster::update_with`].
    pub fn update(&mut self) -> Result<bool> {
        self.update_with(&Tolerance::default())
    }

    /// Recompute the centroid as the coordinate-wise mean of all member points.
    ///
    /// ## Returns
    /// - **true** if the centroid was stable: the cluster is empty, or the mean is all-close
    ///   to the previous centroid. The previous centroid is kept in that case.
    /// - **false** if the centroid moved to the new mean
    pub fn update_with(&mut self, tolerance: &Tolerance<T>) -> Result<bool> {
        if self.members.is_empty() {
            return Ok(true);
        }
        let mut mean = vec![T::zero(); self.centroid.len()];
        for &i in self.members.iter() {
            let point = self.member_point(i)?;
            if point.len() != mean.len() {
                return Err(KMeansError::InvalidArgument(format!(
                    "point {} has {} coordinates, centroid has {}", i, point.len(), mean.len())));
            }
            mean.iter_mut().zip(point.iter()).for_each(|(m, p)| *m += p);
        }
        let count = constant::<T>(self.members.len() as f64);
        mean.iter_mut().for_each(|m| *m = *m / count);

        if tolerance.all_close(&mean, &self.centroid) {
            return Ok(true);
        }
        trace!(from = ?self.centroid, to = ?mean, "centroid moved");
        self.centroid = mean;
        Ok(false)
    }

    fn member_point(&self, index: usize) -> Result<&'a [T]> {
        let dataset = self.dataset;
        dataset.contents()
            .get(index)
            .map(|p| p.as_slice())
            .ok_or(KMeansError::IndexOutOfRange { index, size: dataset.size() })
    }
}
impl<T: Primitive> fmt::Display for Cluster<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.centroid)
    }
}
impl<T: Primitive> fmt::Debug for Cluster<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("centroid", &self.centroid)
            .field("members", &self.members)
            .finish()
    }
}
