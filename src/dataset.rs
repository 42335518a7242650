use crate::{checks, memory::*, KMeansError, Result};

/// Point store a clustering operates on.
///
/// Every point has exactly [`Dataset::dimension`] coordinates. The insertion order of the points
/// is the index space that [`crate::Cluster`] memberships refer to. Points can be appended, but
/// never removed.
///
/// ## Generics
/// - **T**: Underlying primitive type of the coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<T: Primitive> {
    dimension: usize,
    contents: Vec<Vec<T>>,
}
impl<T: Primitive> Dataset<T> {
    /// Create a new dataset for points of the given dimension.
    ///
    /// ## Arguments
    /// - **dimension**: Amount of coordinates every point has (`> 0`)
    /// - **contents**: Optional initial points. When given, it has to be non-empty and every point
    ///   has to have **dimension** coordinates. The points are copied.
    pub fn new(dimension: usize, contents: Option<&[Vec<T>]>) -> Result<Self> {
        if dimension == 0 {
            return Err(KMeansError::InvalidArgument("dimension must be greater than 0".to_string()));
        }
        let contents = match contents {
            None => Vec::new(),
            Some(rows) => {
                if !checks::is_point_list(rows) || rows[0].len() != dimension {
                    return Err(KMeansError::InvalidArgument(format!(
                        "initial contents must be a non-empty list of points with {} coordinates",
                        dimension
                    )));
                }
                rows.to_vec()
            }
        };
        Ok(Self { dimension, contents })
    }

    pub fn dimension(&self) -> usize { self.dimension }

    /// Amount of points in this dataset.
    pub fn size(&self) -> usize { self.contents.len() }

    /// Returns a copy of the point at index **i**.
    ///
    /// Modifying the returned vector never touches the dataset. Use [`Dataset::contents_mut`]
    /// for that.
    pub fn point_at(&self, i: usize) -> Result<Vec<T>> {
        self.contents
            .get(i)
            .cloned()
            .ok_or(KMeansError::IndexOutOfRange { index: i, size: self.size() })
    }

    /// The live backing storage of this dataset. No copy is made.
    pub fn contents(&self) -> &[Vec<T>] { &self.contents }

    /// Mutable access to the live backing storage of this dataset.
    ///
    /// ## Note
    /// Callers are responsible for keeping every point at [`Dataset::dimension`] coordinates.
    /// Operations on a dataset whose points were reshaped through this accessor fail with
    /// [`KMeansError::InvalidArgument`].
    pub fn contents_mut(&mut self) -> &mut Vec<Vec<T>> { &mut self.contents }

    /// Append a copy of **point** to the end of this dataset.
    pub fn add_point(&mut self, point: &[T]) -> Result<()> {
        if !checks::is_point(point) || point.len() != self.dimension {
            return Err(KMeansError::InvalidArgument(format!(
                "point has {} coordinates, dataset dimension is {}",
                point.len(),
                self.dimension
            )));
        }
        self.contents.push(point.to_vec());
        Ok(())
    }
}
