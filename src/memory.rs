use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Floating point type a [`crate::Dataset`] stores its coordinates in.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> + for<'a> Sub<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Converts an `f64` constant into `T`. Every constant used by this crate is representable in `f32`.
#[inline(always)]
pub(crate) fn constant<T: Primitive>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}
