use crate::{memory::*, Dataset, KMeansConfig, Result};
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(dataset: &Dataset<T>, k: usize, config: &KMeansConfig<'_, T>) -> Result<Vec<Vec<T>>> {
    // Copy k distinct, randomly chosen points (without replacement)
    Ok(dataset.contents()
        .choose_multiple(config.rnd.borrow_mut().deref_mut(), k)
        .cloned()
        .collect())
}
