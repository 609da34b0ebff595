//! Coefficient-domain norms and products.

use crate::coeff::Coeff;
use itertools::izip;

/// Largest absolute coefficient.
pub fn absmax<T: Coeff>(a: &[T]) -> u64 {
    a.iter().map(|x| x.to_i64().unsigned_abs()).max().unwrap_or(0)
}

/// Sum of `a[i] * b[i]`, accumulated in `i64`.
pub fn scalar_product<T: Coeff>(a: &[T], b: &[T]) -> i64 {
    assert_eq!(a.len(), b.len(), "invalid b.len()={} != a.len()={}", b.len(), a.len());
    izip!(a, b).map(|(x, y)| x.to_i64() * y.to_i64()).sum()
}

pub fn norm_squared<T: Coeff>(a: &[T]) -> i64 {
    scalar_product(a, a)
}
