use crate::modulus::Reduction;
use std::fmt::Debug;

/// Signed coefficient word of a polynomial buffer (16, 32 or 64-bit tier).
///
/// Transform arithmetic is carried out on the `i64` widening of the coefficient;
/// values written back are residues in `(-q, q)` and therefore fit the tier as
/// long as `q` respects [Coeff::MAX_MODULUS_BITS].
pub trait Coeff: Copy + Default + PartialEq + Eq + Debug + Send + Sync + 'static {
    /// Largest bit-width of a modulus this tier can host.
    const MAX_MODULUS_BITS: u32;

    fn to_i64(self) -> i64;

    fn from_i64(v: i64) -> Self;

    #[inline(always)]
    fn muln<R: Reduction + ?Sized>(r: &R, x: Self, y: Self) -> Self {
        Self::from_i64(r.muln(x.to_i64(), y.to_i64()))
    }
}

impl Coeff for i16 {
    const MAX_MODULUS_BITS: u32 = 14;

    #[inline(always)]
    fn to_i64(self) -> i64 {
        self as i64
    }

    #[inline(always)]
    fn from_i64(v: i64) -> Self {
        debug_assert!(v >= i16::MIN as i64 && v <= i16::MAX as i64, "{} overflows i16", v);
        v as i16
    }

    #[inline(always)]
    fn muln<R: Reduction + ?Sized>(r: &R, x: Self, y: Self) -> Self {
        r.muln_i16(x, y)
    }
}

impl Coeff for i32 {
    const MAX_MODULUS_BITS: u32 = 31;

    #[inline(always)]
    fn to_i64(self) -> i64 {
        self as i64
    }

    #[inline(always)]
    fn from_i64(v: i64) -> Self {
        debug_assert!(v >= i32::MIN as i64 && v <= i32::MAX as i64, "{} overflows i32", v);
        v as i32
    }
}

impl Coeff for i64 {
    const MAX_MODULUS_BITS: u32 = 31;

    #[inline(always)]
    fn to_i64(self) -> i64 {
        self
    }

    #[inline(always)]
    fn from_i64(v: i64) -> Self {
        v
    }
}
