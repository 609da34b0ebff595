use crate::error::{MathError, Result};
use crate::modulus::{apply_sign, check_reduction_modulus, ReduceOnce, Reduction};

/// Barrett reduction with `m = floor(2^k / q)`.
///
/// Operands are first brought below `2q` with the word-wide quotient
/// `hi = floor(2^64 / q)`, corrected once, multiplied, and the product
/// (smaller than `2^k`) is reduced with `(m, k)` and corrected once more.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarrettReduction {
    q: u64,
    k: u32,
    m: u64,
    hi: u64,
}

impl BarrettReduction {
    /// Default constants: `k = max(30, 2 * bits(q))`.
    pub fn new(q: u64) -> Result<Self> {
        check_reduction_modulus(q)?;
        let k: u32 = 30.max(2 * (u64::BITS - q.leading_zeros()));
        let m: u64 = ((1u128 << k) / q as u128) as u64;
        Self::with_constants(q, k, m)
    }

    /// Builds the reducer from explicit `(k, m)`, rejecting constants that
    /// are not `m = floor(2^k / q)` or leave no headroom for `(q-1)^2`.
    pub fn with_constants(q: u64, k: u32, m: u64) -> Result<Self> {
        check_reduction_modulus(q)?;
        if k > 62 || ((1u128 << k) / q as u128) as u64 != m || ((q - 1) as u128).pow(2) >= 1u128 << k
        {
            return Err(MathError::BarrettConstants { q, k, m });
        }
        Ok(Self {
            q,
            k,
            m,
            hi: ((1u128 << 64) / q as u128) as u64,
        })
    }

    #[inline(always)]
    pub fn k(&self) -> u32 {
        self.k
    }

    #[inline(always)]
    pub fn m(&self) -> u64 {
        self.m
    }

    /// Returns x mod q for any word.
    #[inline(always)]
    fn reduce_wide(&self, x: u64) -> u64 {
        let t: u64 = ((x as u128 * self.hi as u128) >> 64) as u64;
        let mut r: u64 = x.wrapping_sub(t.wrapping_mul(self.q));
        r.reduce_once_constant_time_assign(self.q);
        r
    }

    /// Returns x mod q for x < 2^k.
    #[inline(always)]
    fn reduce(&self, x: u64) -> u64 {
        debug_assert!(x < 1 << self.k, "{} >= 2^{}", x, self.k);
        let t: u64 = ((x as u128 * self.m as u128) >> self.k) as u64;
        let mut r: u64 = x - t * self.q;
        r.reduce_once_constant_time_assign(self.q);
        r
    }
}

impl Reduction for BarrettReduction {
    #[inline(always)]
    fn q(&self) -> i64 {
        self.q as i64
    }

    #[inline(always)]
    fn muln(&self, x: i64, y: i64) -> i64 {
        let a: u64 = self.reduce_wide(x.unsigned_abs());
        let b: u64 = self.reduce_wide(y.unsigned_abs());
        let r: u64 = self.reduce(a * b);
        apply_sign(r as i64, (x ^ y) < 0)
    }

    #[inline(always)]
    fn modn(&self, x: i64) -> i64 {
        apply_sign(self.reduce_wide(x.unsigned_abs()) as i64, x < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        let r: BarrettReduction = BarrettReduction::new(12289).unwrap();
        assert_eq!(r.k(), 30);
        assert_eq!(r.m(), 87374);
        let r: BarrettReduction = BarrettReduction::new(8380417).unwrap();
        assert_eq!(r.k(), 46);
    }

    #[test]
    fn explicit_constants() {
        assert!(BarrettReduction::with_constants(12289, 30, 87374).is_ok());
        assert_eq!(
            BarrettReduction::with_constants(12289, 25, 2730),
            Err(MathError::BarrettConstants {
                q: 12289,
                k: 25,
                m: 2730
            })
        );
        assert!(BarrettReduction::with_constants(12289, 30, 87375).is_err());
    }

    #[test]
    fn muln_signs() {
        let r: BarrettReduction = BarrettReduction::new(12289).unwrap();
        assert_eq!(r.muln(1234, 5678), 1922);
        assert_eq!(r.muln(-1234, 5678), -1922);
        assert_eq!(r.muln(-1234, -5678), 1922);
        assert_eq!(r.muln(1, -12290), -1);
        assert_eq!(r.modn(-12290), -1);
        assert_eq!(r.modn(i64::MIN), -(((1u64 << 63) % 12289) as i64));
    }
}
