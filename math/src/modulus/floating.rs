use crate::error::Result;
use crate::modulus::{apply_sign, check_reduction_modulus, fold_once, Reduction};

/// Reduction through a floating-point reciprocal of q.
///
/// The quotient is estimated as `trunc(x * (1/q))`; the estimate is within
/// one of the true quotient, so the remainder lands in `(-q, 2q)` and a
/// single two-sided correction finishes the job. Words too wide for an exact
/// `f64` are split at bit 32 and folded with `2^32 mod q` first. The 16-bit
/// tier uses the single-precision reciprocal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingPointReduction {
    q: i64,
    inv_q_dbl: f64,
    inv_q_flt: f32,
    two32: i64,
}

impl FloatingPointReduction {
    pub fn new(q: u64) -> Result<Self> {
        check_reduction_modulus(q)?;
        Ok(Self {
            q: q as i64,
            inv_q_dbl: 1.0 / q as f64,
            inv_q_flt: 1.0 / q as f32,
            two32: ((1u64 << 32) % q) as i64,
        })
    }

    #[inline(always)]
    pub fn inv_q_dbl(&self) -> f64 {
        self.inv_q_dbl
    }

    #[inline(always)]
    pub fn inv_q_flt(&self) -> f32 {
        self.inv_q_flt
    }

    /// Returns x mod q for 0 <= x < max(2^52, q^2).
    #[inline(always)]
    fn reduce_exact(&self, x: i64) -> i64 {
        debug_assert!(x >= 0 && (x < 1 << 52 || x < self.q * self.q), "{} out of range", x);
        let t: i64 = (x as f64 * self.inv_q_dbl) as i64;
        fold_once(x - t * self.q, self.q)
    }

    /// Returns x mod q for any word.
    #[inline(always)]
    fn reduce(&self, x: u64) -> i64 {
        if x < 1 << 52 {
            return self.reduce_exact(x as i64);
        }
        let hi: i64 = self.reduce_exact((x >> 32) as i64);
        let lo: i64 = (x & 0xFFFF_FFFF) as i64;
        self.reduce_exact(self.reduce_exact(hi * self.two32) + lo)
    }

    /// Returns x mod q for 0 <= x < 2^30 using single precision.
    #[inline(always)]
    fn reduce_flt(&self, x: i32) -> i32 {
        let t: i32 = (x as f32 * self.inv_q_flt) as i32;
        fold_once((x - t * self.q as i32) as i64, self.q) as i32
    }
}

impl Reduction for FloatingPointReduction {
    #[inline(always)]
    fn q(&self) -> i64 {
        self.q
    }

    #[inline(always)]
    fn muln(&self, x: i64, y: i64) -> i64 {
        let a: i64 = self.reduce(x.unsigned_abs());
        let b: i64 = self.reduce(y.unsigned_abs());
        apply_sign(self.reduce_exact(a * b), (x ^ y) < 0)
    }

    #[inline(always)]
    fn modn(&self, x: i64) -> i64 {
        apply_sign(self.reduce(x.unsigned_abs()), x < 0)
    }

    #[inline(always)]
    fn muln_i16(&self, x: i16, y: i16) -> i16 {
        debug_assert!(self.q < 1 << 14, "16-bit tier requires q < 2^14");
        let a: i32 = self.reduce_flt(x.unsigned_abs() as i32);
        let b: i32 = self.reduce_flt(y.unsigned_abs() as i32);
        apply_sign(self.reduce_flt(a * b) as i64, (x ^ y) < 0) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reciprocal() {
        let r: FloatingPointReduction = FloatingPointReduction::new(12289).unwrap();
        assert!((r.inv_q_dbl() * 12289.0 - 1.0).abs() < 1e-15);
        assert!((r.inv_q_flt() * 12289.0 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn full_word_operands() {
        for q in [2u64, 7681, 12289, (1 << 31) - 1] {
            let r: FloatingPointReduction = FloatingPointReduction::new(q).unwrap();
            let qi: i128 = q as i128;
            for x in [i64::MIN, i64::MIN + 1, -(1 << 52), (1 << 52) - 1, 1 << 52, 3 << 60, i64::MAX] {
                assert_eq!(r.modn(x) as i128, x as i128 % qi, "q={} x={}", q, x);
                for y in [-1i64, 12345, i64::MAX] {
                    assert_eq!(r.muln(x, y) as i128, x as i128 * y as i128 % qi, "q={} x={} y={}", q, x, y);
                }
            }
        }
    }

    #[test]
    fn narrow_tier_matches_wide() {
        let r: FloatingPointReduction = FloatingPointReduction::new(12289).unwrap();
        for x in (i16::MIN..=i16::MAX).step_by(97) {
            for y in [i16::MIN, -12289, -1, 0, 1, 7, 12288, i16::MAX] {
                assert_eq!(r.muln_i16(x, y) as i64, r.muln(x as i64, y as i64), "x={} y={}", x, y);
            }
        }
    }
}
