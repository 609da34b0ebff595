pub mod backend;
pub mod barrett;
pub mod floating;
pub mod limb;
pub mod reference;

use crate::error::{MathError, Result};

pub trait WordOps<O> {
    fn log2(self) -> O;
    fn reverse_bits_msb(self, n: u32) -> O;
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (usize::BITS - n)
    }
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q in constant time.
    /// User must ensure that 2q fits in O.
    fn reduce_once_constant_time_assign(&mut self, q: O);
}

impl ReduceOnce<u64> for u64 {
    #[inline(always)]
    fn reduce_once_constant_time_assign(&mut self, q: u64) {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        *self -= (q.wrapping_sub(*self + 1) >> 63) * q;
    }
}

/// Returns `r` if `neg` is false and `-r` otherwise, without branching.
#[inline(always)]
pub(crate) fn apply_sign(r: i64, neg: bool) -> i64 {
    let mask: i64 = -(neg as i64);
    (r ^ mask) - mask
}

/// Maps `r` in `(-q, 2q)` to `[0, q)` without branching.
#[inline(always)]
pub(crate) fn fold_once(mut r: i64, q: i64) -> i64 {
    r += (r >> 63) & q;
    r -= ((q - 1 - r) >> 63) & q;
    r
}

/// Modular multiplication with a fixed modulus `q`.
///
/// Every implementation returns the truncated remainder of the exact product:
/// the result carries the sign of `x * y` and has magnitude smaller than `q`.
/// All back-ends agree bit for bit on every pair of words when
/// `2 <= q < 2^31`.
pub trait Reduction {
    fn q(&self) -> i64;

    /// Returns x * y mod q (truncated, signed).
    fn muln(&self, x: i64, y: i64) -> i64;

    /// Returns x mod q (truncated, signed).
    fn modn(&self, x: i64) -> i64;

    /// 16-bit tier multiplication, for back-ends with a narrower fast path.
    #[inline(always)]
    fn muln_i16(&self, x: i16, y: i16) -> i16 {
        self.muln(x as i64, y as i64) as i16
    }

    #[inline(always)]
    fn sqrn(&self, x: i64) -> i64 {
        self.muln(x, x)
    }

    /// Returns x^e mod q by square-and-multiply over [Reduction::muln].
    fn pwr(&self, x: i64, e: u64) -> i64 {
        let mut base: i64 = self.modn(x);
        let mut acc: i64 = self.modn(1);
        let mut e: u64 = e;
        while e > 0 {
            if e & 1 == 1 {
                acc = self.muln(acc, base);
            }
            base = self.sqrn(base);
            e >>= 1;
        }
        acc
    }

    /// Returns x^-1 mod q through Fermat's little theorem; q must be prime.
    fn invert(&self, x: i64) -> Result<i64> {
        let q: i64 = self.q();
        let r: i64 = self.pwr(x, (q - 2) as u64);
        if r == 0 {
            return Err(MathError::NotInvertible {
                value: x.unsigned_abs(),
                modulus: q as u64,
            });
        }
        Ok(r)
    }

    /// Returns x / y mod q; q must be prime.
    fn div(&self, x: i64, y: i64) -> Result<i64> {
        Ok(self.muln(x, self.invert(y)?))
    }
}

/// Shared validation of a reduction modulus.
pub(crate) fn check_reduction_modulus(q: u64) -> Result<()> {
    if q < 2 {
        return Err(MathError::InvalidModulus {
            q,
            reason: "modulus must be at least 2",
        });
    }
    if q >= 1 << 31 {
        return Err(MathError::InvalidModulus {
            q,
            reason: "modulus must be smaller than 2^31",
        });
    }
    Ok(())
}
