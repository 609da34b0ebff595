//! Single-word modular arithmetic.
//!
//! Products are formed as a double word `(hi, lo)` and reduced with a
//! precomputed reciprocal of the normalised modulus (2/1 division by
//! invariant integer), so no hardware division is needed once a
//! [LimbModulus] is built.

use crate::error::{MathError, Result};

/// Returns the double-word product `a * b` as `(hi, lo)`.
#[inline(always)]
pub fn mul_hi_lo(a: u64, b: u64) -> (u64, u64) {
    let p: u128 = a as u128 * b as u128;
    ((p >> 64) as u64, p as u64)
}

/// Returns `floor((B^2 - 1) / d) - B` with `B = 2^64` for a normalised `d`
/// (most significant bit set).
#[inline(always)]
pub fn limb_inverse(d: u64) -> u64 {
    debug_assert!(d >> 63 == 1, "limb_inverse requires a normalised divisor");
    (u128::MAX / d as u128 - (1u128 << 64)) as u64
}

/// Modulus descriptor: `m`, the reciprocal of `m << norm` and `norm = clz(m)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimbModulus {
    pub m: u64,
    pub m_inv: u64,
    pub norm: u32,
}

impl LimbModulus {
    pub fn new(m: u64) -> Result<Self> {
        if m < 2 {
            return Err(MathError::InvalidModulus {
                q: m,
                reason: "modulus must be at least 2",
            });
        }
        let norm: u32 = m.leading_zeros();
        Ok(Self {
            m,
            m_inv: limb_inverse(m << norm),
            norm,
        })
    }

    /// Returns `(hi * 2^64 + lo) mod m`. Requires `hi < m`.
    #[inline(always)]
    pub fn reduce_norm(&self, hi: u64, lo: u64) -> u64 {
        debug_assert!(hi < self.m, "reduce_norm requires hi < m");
        let d: u64 = self.m << self.norm;
        let (u1, u0) = if self.norm == 0 {
            (hi, lo)
        } else {
            (
                (hi << self.norm) | (lo >> (64 - self.norm)),
                lo << self.norm,
            )
        };

        let q: u128 = (self.m_inv as u128 * u1 as u128)
            .wrapping_add(((u1 as u128) << 64) | u0 as u128);
        let q1: u64 = ((q >> 64) as u64).wrapping_add(1);
        let q0: u64 = q as u64;

        let mut r: u64 = u0.wrapping_sub(q1.wrapping_mul(d));
        if r > q0 {
            r = r.wrapping_add(d);
        }
        if r >= d {
            r -= d;
        }
        r >> self.norm
    }

    /// Returns `x mod m` for any word.
    #[inline(always)]
    pub fn reduce(&self, x: u64) -> u64 {
        self.reduce_norm(0, x)
    }

    #[inline(always)]
    pub fn mul_mod(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.m && b < self.m);
        let (hi, lo) = mul_hi_lo(a, b);
        self.reduce_norm(hi, lo)
    }

    #[inline(always)]
    pub fn sqr_mod(&self, a: u64) -> u64 {
        self.mul_mod(a, a)
    }

    #[inline(always)]
    pub fn add_mod(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.m && b < self.m);
        let (s, carry) = a.overflowing_add(b);
        if carry || s >= self.m {
            s.wrapping_sub(self.m)
        } else {
            s
        }
    }

    #[inline(always)]
    pub fn sub_mod(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.m && b < self.m);
        if a >= b {
            a - b
        } else {
            a.wrapping_sub(b).wrapping_add(self.m)
        }
    }

    #[inline(always)]
    pub fn neg_mod(&self, a: u64) -> u64 {
        self.sub_mod(0, a)
    }

    /// Returns `a^e mod m`.
    pub fn pow_mod(&self, a: u64, e: u64) -> u64 {
        let mut base: u64 = self.reduce(a);
        let mut acc: u64 = self.reduce(1);
        let mut e: u64 = e;
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul_mod(acc, base);
            }
            base = self.sqr_mod(base);
            e >>= 1;
        }
        acc
    }

    /// Returns `a^-1 mod m`.
    pub fn inv_mod(&self, a: u64) -> Result<u64> {
        inv_mod(self.reduce(a), self.m)
    }
}

pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = if a < b { (b, a) } else { (a, b) };
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Result of the extended Euclidean algorithm: `a * x + b * y = gcd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xgcd {
    pub gcd: u64,
    pub x: i128,
    pub y: i128,
}

pub fn xgcd(a: u64, b: u64) -> Xgcd {
    let (mut old_r, mut r) = (a as i128, b as i128);
    let (mut old_x, mut x) = (1i128, 0i128);
    let (mut old_y, mut y) = (0i128, 1i128);

    while r != 0 {
        let quo: i128 = old_r / r;
        (old_r, r) = (r, old_r - quo * r);
        (old_x, x) = (x, old_x - quo * x);
        (old_y, y) = (y, old_y - quo * y);
    }

    Xgcd {
        gcd: old_r as u64,
        x: old_x,
        y: old_y,
    }
}

/// Returns `x^-1 mod m`, failing when `gcd(x, m) != 1`.
pub fn inv_mod(x: u64, m: u64) -> Result<u64> {
    let e: Xgcd = xgcd(x, m);
    if e.gcd != 1 {
        return Err(MathError::NotInvertible { value: x, modulus: m });
    }
    Ok(e.x.rem_euclid(m as i128) as u64)
}

/// Euler's totient by trial gcd. Only odd `k > 1` are supported; `0` otherwise.
/// Linear in `k`: meant for one-off parameter setup on small moduli.
pub fn euler_phi(k: u64) -> u64 {
    if k <= 1 || k & 1 == 0 {
        return 0;
    }
    (1..k).filter(|&i| gcd(i, k) == 1).count() as u64
}
