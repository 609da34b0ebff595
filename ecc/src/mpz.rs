//! Big-integer glue for the curve arithmetic.

use crate::error::{EccError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Parses a big-endian hexadecimal constant.
pub fn from_hex(s: &'static str) -> Result<BigUint> {
    BigUint::parse_bytes(s.as_bytes(), 16).ok_or(EccError::InvalidHex(s))
}

pub fn from_be_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Big-endian encoding left-padded to exactly `width` bytes.
pub fn to_be_bytes_fixed(x: &BigUint, width: usize) -> Result<Vec<u8>> {
    let bytes: Vec<u8> = x.to_bytes_be();
    if x.is_zero() {
        return Ok(vec![0u8; width]);
    }
    if bytes.len() > width {
        return Err(EccError::ValueTooWide { width });
    }
    let mut out: Vec<u8> = vec![0u8; width - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Little-endian 64-bit limbs, least significant first.
pub fn from_limbs(limbs: &[u64]) -> BigUint {
    let bytes: Vec<u8> = limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// Exactly `n` little-endian limbs.
pub fn to_limbs(x: &BigUint, n: usize) -> Result<Vec<u64>> {
    let mut limbs: Vec<u64> = x.to_u64_digits();
    if limbs.len() > n {
        return Err(EccError::ValueTooWide { width: 8 * n });
    }
    limbs.resize(n, 0);
    Ok(limbs)
}

/// Writes `x` into `out` as little-endian 32-bit words, zero padded.
pub fn load_words(x: &BigUint, out: &mut [u32]) -> Result<()> {
    if x.bits() > 32 * out.len() as u64 {
        return Err(EccError::ValueTooWide { width: 4 * out.len() });
    }
    out.fill(0);
    out.iter_mut().zip(x.iter_u32_digits()).for_each(|(o, d)| *o = d);
    Ok(())
}

/// Secret big integer whose digits are overwritten with zeros on drop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretUint(BigUint);

impl SecretUint {
    pub fn new(x: BigUint) -> Self {
        Self(x)
    }

    pub fn from_limbs(limbs: &[u64]) -> Self {
        Self(from_limbs(limbs))
    }
}

impl Deref for SecretUint {
    type Target = BigUint;

    fn deref(&self) -> &BigUint {
        &self.0
    }
}

impl Zeroize for SecretUint {
    fn zeroize(&mut self) {
        let words: usize = self.0.iter_u32_digits().len();
        self.0.assign_from_slice(&vec![0u32; words]);
    }
}

impl Drop for SecretUint {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SecretUint {}

pub trait ModOps {
    fn add_mod(&self, other: &Self, m: &Self) -> Self;
    fn sub_mod(&self, other: &Self, m: &Self) -> Self;
    fn mul_mod(&self, other: &Self, m: &Self) -> Self;
    /// Inverse modulo `m`, `None` when `gcd(self, m) != 1`.
    fn invmod(&self, m: &Self) -> Option<Self>
    where
        Self: Sized;
}

impl ModOps for BigUint {
    fn add_mod(&self, other: &Self, m: &Self) -> Self {
        (self + other) % m
    }

    /// Operands must already be reduced.
    fn sub_mod(&self, other: &Self, m: &Self) -> Self {
        if self >= other {
            self - other
        } else {
            m - (other - self)
        }
    }

    fn mul_mod(&self, other: &Self, m: &Self) -> Self {
        (self * other) % m
    }

    fn invmod(&self, m: &Self) -> Option<Self> {
        let a: BigInt = BigInt::from_biguint(Sign::Plus, self % m);
        let n: BigInt = BigInt::from_biguint(Sign::Plus, m.clone());
        let e = a.extended_gcd(&n);
        if !e.gcd.is_one() {
            return None;
        }
        e.x.mod_floor(&n).to_biguint()
    }
}

/// Barrett reducer over a fixed prime field, `mu = floor(4^k / p)` with
/// `k = bits(p)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarrettField {
    p: BigUint,
    mu: BigUint,
    k: u64,
}

impl BarrettField {
    pub fn new(p: BigUint) -> Self {
        let k: u64 = p.bits();
        let mu: BigUint = (BigUint::one() << (2 * k)) / &p;
        Self { p, mu, k }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// `x <- x mod p` for `x < p^2`, with `t` as quotient storage.
    pub fn reduce_assign(&self, x: &mut BigUint, t: &mut BigUint) {
        debug_assert!(x.bits() <= 2 * self.k);
        t.clone_from(x);
        *t >>= self.k - 1;
        *t *= &self.mu;
        *t >>= self.k + 1;
        *t *= &self.p;
        *x -= &*t;
        while *x >= self.p {
            *x -= &self.p;
        }
    }

    /// `a <- a + b mod p` for reduced operands.
    pub fn add_assign(&self, a: &mut BigUint, b: &BigUint) {
        *a += b;
        if *a >= self.p {
            *a -= &self.p;
        }
    }

    /// `a <- a - b mod p` for reduced operands.
    pub fn sub_assign(&self, a: &mut BigUint, b: &BigUint) {
        if *a < *b {
            *a += &self.p;
        }
        *a -= b;
    }

    pub fn mul_assign(&self, a: &mut BigUint, b: &BigUint, t: &mut BigUint) {
        *a *= b;
        self.reduce_assign(a, t);
    }

    pub fn sqr_assign(&self, a: &mut BigUint, t: &mut BigUint) {
        t.clone_from(a);
        *a *= &*t;
        self.reduce_assign(a, t);
    }

    /// Returns `x mod p` for `x < p^2`.
    pub fn reduce(&self, x: &BigUint) -> BigUint {
        let mut r: BigUint = x.clone();
        self.reduce_assign(&mut r, &mut BigUint::zero());
        r
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let mut r: BigUint = a.clone();
        self.add_assign(&mut r, b);
        r
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let mut r: BigUint = a.clone();
        self.sub_assign(&mut r, b);
        r
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce(&(a * b))
    }

    pub fn sqr(&self, a: &BigUint) -> BigUint {
        self.reduce(&(a * a))
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.p - a
        }
    }

    pub fn inv(&self, a: &BigUint) -> Result<BigUint> {
        a.invmod(&self.p).ok_or(EccError::NotInvertible("field prime"))
    }
}
