//! Primitive roots and twiddle-factor tables.

use crate::coeff::Coeff;
use crate::error::{MathError, Result};
use crate::modulus::limb::{euler_phi, gcd, xgcd, LimbModulus, Xgcd};
use prime_factorization::Factorization;
use tracing::debug;

/// Returns the smallest generator of `(Z/mZ)*`, or `None` if the group is
/// not cyclic or `m` is outside the domain of [euler_phi].
pub fn find_primitive_root(m: u64) -> Option<u64> {
    let phi: u64 = euler_phi(m);
    if phi == 0 {
        return None;
    }

    let modulus: LimbModulus = LimbModulus::new(m).ok()?;
    let factors: Vec<u64> = Factorization::run(phi)
        .prime_factor_repr()
        .iter()
        .map(|f| f.0)
        .collect();

    (2..m).find(|&g| {
        gcd(g, m) == 1
            && factors
                .iter()
                .all(|&f| modulus.pow_mod(g, phi / f) != 1)
    })
}

/// Returns the first `r` in `[2, q-1)` with `r^n = -1 mod q`, i.e. a
/// primitive `2n`-th root of unity when `n` is a power of two.
pub fn find_primitive_root_of_unity(q: u64, n: usize) -> Option<u64> {
    let modulus: LimbModulus = LimbModulus::new(q).ok()?;
    (2..q.saturating_sub(1)).find(|&r| modulus.pow_mod(r, n as u64) == q - 1)
}

/// Returns `n^-1 mod q`, the scaling factor of the inverse transform.
pub fn find_inverse_primitive_root(q: u64, n: usize) -> Option<u64> {
    let e: Xgcd = xgcd(n as u64, q);
    if e.gcd != 1 {
        return None;
    }
    Some(e.x.rem_euclid(q as i128) as u64)
}

/// Forward and inverse powers of a primitive `2n`-th root of unity `psi`:
/// `fwd[i] = psi^i` and `inv[i] = psi^-i`, for `0 <= i < n`.
///
/// Read-only after construction; safe to share between transforms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootsOfUnity<T> {
    n: usize,
    q: u64,
    root: u64,
    root_inv: u64,
    n_inv: u64,
    fwd: Vec<T>,
    inv: Vec<T>,
}

impl<T: Coeff> RootsOfUnity<T> {
    /// Generates the tables for length `n` modulo `q`. When `root` is `None`
    /// the smallest primitive `2n`-th root of unity is searched for.
    pub fn new(n: usize, q: u64, root: Option<u64>) -> Result<Self> {
        if n < 2 || n & (n - 1) != 0 {
            return Err(MathError::InvalidLength { n });
        }
        if q < 3 || q >> T::MAX_MODULUS_BITS != 0 {
            return Err(MathError::InvalidModulus {
                q,
                reason: "modulus does not fit the coefficient tier",
            });
        }
        if (q - 1) % (2 * n as u64) != 0 {
            return Err(MathError::LengthDoesNotDivide { n, q });
        }

        let modulus: LimbModulus = LimbModulus::new(q)?;

        let root: u64 = match root {
            Some(r) => {
                if r == 0 || r >= q || modulus.pow_mod(r, n as u64) != q - 1 {
                    return Err(MathError::InvalidRoot { root: r, q, n });
                }
                r
            }
            None => find_primitive_root_of_unity(q, n).ok_or(MathError::NoPrimitiveRoot { q, n })?,
        };

        let root_inv: u64 = modulus.inv_mod(root)?;
        let n_inv: u64 = find_inverse_primitive_root(q, n).ok_or(MathError::NotInvertible {
            value: n as u64,
            modulus: q,
        })?;

        let mut fwd: Vec<T> = Vec::with_capacity(n);
        let mut inv: Vec<T> = Vec::with_capacity(n);
        let (mut f, mut g) = (1u64, 1u64);
        for _ in 0..n {
            fwd.push(T::from_i64(f as i64));
            inv.push(T::from_i64(g as i64));
            f = modulus.mul_mod(f, root);
            g = modulus.mul_mod(g, root_inv);
        }

        debug!(n, q, root, root_inv, n_inv, "roots of unity generated");

        Ok(Self {
            n,
            q,
            root,
            root_inv,
            n_inv,
            fwd,
            inv,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn root(&self) -> u64 {
        self.root
    }

    pub fn root_inv(&self) -> u64 {
        self.root_inv
    }

    pub fn n_inv(&self) -> u64 {
        self.n_inv
    }

    pub fn fwd(&self) -> &[T] {
        &self.fwd
    }

    pub fn inv(&self) -> &[T] {
        &self.inv
    }
}
