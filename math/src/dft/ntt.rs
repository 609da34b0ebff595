use crate::coeff::Coeff;
use crate::dft::DFT;
use crate::error::{MathError, Result};
use crate::modulus::backend::Reducer;
use crate::modulus::{Reduction, WordOps};
use crate::params::NttParams;
use crate::roots::RootsOfUnity;
use crate::{apply_binary, apply_ternary, CHUNK};
use itertools::izip;
use primality_test::is_prime;
use tracing::debug;

/// Negacyclic number-theoretic transform over `Z_q[X]/(X^n + 1)`.
///
/// The forward transform twists the input by `psi^i` (`psi` a primitive
/// `2n`-th root of unity), permutes it into bit-reversed order and runs a
/// cyclic decimation-in-time transform with `omega = psi^2`. The inverse
/// runs the same butterflies with `psi^-1` and untwists with `n^-1 psi^-i`.
///
/// Coefficients are kept as truncated residues in `(-q, q)` between steps;
/// [Ntt::forward] leaves them in `[0, q)` and [Ntt::inverse] in
/// `[-(q-1)/2, (q-1)/2]`.
#[derive(Clone, Debug)]
pub struct Ntt<T: Coeff, R: Reduction = Reducer> {
    reduction: R,
    roots: RootsOfUnity<T>,
    scale: Vec<T>,
    log_n: u32,
}

impl<T: Coeff> Ntt<T, Reducer> {
    /// Builds the transform of a parameter set with its configured back-end.
    pub fn from_params(params: &NttParams) -> Result<Self> {
        Self::new(params.n, Reducer::new(params.backend, params.q)?, params.root)
    }
}

impl<T: Coeff, R: Reduction> Ntt<T, R> {
    pub fn new(n: usize, reduction: R, root: Option<u64>) -> Result<Self> {
        let q: u64 = reduction.q() as u64;
        if !is_prime(q) {
            return Err(MathError::InvalidModulus {
                q,
                reason: "modulus must be prime",
            });
        }

        let roots: RootsOfUnity<T> = RootsOfUnity::new(n, q, root)?;
        let n_inv: i64 = roots.n_inv() as i64;
        let scale: Vec<T> = roots
            .inv()
            .iter()
            .map(|g| T::from_i64(reduction.muln(n_inv, g.to_i64())))
            .collect();

        debug!(n, q, root = roots.root(), "ntt ready");

        Ok(Self {
            reduction,
            roots,
            scale,
            log_n: n.log2() as u32,
        })
    }

    pub fn n(&self) -> usize {
        self.roots.n()
    }

    pub fn q(&self) -> i64 {
        self.reduction.q()
    }

    pub fn reduction(&self) -> &R {
        &self.reduction
    }

    pub fn roots(&self) -> &RootsOfUnity<T> {
        &self.roots
    }

    #[inline(always)]
    pub fn muln(&self, x: T, y: T) -> T {
        T::muln(&self.reduction, x, y)
    }

    #[inline(always)]
    pub fn modn(&self, x: T) -> T {
        T::from_i64(self.reduction.modn(x.to_i64()))
    }

    #[inline(always)]
    pub fn sqrn(&self, x: T) -> T {
        self.muln(x, x)
    }

    pub fn pwr(&self, x: T, e: u64) -> T {
        T::from_i64(self.reduction.pwr(x.to_i64(), e))
    }

    pub fn invert(&self, x: T) -> Result<T> {
        Ok(T::from_i64(self.reduction.invert(x.to_i64())?))
    }

    pub fn div(&self, x: T, y: T) -> Result<T> {
        Ok(T::from_i64(self.reduction.div(x.to_i64(), y.to_i64())?))
    }

    #[inline(always)]
    fn mul_assign(&self, w: &T, a: &mut T) {
        *a = self.muln(*a, *w);
    }

    #[inline(always)]
    fn mul_into(&self, a: &T, b: &T, c: &mut T) {
        *c = self.muln(*a, *b);
    }

    /// a[i] <- a[i] * w[i].
    pub fn mul_pointwise(&self, a: &mut [T], w: &[T]) {
        apply_binary!(self, Self::mul_assign, w, a, CHUNK);
    }

    /// c[i] <- a[i] * b[i].
    pub fn mul_pointwise_into(&self, a: &[T], b: &[T], c: &mut [T]) {
        apply_ternary!(self, Self::mul_into, a, b, c, CHUNK);
    }

    /// a[i] <- a[i] * s.
    pub fn mul_scalar(&self, a: &mut [T], s: T) {
        a.iter_mut().for_each(|x| *x = self.muln(*x, s));
    }

    /// c <- a * s mod (X^n + 1, q), with `s` given by its non-zero
    /// `(index, coefficient)` terms.
    pub fn mul_sparse(&self, c: &mut [T], a: &[T], s: &[(usize, T)]) {
        let n: usize = self.n();
        assert_eq!(a.len(), n, "invalid a.len()={} != n={}", a.len(), n);
        assert_eq!(c.len(), n, "invalid c.len()={} != n={}", c.len(), n);

        let mut acc: Vec<i64> = vec![0; n];
        for &(j, sj) in s {
            assert!(j < n, "sparse index {} out of range", j);
            let sj: i64 = sj.to_i64();
            a.iter().enumerate().for_each(|(i, ai)| {
                let t: i64 = self.reduction.muln(ai.to_i64(), sj);
                let k: usize = i + j;
                if k < n {
                    acc[k] = self.reduction.modn(acc[k] + t);
                } else {
                    acc[k - n] = self.reduction.modn(acc[k - n] - t);
                }
            });
        }
        izip!(c.iter_mut(), acc).for_each(|(c, v)| *c = T::from_i64(v));
    }

    #[inline(always)]
    fn butterfly(&self, a: &mut T, b: &mut T, w: T) {
        let u: i64 = a.to_i64();
        let v: i64 = self.muln(*b, w).to_i64();
        *a = T::from_i64(self.reduction.modn(u + v));
        *b = T::from_i64(self.reduction.modn(u - v));
    }

    /// Cyclic decimation-in-time transform of a bit-reversed input, with
    /// `omega^j = w[2j]`. Output is in natural order.
    pub fn fft(&self, a: &mut [T], w: &[T]) {
        let n: usize = self.n();
        assert_eq!(a.len(), n, "invalid a.len()={} != n={}", a.len(), n);
        assert_eq!(w.len(), n, "invalid w.len()={} != n={}", w.len(), n);

        for layer in 0..self.log_n {
            let half: usize = 1 << layer;
            let stride: usize = n >> layer;
            a.chunks_exact_mut(half << 1).for_each(|block| {
                let (lo, hi) = block.split_at_mut(half);
                izip!(lo, hi, w.iter().step_by(stride)).for_each(|(a, b, w)| self.butterfly(a, b, *w));
            });
        }
    }

    /// Bit-reversal permutation.
    pub fn inverse_shuffle(&self, a: &mut [T]) {
        let n: usize = self.n();
        assert_eq!(a.len(), n, "invalid a.len()={} != n={}", a.len(), n);
        for i in 0..n {
            let j: usize = i.reverse_bits_msb(self.log_n);
            if i < j {
                a.swap(i, j);
            }
        }
    }

    /// Maps every coefficient to `[0, q)`.
    pub fn normalize(&self, a: &mut [T]) {
        let q: i64 = self.q();
        a.iter_mut().for_each(|x| {
            let r: i64 = self.reduction.modn(x.to_i64());
            *x = T::from_i64(r + ((r >> 63) & q));
        });
    }

    /// Maps every coefficient to `[-(q-1)/2, (q-1)/2]`.
    pub fn center(&self, a: &mut [T]) {
        let q: i64 = self.q();
        let half: i64 = q >> 1;
        self.normalize(a);
        a.iter_mut().for_each(|x| {
            let u: i64 = x.to_i64();
            *x = T::from_i64(u - (((half - u) >> 63) & q));
        });
    }

    /// a(X) <- a(X^-1) mod X^n + 1: a[0] stays, a[i] <- -a[n-i].
    pub fn flip(&self, a: &mut [T]) {
        let n: usize = self.n();
        assert_eq!(a.len(), n, "invalid a.len()={} != n={}", a.len(), n);
        a[1..].reverse();
        a[1..]
            .iter_mut()
            .for_each(|x| *x = T::from_i64(-x.to_i64()));
    }

    /// Forward negacyclic transform; output in `[0, q)`.
    pub fn forward(&self, a: &mut [T]) {
        self.mul_pointwise(a, self.roots.fwd());
        self.inverse_shuffle(a);
        self.fft(a, self.roots.fwd());
        self.normalize(a);
    }

    /// Inverse negacyclic transform; output centered.
    pub fn inverse(&self, a: &mut [T]) {
        self.inverse_shuffle(a);
        self.fft(a, self.roots.inv());
        self.mul_pointwise(a, &self.scale);
        self.center(a);
    }

    /// Replaces every transform-domain coefficient by its inverse.
    pub fn invert_pointwise(&self, a: &mut [T]) -> Result<()> {
        a.iter_mut().try_for_each(|x| {
            *x = self.invert(*x)?;
            Ok(())
        })
    }

    /// c <- a * b mod (X^n + 1, q), centered.
    pub fn negacyclic_mul(&self, a: &[T], b: &[T], c: &mut [T]) {
        let n: usize = self.n();
        assert_eq!(b.len(), n, "invalid b.len()={} != n={}", b.len(), n);
        let mut t: Vec<T> = b.to_vec();
        c.copy_from_slice(a);
        self.forward(c);
        self.forward(&mut t);
        self.mul_pointwise(c, &t);
        self.inverse(c);
    }
}

impl<T: Coeff, R: Reduction> DFT<T> for Ntt<T, R> {
    fn forward_inplace(&self, x: &mut [T]) {
        self.forward(x)
    }

    fn backward_inplace(&self, x: &mut [T]) {
        self.inverse(x)
    }
}
