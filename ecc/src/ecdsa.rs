use crate::curves::EcContext;
use crate::error::{EccError, Result};
use crate::mpz::{from_be_bytes, to_be_bytes_fixed, to_limbs, ModOps, SecretUint};
use crate::mult::scalar_point_mult;
use crate::point::{point_add, EcPoint, Scratch};
use crate::secret_bits::Coding;
use num_bigint::BigUint;
use num_traits::Zero;
use sampling::source::Source;
use sha2::{Digest, Sha256};
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

/// ECDSA signing key with its public point.
pub struct Ecdsa {
    ctx: EcContext,
    secret: Zeroizing<Vec<u64>>,
    public: EcPoint,
}

/// SHA-256 of `msg`, truncated to the bit length of the group order.
pub fn message_digest(ctx: &EcContext, msg: &[u8]) -> BigUint {
    let digest = Sha256::digest(msg);
    let z: BigUint = from_be_bytes(&digest);
    let hash_bits: usize = 8 * digest.len();
    if hash_bits > ctx.order_bits() {
        z >> (hash_bits - ctx.order_bits())
    } else {
        z
    }
}

impl Ecdsa {
    pub fn keygen(ctx: &EcContext, source: &mut Source) -> Result<Self> {
        let secret: Zeroizing<Vec<u64>> = ctx.random_scalar(source)?;
        let public: EcPoint = scalar_point_mult(ctx, ctx.generator(), &secret, Coding::Naf, &mut Scratch::new())?;
        debug!(curve = ctx.name(), "ecdsa key generated");
        Ok(Self {
            ctx: ctx.clone(),
            secret,
            public,
        })
    }

    pub fn context(&self) -> &EcContext {
        &self.ctx
    }

    pub fn public_point(&self) -> &EcPoint {
        &self.public
    }

    /// Fixed-width `x || y` of the public point.
    pub fn public_key(&self) -> Result<Vec<u8>> {
        self.public.encode(&self.ctx)
    }

    /// Signs `msg` with a fresh nonce; returns fixed-width `r || s`.
    pub fn sign(&self, msg: &[u8], source: &mut Source) -> Result<Vec<u8>> {
        let ctx: &EcContext = &self.ctx;
        let n: &BigUint = ctx.order();
        let z: BigUint = message_digest(ctx, msg) % n;
        let d: SecretUint = SecretUint::from_limbs(&self.secret);
        let mut s: Scratch = Scratch::new();

        loop {
            let k: Zeroizing<Vec<u64>> = ctx.random_scalar(source)?;
            let r_point: EcPoint = scalar_point_mult(ctx, ctx.generator(), &k, Coding::Naf, &mut s)?;
            let r: BigUint = &r_point.x % n;
            if r.is_zero() {
                trace!(curve = ctx.name(), "r = 0, resampling nonce");
                continue;
            }

            let k_inv: SecretUint = SecretUint::new(
                SecretUint::from_limbs(&k)
                    .invmod(n)
                    .ok_or(EccError::NotInvertible("group order"))?,
            );
            let rd: SecretUint = SecretUint::new(r.mul_mod(&d, n));
            let sig_s: BigUint = k_inv.mul_mod(&z.add_mod(&rd, n), n);
            if sig_s.is_zero() {
                trace!(curve = ctx.name(), "s = 0, resampling nonce");
                continue;
            }

            let mut sig: Vec<u8> = to_be_bytes_fixed(&r, ctx.order_bytes())?;
            sig.extend(to_be_bytes_fixed(&sig_s, ctx.order_bytes())?);
            return Ok(sig);
        }
    }

    pub fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<()> {
        verify_point(&self.ctx, &self.public, msg, sig)
    }
}

/// Verifies `r || s` on `msg` against an encoded `x || y` public key.
pub fn verify(ctx: &EcContext, public_key: &[u8], msg: &[u8], sig: &[u8]) -> Result<()> {
    let public: EcPoint = EcPoint::decode(ctx, public_key).inspect_err(|e| {
        warn!(curve = ctx.name(), error = %e, "rejected public key");
    })?;
    verify_point(ctx, &public, msg, sig)
}

fn verify_point(ctx: &EcContext, public: &EcPoint, msg: &[u8], sig: &[u8]) -> Result<()> {
    let w: usize = ctx.order_bytes();
    if sig.len() != 2 * w {
        return Err(EccError::InvalidLength {
            expected: 2 * w,
            got: sig.len(),
        });
    }

    let n: &BigUint = ctx.order();
    let r: BigUint = from_be_bytes(&sig[..w]);
    let s: BigUint = from_be_bytes(&sig[w..]);
    if r.is_zero() || s.is_zero() || &r >= n || &s >= n {
        warn!(curve = ctx.name(), "signature component out of range");
        return Err(EccError::InvalidSignature);
    }

    let z: BigUint = message_digest(ctx, msg) % n;
    let s_inv: BigUint = s.invmod(n).ok_or(EccError::NotInvertible("group order"))?;
    let u1: Vec<u64> = to_limbs(&z.mul_mod(&s_inv, n), ctx.num_limbs())?;
    let u2: Vec<u64> = to_limbs(&r.mul_mod(&s_inv, n), ctx.num_limbs())?;

    let mut scratch: Scratch = Scratch::new();
    let mut x: EcPoint = scalar_point_mult(ctx, ctx.generator(), &u1, Coding::Naf, &mut scratch)?;
    let y: EcPoint = scalar_point_mult(ctx, public, &u2, Coding::Naf, &mut scratch)?;
    point_add(ctx, &mut x, &y, &mut scratch)?;

    if x.is_identity() || &x.x % n != r {
        return Err(EccError::InvalidSignature);
    }
    Ok(())
}
