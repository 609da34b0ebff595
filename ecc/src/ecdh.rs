use crate::curves::EcContext;
use crate::error::{EccError, Result};
use crate::mult::scalar_point_mult;
use crate::point::{EcPoint, Scratch};
use crate::secret_bits::Coding;
use sampling::source::Source;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Ephemeral Diffie-Hellman key pair on one curve.
pub struct EcdhKeyPair {
    ctx: EcContext,
    secret: Zeroizing<Vec<u64>>,
    coding: Coding,
}

impl EcdhKeyPair {
    pub fn generate(ctx: &EcContext, source: &mut Source) -> Result<Self> {
        let secret: Zeroizing<Vec<u64>> = ctx.random_scalar(source)?;
        debug!(curve = ctx.name(), "ecdh key pair generated");
        Ok(Self {
            ctx: ctx.clone(),
            secret,
            coding: Coding::default(),
        })
    }

    /// Key pair from explicit little-endian secret limbs.
    pub fn from_secret(ctx: &EcContext, secret: &[u64]) -> Self {
        Self {
            ctx: ctx.clone(),
            secret: Zeroizing::new(secret.to_vec()),
            coding: Coding::default(),
        }
    }

    pub fn with_coding(mut self, coding: Coding) -> Self {
        self.coding = coding;
        self
    }

    pub fn context(&self) -> &EcContext {
        &self.ctx
    }

    /// Public message: fixed-width `x || y` of `d * G`.
    pub fn encapsulate(&self) -> Result<Vec<u8>> {
        let mut s: Scratch = Scratch::new();
        let q: EcPoint = scalar_point_mult(&self.ctx, self.ctx.generator(), &self.secret, self.coding, &mut s)?;
        q.encode(&self.ctx)
    }

    /// Shared secret: fixed-width `x` of `d * Q` for the peer's `x || y`.
    pub fn decapsulate(&self, peer: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let q: EcPoint = EcPoint::decode(&self.ctx, peer).inspect_err(|e| {
            warn!(curve = self.ctx.name(), error = %e, "rejected peer point");
        })?;
        let mut s: Scratch = Scratch::new();
        let shared: EcPoint = scalar_point_mult(&self.ctx, &q, &self.secret, self.coding, &mut s)?;
        if shared.is_identity() {
            return Err(EccError::IdentityPoint);
        }
        Ok(Zeroizing::new(shared.encode_x(&self.ctx)?))
    }
}
