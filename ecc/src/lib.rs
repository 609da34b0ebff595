pub mod curves;
pub mod ecdh;
pub mod ecdsa;
pub mod error;
pub mod mpz;
pub mod mult;
pub mod point;
pub mod secret_bits;

pub use curves::{Curve, EcContext};
pub use ecdh::EcdhKeyPair;
pub use ecdsa::Ecdsa;
pub use error::{EccError, Result};
pub use mult::scalar_point_mult;
pub use point::{point_add, point_double, CoordType, EcPoint, Scratch};
pub use secret_bits::{Code, Coding, SecretBits};

/// Bit width of the largest supported field (secp521r1).
pub const MAX_ECC_BITS: usize = 521;

/// 64-bit limbs of a [MAX_ECC_BITS]-bit value.
pub const MAX_ECC_LIMBS: usize = MAX_ECC_BITS.div_ceil(64);
