use thiserror::Error;

pub type Result<T> = std::result::Result<T, EccError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EccError {
    #[error("invalid hexadecimal constant {0:?}")]
    InvalidHex(&'static str),

    #[error("scalar of {bits} bits exceeds the {max}-bit maximum")]
    ScalarTooWide { bits: usize, max: usize },

    #[error("value needs more than {width} bytes")]
    ValueTooWide { width: usize },

    #[error("expected an encoding of {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("point is not on {0}")]
    PointNotOnCurve(&'static str),

    #[error("identity point is not a valid public value")]
    IdentityPoint,

    #[error("value is not invertible modulo the {0}")]
    NotInvertible(&'static str),

    #[error("signature verification failed")]
    InvalidSignature,
}
