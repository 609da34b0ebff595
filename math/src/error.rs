use thiserror::Error;

pub type Result<T> = std::result::Result<T, MathError>;

/// Parameter and arithmetic failures of the limb, root and NTT layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MathError {
    #[error("invalid modulus {q}: {reason}")]
    InvalidModulus { q: u64, reason: &'static str },

    #[error("invalid transform length {n}: must be a power of two >= 2")]
    InvalidLength { n: usize },

    #[error("2n does not divide q - 1 for n = {n}, q = {q}")]
    LengthDoesNotDivide { n: usize, q: u64 },

    #[error("no primitive {n}-th root of -1 exists modulo {q}")]
    NoPrimitiveRoot { q: u64, n: usize },

    #[error("{root} is not a primitive root of -1 of order {n} modulo {q}")]
    InvalidRoot { root: u64, q: u64, n: usize },

    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: u64, modulus: u64 },

    #[error("inconsistent Barrett constants for q = {q}: k = {k}, m = {m}")]
    BarrettConstants { q: u64, k: u32, m: u64 },
}
