use crate::error::{EccError, Result};
use crate::mpz::from_limbs;
use crate::{MAX_ECC_BITS, MAX_ECC_LIMBS};
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroize;

const RECODED_LIMBS: usize = 2 * MAX_ECC_LIMBS + 1;

/// Digit encoding of a secret scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Coding {
    Binary,
    #[default]
    Naf,
}

/// Symbol returned by [SecretBits::pull].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Code {
    /// Digit 0.
    Low,
    /// Digit +1.
    High,
    /// Addition performed on the dummy point only.
    ScaDummy,
    /// Digit -1.
    MinusOne,
}

const CODES: [Code; 4] = [Code::Low, Code::High, Code::ScaDummy, Code::MinusOne];

/// Pull-only cursor over the digits of a secret, most significant first.
///
/// Digits are packed `width` bits at a time into a fixed buffer sized for
/// the largest supported curve; the buffer is wiped on drop.
pub struct SecretBits {
    coding: Coding,
    digits: [u64; RECODED_LIMBS],
    width: usize,
    remaining: usize,
}

impl SecretBits {
    /// Recodes the low `num_bits` bits of `secret` (little-endian limbs) and
    /// skips leading zero digits. Returns the cursor and its active digit
    /// count; a NAF recoding may have one digit more than `num_bits`.
    pub fn new(coding: Coding, secret: &[u64], num_bits: usize) -> Result<(Self, usize)> {
        if num_bits > MAX_ECC_BITS {
            return Err(EccError::ScalarTooWide {
                bits: num_bits,
                max: MAX_ECC_BITS,
            });
        }

        let mut bits: Self = Self {
            coding,
            digits: [0u64; RECODED_LIMBS],
            width: 1,
            remaining: num_bits,
        };

        let num_limbs: usize = num_bits.div_ceil(64);
        copy_masked(secret, num_limbs, num_bits, &mut bits.digits);

        if coding == Coding::Naf {
            bits.width = 2;
            bits.remaining += bits.recode_naf() as usize;
        }

        while bits.remaining > 0 && bits.digit(bits.remaining - 1) == 0 {
            bits.remaining -= 1;
        }

        let active: usize = bits.remaining;
        Ok((bits, active))
    }

    pub fn coding(&self) -> Coding {
        self.coding
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Next digit, most significant first. Past the end every pull is
    /// [Code::Low].
    pub fn pull(&mut self) -> Code {
        if self.remaining == 0 {
            return Code::Low;
        }
        self.remaining -= 1;
        CODES[self.digit(self.remaining) as usize]
    }

    #[inline(always)]
    fn digit(&self, i: usize) -> u64 {
        let bit: usize = i * self.width;
        (self.digits[bit >> 6] >> (bit & 63)) & ((1 << self.width) - 1)
    }

    /// Rewrites the masked secret held in `digits` as 2-bit NAF digits: `1`
    /// for +1 and `3` for -1. Returns whether the recoding is longer than
    /// the input.
    fn recode_naf(&mut self) -> bool {
        let mut e: BigUint = from_limbs(&self.digits[..MAX_ECC_LIMBS]);
        self.digits.zeroize();

        let mut total: usize = 0;
        while !e.is_zero() {
            let low: u64 = e.iter_u64_digits().next().unwrap_or(0) & 3;
            if low & 1 == 1 {
                let z: u64 = 2u64.wrapping_sub(low) & 3;
                if z == 3 {
                    e += 1u32;
                } else {
                    e -= 1u32;
                }
                let bit: usize = 2 * total;
                self.digits[bit >> 6] |= z << (bit & 63);
            }
            e >>= 1;
            total += 1;
        }
        total > self.remaining
    }
}

/// Copies the low `num_bits` bits of `secret` into `out`.
fn copy_masked(secret: &[u64], num_limbs: usize, num_bits: usize, out: &mut [u64]) {
    out.iter_mut()
        .zip(secret.iter().take(num_limbs))
        .for_each(|(o, s)| *o = *s);
    let top: usize = num_bits & 63;
    if top != 0 {
        out[num_limbs - 1] &= (1u64 << top) - 1;
    }
}

impl Drop for SecretBits {
    fn drop(&mut self) {
        self.digits.zeroize();
        self.remaining = 0;
    }
}
