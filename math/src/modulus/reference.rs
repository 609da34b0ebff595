use crate::error::Result;
use crate::modulus::{check_reduction_modulus, Reduction};

/// Reduction through the native remainder operator. Slowest back-end,
/// and the oracle the other two are checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceReduction {
    q: i64,
}

impl ReferenceReduction {
    pub fn new(q: u64) -> Result<Self> {
        check_reduction_modulus(q)?;
        Ok(Self { q: q as i64 })
    }
}

impl Reduction for ReferenceReduction {
    #[inline(always)]
    fn q(&self) -> i64 {
        self.q
    }

    #[inline(always)]
    fn muln(&self, x: i64, y: i64) -> i64 {
        (x as i128 * y as i128 % self.q as i128) as i64
    }

    #[inline(always)]
    fn modn(&self, x: i64) -> i64 {
        x % self.q
    }
}
