use crate::error::Result;
use crate::modulus::barrett::BarrettReduction;
use crate::modulus::floating::FloatingPointReduction;
use crate::modulus::reference::ReferenceReduction;
use crate::modulus::Reduction;
use tracing::debug;

/// Reduction strategy of a parameter set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    Reference,
    #[default]
    Barrett,
    FloatingPoint,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Reference, Backend::Barrett, Backend::FloatingPoint];
}

/// Reduction capability selected once from a [Backend] and a modulus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reducer {
    Reference(ReferenceReduction),
    Barrett(BarrettReduction),
    FloatingPoint(FloatingPointReduction),
}

impl Reducer {
    pub fn new(backend: Backend, q: u64) -> Result<Self> {
        let reducer: Reducer = match backend {
            Backend::Reference => Reducer::Reference(ReferenceReduction::new(q)?),
            Backend::Barrett => Reducer::Barrett(BarrettReduction::new(q)?),
            Backend::FloatingPoint => Reducer::FloatingPoint(FloatingPointReduction::new(q)?),
        };
        debug!(?backend, q, "reducer ready");
        Ok(reducer)
    }

    pub fn backend(&self) -> Backend {
        match self {
            Reducer::Reference(_) => Backend::Reference,
            Reducer::Barrett(_) => Backend::Barrett,
            Reducer::FloatingPoint(_) => Backend::FloatingPoint,
        }
    }
}

impl Reduction for Reducer {
    #[inline(always)]
    fn q(&self) -> i64 {
        match self {
            Reducer::Reference(r) => r.q(),
            Reducer::Barrett(r) => r.q(),
            Reducer::FloatingPoint(r) => r.q(),
        }
    }

    #[inline(always)]
    fn muln(&self, x: i64, y: i64) -> i64 {
        match self {
            Reducer::Reference(r) => r.muln(x, y),
            Reducer::Barrett(r) => r.muln(x, y),
            Reducer::FloatingPoint(r) => r.muln(x, y),
        }
    }

    #[inline(always)]
    fn modn(&self, x: i64) -> i64 {
        match self {
            Reducer::Reference(r) => r.modn(x),
            Reducer::Barrett(r) => r.modn(x),
            Reducer::FloatingPoint(r) => r.modn(x),
        }
    }

    #[inline(always)]
    fn muln_i16(&self, x: i16, y: i16) -> i16 {
        match self {
            Reducer::Reference(r) => r.muln_i16(x, y),
            Reducer::Barrett(r) => r.muln_i16(x, y),
            Reducer::FloatingPoint(r) => r.muln_i16(x, y),
        }
    }
}
