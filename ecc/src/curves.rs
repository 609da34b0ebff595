use crate::error::Result;
use crate::mpz::{from_hex, from_limbs, to_limbs, BarrettField};
use crate::point::EcPoint;
use crate::MAX_ECC_BITS;
use num_bigint::BigUint;
use num_traits::Zero;
use sampling::source::Source;
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// Named short Weierstrass curves `y^2 = x^3 - 3x + b` over a prime field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    Secp192r1,
    Secp224r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

/// Hexadecimal curve constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams {
    pub name: &'static str,
    pub p: &'static str,
    pub b: &'static str,
    pub order: &'static str,
    pub g_x: &'static str,
    pub g_y: &'static str,
}

const SECP192R1: CurveParams = CurveParams {
    name: "secp192r1",
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFF",
    b: "64210519E59C80E70FA7E9AB72243049FEB8DEECC146B9B1",
    order: "FFFFFFFFFFFFFFFFFFFFFFFF99DEF836146BC9B1B4D22831",
    g_x: "188DA80EB03090F67CBF20EB43A18800F4FF0AFD82FF1012",
    g_y: "07192B95FFC8DA78631011ED6B24CDD573F977A11E794811",
};

const SECP224R1: CurveParams = CurveParams {
    name: "secp224r1",
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF000000000000000000000001",
    b: "B4050A850C04B3ABF54132565044B0B7D7BFD8BA270B39432355FFB4",
    order: "FFFFFFFFFFFFFFFFFFFFFFFFFFFF16A2E0B8F03E13DD29455C5C2A3D",
    g_x: "B70E0CBD6BB4BF7F321390B94A03C1D356C21122343280D6115C1D21",
    g_y: "BD376388B5F723FB4C22DFE6CD4375A05A07476444D5819985007E34",
};

const SECP256R1: CurveParams = CurveParams {
    name: "secp256r1",
    p: "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF",
    b: "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B",
    order: "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
    g_x: "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296",
    g_y: "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
};

const SECP384R1: CurveParams = CurveParams {
    name: "secp384r1",
    p: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFF",
    b: "B3312FA7E23EE7E4988E056BE3F82D19181D9C6EFE8141120314088F5013875AC656398D8A2ED19D2A85C8EDD3EC2AEF",
    order: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC7634D81F4372DDF581A0DB248B0A77AECEC196ACCC52973",
    g_x: "AA87CA22BE8B05378EB1C71EF320AD746E1D3B628BA79B9859F741E082542A385502F25DBF55296C3A545E3872760AB7",
    g_y: "3617DE4A96262C6F5D9E98BF9292DC29F8F41DBD289A147CE9DA3113B5F0B8C00A60B1CE1D7E819D7A431D7C90EA0E5F",
};

const SECP521R1: CurveParams = CurveParams {
    name: "secp521r1",
    p: "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
    b: "0051953EB9618E1C9A1F929A21A0B68540EEA2DA725B99B315F3B8B489918EF109E156193951EC7E937B1652C0BD3BB1BF073573DF883D2C34F1EF451FD46B503F00",
    order: "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFA51868783BF2F966B7FCC0148F709A5D03BB5C9B8899C47AEBB6FB71E91386409",
    g_x: "00C6858E06B70404E9CD9E3ECB662395B4429C648139053FB521F828AF606B4D3DBAA14B5E77EFE75928FE1DC127A2FFA8DE3348B3C1856A429BF97E7E31C2E5BD66",
    g_y: "011839296A789A3BC0045C8A5FB42C7D1BD998F54449579B446817AFBD17273E662C97EE72995EF42640C550B9013FAD0761353C7086A272C24088BE94769FD16650",
};

impl Curve {
    pub const ALL: [Curve; 5] = [
        Curve::Secp192r1,
        Curve::Secp224r1,
        Curve::Secp256r1,
        Curve::Secp384r1,
        Curve::Secp521r1,
    ];

    pub fn params(&self) -> &'static CurveParams {
        match self {
            Curve::Secp192r1 => &SECP192R1,
            Curve::Secp224r1 => &SECP224R1,
            Curve::Secp256r1 => &SECP256R1,
            Curve::Secp384r1 => &SECP384R1,
            Curve::Secp521r1 => &SECP521R1,
        }
    }

    pub fn name(&self) -> &'static str {
        self.params().name
    }
}

/// Parsed curve constants shared by every operation on one curve. Read-only
/// after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcContext {
    curve: Curve,
    field: BarrettField,
    a: BigUint,
    b: BigUint,
    order: BigUint,
    g: EcPoint,
    field_bits: usize,
    order_bits: usize,
    num_bytes: usize,
    num_limbs: usize,
}

impl EcContext {
    pub fn new(curve: Curve) -> Result<Self> {
        let params: &CurveParams = curve.params();
        let p: BigUint = from_hex(params.p)?;
        let a: BigUint = &p - 3u32;
        let b: BigUint = from_hex(params.b)?;
        let order: BigUint = from_hex(params.order)?;
        let g: EcPoint = EcPoint::new(from_hex(params.g_x)?, from_hex(params.g_y)?);

        let field_bits: usize = p.bits() as usize;
        let order_bits: usize = order.bits() as usize;
        debug_assert!(field_bits <= MAX_ECC_BITS);

        debug!(curve = params.name, field_bits, order_bits, "curve context ready");

        Ok(Self {
            curve,
            field: BarrettField::new(p),
            a,
            b,
            order,
            g,
            field_bits,
            order_bits,
            num_bytes: field_bits.div_ceil(8),
            num_limbs: field_bits.div_ceil(64),
        })
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn name(&self) -> &'static str {
        self.curve.name()
    }

    pub fn field(&self) -> &BarrettField {
        &self.field
    }

    pub fn p(&self) -> &BigUint {
        self.field.p()
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    pub fn generator(&self) -> &EcPoint {
        &self.g
    }

    pub fn field_bits(&self) -> usize {
        self.field_bits
    }

    pub fn order_bits(&self) -> usize {
        self.order_bits
    }

    /// Width of one encoded coordinate.
    pub fn num_bytes(&self) -> usize {
        self.num_bytes
    }

    /// Width of an encoded scalar modulo the order.
    pub fn order_bytes(&self) -> usize {
        self.order_bits.div_ceil(8)
    }

    pub fn num_limbs(&self) -> usize {
        self.num_limbs
    }

    /// Draws a scalar uniformly from `[1, order - 1]` by rejection and
    /// returns its little-endian limbs.
    pub fn random_scalar(&self, source: &mut Source) -> Result<Zeroizing<Vec<u64>>> {
        let mut limbs: Zeroizing<Vec<u64>> = Zeroizing::new(vec![0u64; self.order_bits.div_ceil(64)]);
        loop {
            source.fill_limbs(&mut limbs, self.order_bits);
            let k: BigUint = from_limbs(&limbs);
            if !k.is_zero() && k < self.order {
                return Ok(Zeroizing::new(to_limbs(&k, self.num_limbs)?));
            }
            trace!(curve = self.name(), "scalar out of range, resampling");
        }
    }
}
