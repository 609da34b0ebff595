use crate::curves::EcContext;
use crate::error::{EccError, Result};
use crate::mpz::{from_be_bytes, load_words, to_be_bytes_fixed, BarrettField};
use itertools::izip;
use num_bigint::BigUint;
use num_traits::Zero;
use subtle::{Choice, ConditionallySelectable};

/// Coordinate system of a point. Only affine arithmetic is implemented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordType {
    #[default]
    Affine,
    Projective,
    Jacobian,
}

/// Curve point `(x, y)`; the all-zero pair is the identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EcPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub coord: CoordType,
}

impl EcPoint {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self {
            x,
            y,
            coord: CoordType::Affine,
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// Checks `y^2 = x^3 + ax + b` with reduced coordinates. The identity
    /// counts as a curve point.
    pub fn is_on_curve(&self, ctx: &EcContext) -> bool {
        if self.is_identity() {
            return true;
        }
        let f: &BarrettField = ctx.field();
        if &self.x >= f.p() || &self.y >= f.p() {
            return false;
        }
        let lhs: BigUint = f.sqr(&self.y);
        let x3: BigUint = f.mul(&f.sqr(&self.x), &self.x);
        let rhs: BigUint = f.add(&f.add(&x3, &f.mul(ctx.a(), &self.x)), ctx.b());
        lhs == rhs
    }

    pub fn negate(&self, ctx: &EcContext) -> Self {
        Self::new(self.x.clone(), ctx.field().neg(&self.y))
    }

    /// Fixed-width big-endian `x || y`.
    pub fn encode(&self, ctx: &EcContext) -> Result<Vec<u8>> {
        let mut out: Vec<u8> = to_be_bytes_fixed(&self.x, ctx.num_bytes())?;
        out.extend(to_be_bytes_fixed(&self.y, ctx.num_bytes())?);
        Ok(out)
    }

    /// Fixed-width big-endian `x`.
    pub fn encode_x(&self, ctx: &EcContext) -> Result<Vec<u8>> {
        to_be_bytes_fixed(&self.x, ctx.num_bytes())
    }

    /// Parses `x || y` and rejects the identity and points off the curve.
    pub fn decode(ctx: &EcContext, bytes: &[u8]) -> Result<Self> {
        let w: usize = ctx.num_bytes();
        if bytes.len() != 2 * w {
            return Err(EccError::InvalidLength {
                expected: 2 * w,
                got: bytes.len(),
            });
        }
        let point: EcPoint = EcPoint::new(from_be_bytes(&bytes[..w]), from_be_bytes(&bytes[w..]));
        if point.is_identity() {
            return Err(EccError::IdentityPoint);
        }
        if !point.is_on_curve(ctx) {
            return Err(EccError::PointNotOnCurve(ctx.name()));
        }
        Ok(point)
    }

    /// Swaps `a` and `b` when `choice` is set, touching every word of both
    /// points either way.
    pub fn conditional_swap(
        ctx: &EcContext,
        a: &mut EcPoint,
        b: &mut EcPoint,
        choice: Choice,
        s: &mut Scratch,
    ) -> Result<()> {
        let (u, v) = s.words(ctx);
        for (pa, pb) in [(&mut a.x, &mut b.x), (&mut a.y, &mut b.y)] {
            load_words(pa, u)?;
            load_words(pb, v)?;
            izip!(u.iter_mut(), v.iter_mut()).for_each(|(u, v)| u32::conditional_swap(u, v, choice));
            pa.assign_from_slice(u);
            pb.assign_from_slice(v);
        }
        Ok(())
    }

    /// `out <- a` when `choice` is unset and `b` otherwise.
    pub fn conditional_select(
        ctx: &EcContext,
        a: &EcPoint,
        b: &EcPoint,
        choice: Choice,
        out: &mut EcPoint,
        s: &mut Scratch,
    ) -> Result<()> {
        let (u, v) = s.words(ctx);
        for (pa, pb, po) in [(&a.x, &b.x, &mut out.x), (&a.y, &b.y, &mut out.y)] {
            load_words(pa, u)?;
            load_words(pb, v)?;
            izip!(u.iter_mut(), v.iter()).for_each(|(u, v)| u.conditional_assign(v, choice));
            po.assign_from_slice(u);
        }
        out.coord = a.coord;
        Ok(())
    }
}

/// Caller-owned temporaries of the point formulas and selections, reused
/// across every step of a scalar multiplication.
#[derive(Clone, Debug, Default)]
pub struct Scratch {
    pub lambda: BigUint,
    pub temp: BigUint,
    pub x: BigUint,
    pub y: BigUint,
    quot: BigUint,
    words: Vec<u32>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two word buffers wide enough for a coordinate of `ctx`.
    fn words(&mut self, ctx: &EcContext) -> (&mut [u32], &mut [u32]) {
        let n: usize = 2 * ctx.num_limbs();
        if self.words.len() < 2 * n {
            self.words.resize(2 * n, 0);
        }
        self.words[..2 * n].split_at_mut(n)
    }
}

/// Given `s.lambda`, sets `a <- (lambda^2 - xa - xb, lambda (xa - x') - ya)`;
/// `xb = None` stands for `xb = xa`.
fn chord(f: &BarrettField, a: &mut EcPoint, xb: Option<&BigUint>, s: &mut Scratch) {
    s.x.clone_from(&s.lambda);
    f.sqr_assign(&mut s.x, &mut s.quot);
    f.sub_assign(&mut s.x, &a.x);
    f.sub_assign(&mut s.x, xb.unwrap_or(&a.x));

    s.temp.clone_from(&a.x);
    f.sub_assign(&mut s.temp, &s.x);
    s.y.clone_from(&s.lambda);
    f.mul_assign(&mut s.y, &s.temp, &mut s.quot);
    f.sub_assign(&mut s.y, &a.y);

    std::mem::swap(&mut a.x, &mut s.x);
    std::mem::swap(&mut a.y, &mut s.y);
}

/// `p <- 2p`. The identity and points of order two map to the identity.
pub fn point_double(ctx: &EcContext, p: &mut EcPoint, s: &mut Scratch) -> Result<()> {
    debug_assert_eq!(p.coord, CoordType::Affine);
    if p.is_identity() {
        return Ok(());
    }
    if p.y.is_zero() {
        *p = EcPoint::identity();
        return Ok(());
    }
    let f: &BarrettField = ctx.field();

    // lambda = (3x^2 + a) / 2y
    s.temp.clone_from(&p.x);
    f.sqr_assign(&mut s.temp, &mut s.quot);
    s.lambda.clone_from(&s.temp);
    f.add_assign(&mut s.temp, &s.lambda);
    f.add_assign(&mut s.temp, &s.lambda);
    f.add_assign(&mut s.temp, ctx.a());
    s.y.clone_from(&p.y);
    f.add_assign(&mut s.y, &p.y);
    s.y = f.inv(&s.y)?;
    s.lambda.clone_from(&s.temp);
    f.mul_assign(&mut s.lambda, &s.y, &mut s.quot);

    chord(f, p, None, s);
    Ok(())
}

/// `a <- a + b`, handling the identity, equal and opposite operands.
pub fn point_add(ctx: &EcContext, a: &mut EcPoint, b: &EcPoint, s: &mut Scratch) -> Result<()> {
    debug_assert_eq!(a.coord, CoordType::Affine);
    if b.is_identity() {
        return Ok(());
    }
    if a.is_identity() {
        a.clone_from(b);
        return Ok(());
    }
    if a.x == b.x {
        if a.y == b.y {
            return point_double(ctx, a, s);
        }
        *a = EcPoint::identity();
        return Ok(());
    }
    let f: &BarrettField = ctx.field();

    // lambda = (yb - ya) / (xb - xa)
    s.y.clone_from(&b.y);
    f.sub_assign(&mut s.y, &a.y);
    s.x.clone_from(&b.x);
    f.sub_assign(&mut s.x, &a.x);
    s.x = f.inv(&s.x)?;
    s.lambda.clone_from(&s.y);
    f.mul_assign(&mut s.lambda, &s.x, &mut s.quot);

    chord(f, a, Some(&b.x), s);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Curve;
    use crate::mpz::from_hex;

    fn p256_point(x: &'static str, y: &'static str) -> EcPoint {
        EcPoint::new(from_hex(x).unwrap(), from_hex(y).unwrap())
    }

    #[test]
    fn double_and_add_generator() {
        let ctx: EcContext = EcContext::new(Curve::Secp256r1).unwrap();
        let mut s: Scratch = Scratch::new();
        let g: EcPoint = ctx.generator().clone();

        let mut g2: EcPoint = g.clone();
        point_double(&ctx, &mut g2, &mut s).unwrap();
        assert_eq!(
            g2,
            p256_point(
                "7CF27B188D034F7E8A52380304B51AC3C08969E277F21B35A60B48FC47669978",
                "07775510DB8ED040293D9AC69F7430DBBA7DADE63CE982299E04B79D227873D1"
            )
        );

        let mut g3: EcPoint = g2.clone();
        point_add(&ctx, &mut g3, &g, &mut s).unwrap();
        assert_eq!(
            g3,
            p256_point(
                "5ECBE4D1A6330A44C8F7EF951D4BF165E6C6B721EFADA985FB41661BC6E7FD6C",
                "8734640C4998FF7E374B06CE1A64A2ECD82AB036384FB83D9A79B127A27D5032"
            )
        );
        assert!(g3.is_on_curve(&ctx));
    }

    #[test]
    fn exceptional_additions() {
        let ctx: EcContext = EcContext::new(Curve::Secp192r1).unwrap();
        let mut s: Scratch = Scratch::new();
        let g: EcPoint = ctx.generator().clone();

        let mut a: EcPoint = EcPoint::identity();
        point_add(&ctx, &mut a, &g, &mut s).unwrap();
        assert_eq!(a, g);

        point_add(&ctx, &mut a, &EcPoint::identity(), &mut s).unwrap();
        assert_eq!(a, g);

        let mut doubled: EcPoint = g.clone();
        point_double(&ctx, &mut doubled, &mut s).unwrap();
        point_add(&ctx, &mut a, &g, &mut s).unwrap();
        assert_eq!(a, doubled);

        let mut z: EcPoint = g.clone();
        point_add(&ctx, &mut z, &g.negate(&ctx), &mut s).unwrap();
        assert!(z.is_identity());

        let mut id: EcPoint = EcPoint::identity();
        point_double(&ctx, &mut id, &mut s).unwrap();
        assert!(id.is_identity());
    }

    #[test]
    fn encoding() {
        let ctx: EcContext = EcContext::new(Curve::Secp224r1).unwrap();
        let g: EcPoint = ctx.generator().clone();
        let bytes: Vec<u8> = g.encode(&ctx).unwrap();
        assert_eq!(bytes.len(), 56);
        assert_eq!(EcPoint::decode(&ctx, &bytes).unwrap(), g);
        assert_eq!(g.encode_x(&ctx).unwrap(), bytes[..28].to_vec());

        let mut bad: Vec<u8> = bytes.clone();
        bad[55] ^= 1;
        assert_eq!(EcPoint::decode(&ctx, &bad), Err(EccError::PointNotOnCurve("secp224r1")));
        assert_eq!(EcPoint::decode(&ctx, &[0u8; 56]), Err(EccError::IdentityPoint));
        assert_eq!(
            EcPoint::decode(&ctx, &bytes[1..]),
            Err(EccError::InvalidLength { expected: 56, got: 55 })
        );
        let neg: EcPoint = g.negate(&ctx);
        assert!(neg.is_on_curve(&ctx));
        assert_ne!(neg, g);
    }

    #[test]
    fn constant_time_selection() {
        let ctx: EcContext = EcContext::new(Curve::Secp256r1).unwrap();
        let g: EcPoint = ctx.generator().clone();
        let n: EcPoint = g.negate(&ctx);

        let mut s: Scratch = Scratch::new();

        let (mut a, mut b) = (g.clone(), EcPoint::identity());
        EcPoint::conditional_swap(&ctx, &mut a, &mut b, Choice::from(0), &mut s).unwrap();
        assert_eq!((&a, &b), (&g, &EcPoint::identity()));
        EcPoint::conditional_swap(&ctx, &mut a, &mut b, Choice::from(1), &mut s).unwrap();
        assert_eq!((&a, &b), (&EcPoint::identity(), &g));

        let mut out: EcPoint = EcPoint::identity();
        EcPoint::conditional_select(&ctx, &g, &n, Choice::from(0), &mut out, &mut s).unwrap();
        assert_eq!(out, g);
        EcPoint::conditional_select(&ctx, &g, &n, Choice::from(1), &mut out, &mut s).unwrap();
        assert_eq!(out, n);

        let p521: EcContext = EcContext::new(Curve::Secp521r1).unwrap();
        let h: EcPoint = p521.generator().clone();
        EcPoint::conditional_select(&p521, &EcPoint::identity(), &h, Choice::from(1), &mut out, &mut s).unwrap();
        assert_eq!(out, h);
        EcPoint::conditional_select(&ctx, &g, &n, Choice::from(0), &mut out, &mut s).unwrap();
        assert_eq!(out, g);
    }
}
