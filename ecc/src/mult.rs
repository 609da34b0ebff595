use crate::curves::EcContext;
use crate::error::Result;
use crate::point::{point_add, point_double, EcPoint, Scratch};
use crate::secret_bits::{Code, Coding, SecretBits};
use subtle::Choice;

/// Computes `k * point` for the secret `k` given as little-endian limbs,
/// reading `ctx.order_bits()` bits of it. All temporaries live in `s`.
///
/// Every digit costs one doubling and one addition. A zero digit sends the
/// addition to a dummy accumulator, a `-1` digit adds the negated point;
/// both choices are made by constant-time swaps and selects.
pub fn scalar_point_mult(
    ctx: &EcContext,
    point: &EcPoint,
    secret: &[u64],
    coding: Coding,
    s: &mut Scratch,
) -> Result<EcPoint> {
    let (mut bits, count) = SecretBits::new(coding, secret, ctx.order_bits())?;

    let mut acc: EcPoint = EcPoint::identity();

    // Starts at 2P so that dummy additions never meet an exceptional case.
    let mut dummy: EcPoint = point.clone();
    point_double(ctx, &mut dummy, s)?;

    let negated: EcPoint = point.negate(ctx);
    let mut operand: EcPoint = EcPoint::identity();

    for _ in 0..count {
        point_double(ctx, &mut acc, s)?;

        let code: Code = bits.pull();
        let skip: Choice = Choice::from(matches!(code, Code::Low | Code::ScaDummy) as u8);
        let minus: Choice = Choice::from((code == Code::MinusOne) as u8);

        EcPoint::conditional_select(ctx, point, &negated, minus, &mut operand, s)?;

        EcPoint::conditional_swap(ctx, &mut acc, &mut dummy, skip, s)?;
        point_add(ctx, &mut acc, &operand, s)?;
        EcPoint::conditional_swap(ctx, &mut acc, &mut dummy, skip, s)?;
    }

    Ok(acc)
}
