use math::modulus::barrett::BarrettReduction;
use math::modulus::floating::FloatingPointReduction;
use math::modulus::reference::ReferenceReduction;
use math::{Backend, Ntt, NttParams, Reducer, Reduction};
use sampling::source::Source;
use sampling::RngCore;

const Q: u64 = 12289;

fn reducers(q: u64) -> Vec<Reducer> {
    Backend::ALL.iter().map(|b| Reducer::new(*b, q).unwrap()).collect()
}

fn assert_agree(rs: &[Reducer], x: i64, y: i64) -> i64 {
    let want: i64 = rs[0].muln(x, y);
    for r in &rs[1..] {
        assert_eq!(r.muln(x, y), want, "{:?} x={} y={}", r.backend(), x, y);
    }
    want
}

#[test]
fn known_products() {
    let rs: Vec<Reducer> = reducers(Q);
    let q: i64 = Q as i64;

    assert_eq!(assert_agree(&rs, 1, q * q - 1), 12288);
    assert_eq!(assert_agree(&rs, 1, q * q), 0);
    assert_eq!(assert_agree(&rs, 1234, 5678), 1922);
    assert_eq!(assert_agree(&rs, -1234, 5678), -1922);
    assert_eq!(assert_agree(&rs, -1234, -5678), 1922);
    assert_eq!(assert_agree(&rs, 1, -q), 0);
    assert_eq!(assert_agree(&rs, 1, -q - 1), -1);
    assert_eq!(assert_agree(&rs, -10635, 1479), -11534);
    assert_eq!(assert_agree(&rs, -126331, 12229), -2453);
    assert_eq!(assert_agree(&rs, -120825, 7866), -2768);
}

#[test]
fn operand_extremes() {
    let rs: Vec<Reducer> = reducers(Q);
    let max: i64 = 0x7FFFFFFF;
    let min: i64 = -(1 << 31);

    assert_eq!(assert_agree(&rs, max, max), 2754);
    assert_eq!(assert_agree(&rs, min, max), -8229);
    assert_agree(&rs, min, min);
    assert_agree(&rs, min, 0);

    for i in 0..4096 {
        let x: i64 = -64 * i;
        assert_agree(&rs, x, max);
        assert_agree(&rs, max, x);
    }
}

#[test]
fn random_operands() {
    let mut source: Source = Source::new([0u8; 32]);
    for q in [7681u64, 12289, 8380417, 8399873, (1 << 31) - 1] {
        let rs: Vec<Reducer> = reducers(q);
        for _ in 0..20000 {
            let x: i64 = source.next_i64() >> 32;
            let y: i64 = source.next_i64() >> 32;
            let z: i64 = assert_agree(&rs, x, y);
            assert!(z.abs() < q as i64);
            assert_eq!(z, (x as i128 * y as i128 % q as i128) as i64);
        }
    }
}

#[test]
fn wide_reduction() {
    let mut source: Source = Source::new([1u8; 32]);
    let reference: ReferenceReduction = ReferenceReduction::new(Q).unwrap();
    let barrett: BarrettReduction = BarrettReduction::new(Q).unwrap();
    let floating: FloatingPointReduction = FloatingPointReduction::new(Q).unwrap();
    for _ in 0..20000 {
        let x: i64 = source.next_i64() >> 12;
        let want: i64 = reference.modn(x);
        assert_eq!(barrett.modn(x), want, "x={}", x);
        assert_eq!(floating.modn(x), want, "x={}", x);
    }
}

#[test]
fn wide_tier_operands() {
    let mut source: Source = Source::new([3u8; 32]);
    for q in [Q, 8380417] {
        let rs: Vec<Reducer> = reducers(q);
        for x in [i64::MIN, i64::MAX, 1 << 52, -(1 << 52) - 1, 3 << 61] {
            assert_agree(&rs, x, x);
            assert_agree(&rs, x, -7);
        }
        for _ in 0..20000 {
            let x: i64 = source.next_i64();
            let y: i64 = source.next_i64();
            let z: i64 = assert_agree(&rs, x, y);
            assert_eq!(z, (x as i128 * y as i128 % q as i128) as i64);
            for r in &rs {
                assert_eq!(r.modn(x), x % q as i64, "{:?} x={}", r.backend(), x);
            }
        }
    }

    let a: Vec<i64> = (0..256).map(|i: i64| (i << 33) - (1 << 40)).collect();
    let mut want: Vec<i64> = a.clone();
    let reference: Ntt<i64> = Ntt::from_params(&NttParams::Q7681_N256.with_backend(Backend::Reference)).unwrap();
    reference.forward(&mut want);
    for backend in [Backend::Barrett, Backend::FloatingPoint] {
        let ntt: Ntt<i64> = Ntt::from_params(&NttParams::Q7681_N256.with_backend(backend)).unwrap();
        let mut have: Vec<i64> = a.clone();
        ntt.forward(&mut have);
        assert_eq!(have, want, "{:?}", backend);
    }
}

#[test]
fn narrow_tier() {
    let mut source: Source = Source::new([2u8; 32]);
    let rs: Vec<Reducer> = reducers(Q);
    for _ in 0..20000 {
        let x: i16 = source.next_u32() as i16;
        let y: i16 = source.next_u32() as i16;
        let want: i64 = (x as i64 * y as i64) % Q as i64;
        for r in &rs {
            assert_eq!(r.muln_i16(x, y) as i64, want, "{:?} x={} y={}", r.backend(), x, y);
        }
    }
}

#[test]
fn explicit_barrett_constants() {
    let r: BarrettReduction = BarrettReduction::with_constants(Q, 30, 87374).unwrap();
    assert_eq!(r.muln(1, Q as i64 * Q as i64 - 1), 12288);
    assert!(BarrettReduction::with_constants(Q, 25, 2730).is_err());
    assert!(BarrettReduction::with_constants(Q, 30, 87375).is_err());
}
