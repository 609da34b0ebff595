use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ecc::{scalar_point_mult, Coding, Curve, EcContext, Ecdsa, Scratch};
use sampling::source::Source;

fn scalar_mult(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("scalar_mult");
    let mut source: Source = Source::new([0u8; 32]);
    let mut s: Scratch = Scratch::new();

    for curve in Curve::ALL {
        let ctx: EcContext = EcContext::new(curve).unwrap();
        let secret = ctx.random_scalar(&mut source).unwrap();
        for coding in [Coding::Binary, Coding::Naf] {
            let id: BenchmarkId = BenchmarkId::new(format!("{:?}", coding), curve.name());
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
                b.iter(|| scalar_point_mult(&ctx, ctx.generator(), &secret, coding, &mut s).unwrap())
            });
        }
    }
}

fn ecdsa(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("ecdsa");
    let mut source: Source = Source::new([1u8; 32]);

    for curve in [Curve::Secp256r1, Curve::Secp384r1] {
        let ctx: EcContext = EcContext::new(curve).unwrap();
        let key: Ecdsa = Ecdsa::keygen(&ctx, &mut source).unwrap();
        let sig: Vec<u8> = key.sign(b"bench", &mut source).unwrap();

        b.bench_with_input(BenchmarkId::new("sign", curve.name()), &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| key.sign(b"bench", &mut source).unwrap())
        });
        b.bench_with_input(BenchmarkId::new("verify", curve.name()), &(), |b: &mut criterion::Bencher<'_>, _| {
            b.iter(|| key.verify(b"bench", &sig).unwrap())
        });
    }
}

criterion_group!(benches, scalar_mult, ecdsa);
criterion_main!(benches);
