use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use math::{Backend, Ntt, NttParams, Reducer, Reduction};

fn muln(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("muln");
    for backend in Backend::ALL {
        let r: Reducer = Reducer::new(backend, 12289).unwrap();
        let xs: Vec<i64> = (0..1024).map(|i| (i * 7919) % (1 << 31) - (1 << 30)).collect();
        let id: BenchmarkId = BenchmarkId::new(format!("{:?}", backend), xs.len());
        b.bench_with_input(id, &xs, |b, xs| {
            b.iter(|| xs.iter().fold(1i64, |acc, x| r.muln(acc, *x)))
        });
    }
}

fn mul_pointwise(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("mul_pointwise");
    for backend in Backend::ALL {
        let params: NttParams = NttParams::Q12289_N1024.with_backend(backend);
        let ntt: Ntt<i32> = Ntt::from_params(&params).unwrap();
        let w: Vec<i32> = (0..params.n as i32).collect();
        let mut a: Vec<i32> = (0..params.n as i32).map(|i| 12288 - i).collect();
        let id: BenchmarkId = BenchmarkId::new(format!("{:?}", backend), params.n);
        b.bench_with_input(id, &(), |b, _| b.iter(|| ntt.mul_pointwise(&mut a, &w)));
    }
}

fn negacyclic_mul(c: &mut Criterion) {
    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("negacyclic_mul");
    for params in NttParams::PRESETS {
        let ntt: Ntt<i64> = Ntt::from_params(&params).unwrap();
        let a: Vec<i64> = (0..params.n as i64).map(|i| i % 5 - 2).collect();
        let s: Vec<i64> = (0..params.n as i64).map(|i| i % 3 - 1).collect();
        let mut out: Vec<i64> = vec![0; params.n];
        let id: BenchmarkId = BenchmarkId::new(format!("q={}", params.q), params.n);
        b.bench_with_input(id, &(), |b, _| b.iter(|| ntt.negacyclic_mul(&a, &s, &mut out)));
    }
}

criterion_group!(benches, muln, mul_pointwise, negacyclic_mul);
criterion_main!(benches);
