//! Benchmarks for saturation on random systems.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use grobsat::prelude::*;
use grobsat::poly::{Monomial, Poly};

/// Generates `count` random polynomials of degree at most two over
/// `num_vars` variables, all vanishing at the point `(1, 1, ..., 1)`.
fn random_system(seed: u64, num_vars: u32, count: usize) -> Vec<Poly> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let one = vec![Rational::from_int(1); num_vars as usize];
    (0..count)
        .map(|_| {
            let terms = (0..4)
                .map(|_| {
                    let a = Var(rng.gen_range(0..num_vars));
                    let b = Var(rng.gen_range(0..num_vars));
                    let mono = match rng.gen_range(0..3) {
                        0 => Monomial::var(a),
                        1 => Monomial::var(a).mul(&Monomial::var(b)),
                        _ => Monomial::one(),
                    };
                    (mono, Rational::from_int(rng.gen_range(-5..6)))
                })
                .collect();
            let p = Poly::from_terms(terms);
            let value = p.eval(&one);
            p.sub(&Poly::constant(value))
        })
        .collect()
}

fn saturate(system: &[Poly], num_vars: u32, algorithm: Algorithm) -> Outcome {
    let limit = ResLimit::new();
    let mut m = PolyManager::new();
    for _ in 0..num_vars {
        m.mk_var();
    }
    let mut g = Grobner::new(&limit, &mut m);
    g.set_config(Config {
        eqs_threshold: 200,
        expr_size_limit: 400,
        algorithm,
    });
    for (k, p) in system.iter().enumerate() {
        let Ok(p) = g.manager_mut().mk(p.clone()) else {
            continue;
        };
        let d = g.dep_mut().leaf(k as u32);
        g.add_with(p, d);
    }
    g.saturate()
}

fn bench_saturate(c: &mut Criterion) {
    let mut group = c.benchmark_group("saturate");
    group.sample_size(20);

    for num_vars in [3u32, 5, 8] {
        let system = random_system(0x5eed + u64::from(num_vars), num_vars, num_vars as usize);
        for algorithm in [Algorithm::Basic, Algorithm::Tuned] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), num_vars),
                &num_vars,
                |b, &n| b.iter(|| black_box(saturate(&system, n, algorithm))),
            );
        }
    }

    group.finish();
}

fn bench_linear_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_chain");

    // x_{i+1} - x_i - 1 = 0 is solved entirely by the linear passes
    for n in [16u32, 64, 256] {
        let system: Vec<Poly> = (0..n - 1)
            .map(|i| {
                Poly::from_terms(vec![
                    (Monomial::var(Var(i + 1)), Rational::from_int(1)),
                    (Monomial::var(Var(i)), Rational::from_int(-1)),
                    (Monomial::one(), Rational::from_int(-1)),
                ])
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("tuned", n), &n, |b, &n| {
            b.iter(|| black_box(saturate(&system, n, Algorithm::Tuned)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_saturate, bench_linear_chain);
criterion_main!(benches);
