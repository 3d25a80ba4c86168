//! Criterion benchmarks for the timetabling GA.
//!
//! All runs use the built-in university catalog.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::catalog::Catalog;
use u_timetable::ga::{FitnessEvaluator, Individual, Population, TimetableConfig, TimetableRunner};
use u_timetable::random::create_rng;

fn bench_fitness(c: &mut Criterion) {
    let catalog = Catalog::university_preset();
    let mut rng = create_rng(42);
    let schedules: Vec<Individual> = (0..100)
        .map(|_| Individual::random(&catalog, &mut rng))
        .collect();
    let evaluator = FitnessEvaluator::new(&catalog);

    c.bench_function("fitness_100_schedules", |b| {
        b.iter(|| {
            let total: f64 = schedules
                .iter()
                .map(|s| evaluator.evaluate(black_box(s)))
                .sum();
            black_box(total)
        })
    });
}

fn bench_generation(c: &mut Criterion) {
    let catalog = Catalog::university_preset();
    let mut group = c.benchmark_group("generation");
    group.sample_size(20);

    for pop in [50usize, 100, 300] {
        for parallel in [false, true] {
            let config = TimetableConfig::default()
                .with_population_size(pop)
                .with_parallel(parallel)
                .with_seed(42);
            let label = if parallel { "par" } else { "seq" };
            group.bench_with_input(
                BenchmarkId::new(format!("p{}_{}", pop, label), pop),
                &config,
                |b, config| {
                    b.iter_batched(
                        || {
                            let mut population =
                                Population::new(&catalog, config.clone()).unwrap();
                            population.rank();
                            population
                        },
                        |mut population| {
                            population.run_generation();
                            black_box(population.best_fitness())
                        },
                        criterion::BatchSize::SmallInput,
                    )
                },
            );
        }
    }
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let catalog = Catalog::university_preset();
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);

    for gen in [50usize, 200] {
        let config = TimetableConfig::default()
            .with_min_generations(gen)
            .with_max_generations(gen)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::new(format!("p100_g{}", gen), gen), &config, |b, c| {
            b.iter(|| {
                let result = TimetableRunner::run(black_box(&catalog), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_generation, bench_full_run);
criterion_main!(benches);
