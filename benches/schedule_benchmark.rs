use amortization_engine::core::schedule::AmortizationSystem;
use amortization_engine::simulation::stress_test::{generate_random_loans, ScenarioConfig};
use amortization_engine::systems::ScheduleEngine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

fn bench_price_360_months(c: &mut Criterion) {
    c.bench_function("price_360_months", |b| {
        b.iter(|| {
            ScheduleEngine::constant_installment(
                black_box(dec!(250_000)),
                black_box(dec!(0.095)),
                black_box(360),
            )
        })
    });
}

fn bench_hybrid_600_months(c: &mut Criterion) {
    c.bench_function("hybrid_600_months", |b| {
        b.iter(|| ScheduleEngine::hybrid(black_box(dec!(750_000)), black_box(dec!(0.1)), black_box(600)))
    });
}

fn bench_random_portfolio(c: &mut Criterion) {
    let config = ScenarioConfig {
        loan_count: 50,
        ..Default::default()
    };
    let loans = generate_random_loans(&config);

    c.bench_function("random_portfolio_all_systems", |b| {
        b.iter(|| {
            for terms in &loans {
                for system in AmortizationSystem::ALL {
                    black_box(ScheduleEngine::schedule(system, terms));
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_price_360_months,
    bench_hybrid_600_months,
    bench_random_portfolio
);
criterion_main!(benches);
