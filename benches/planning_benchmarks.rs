//! Performance benchmarks for the inspection planner.
//!
//! This benchmark suite measures complete planning runs:
//! - A small center over the default horizon
//! - A regional workload of 1000 employers over ten weeks
//! - Scaling with the number of employers
//! - A resumed run where most employers are already scheduled
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use inspection_planner::config::{ConfigLoader, PlannerConfig};
use inspection_planner::models::{Center, Controller, Employer, PlanningInput};
use inspection_planner::planner::Planner;
use inspection_planner::planning::Horizon;

/// Creates a planner with the default configuration and a fixed seed.
fn create_planner() -> Planner {
    let config = ConfigLoader::load("./config/default")
        .map(|loader| loader.into_config())
        .unwrap_or_else(|_| PlannerConfig::default());
    Planner::new(config.with_seed(2026))
}

/// Builds `centers` centers with `controllers` controllers each and
/// `employers` employers spread round-robin over the centers.
fn create_input(centers: usize, controllers: usize, employers: usize) -> PlanningInput {
    let mut input = PlanningInput::new();
    for c in 0..centers {
        input = input.with_center(Center::new(format!("ctr_{c:02}"), format!("Center {c}")));
        for k in 0..controllers {
            let mut controller =
                Controller::new(format!("ctl_{c:02}_{k:02}"), format!("ctr_{c:02}"));
            // Every fourth controller takes the week of 2026-11-16 off
            if k % 4 == 0 {
                controller
                    .leave_dates
                    .extend((16..=20).filter_map(|d| NaiveDate::from_ymd_opt(2026, 11, d)));
            }
            input = input.with_controller(controller);
        }
    }
    for i in 0..employers {
        input = input.with_employer(Employer::new(
            format!("emp_{i:05}"),
            format!("ctr_{:02}", i % centers),
            (i * 37 % 101) as i64,
        ));
    }
    input
}

fn remaining_year() -> Horizon {
    Horizon::new(
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
    )
    .unwrap()
}

/// Benchmark: One center, 4 controllers, 40 employers.
fn bench_single_center(c: &mut Criterion) {
    let planner = create_planner();
    let input = create_input(1, 4, 40);

    c.bench_function("single_center", |b| {
        b.iter(|| black_box(planner.plan(&input, remaining_year(), &[]).unwrap()))
    });
}

/// Benchmark: 20 centers, 6 controllers each, 1000 employers.
fn bench_regional(c: &mut Criterion) {
    let planner = create_planner();
    let input = create_input(20, 6, 1000);

    let mut group = c.benchmark_group("regional");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(20);

    group.bench_function("employers_1000", |b| {
        b.iter(|| black_box(planner.plan(&input, remaining_year(), &[]).unwrap()))
    });

    group.finish();
}

/// Benchmark: Various employer counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let planner = create_planner();

    let mut group = c.benchmark_group("scaling");

    for employers in [10, 100, 500, 2000].iter() {
        let input = create_input(10, 5, *employers);

        group.throughput(Throughput::Elements(*employers as u64));
        group.bench_with_input(BenchmarkId::new("employers", employers), employers, |b, _| {
            b.iter(|| black_box(planner.plan(&input, remaining_year(), &[]).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: Second run over a year that is already planned.
fn bench_resumed_run(c: &mut Criterion) {
    let planner = create_planner();
    let input = create_input(10, 5, 600);
    let existing = planner
        .plan(&input, remaining_year(), &[])
        .unwrap()
        .assignments;

    c.bench_function("resumed_run", |b| {
        b.iter(|| black_box(planner.plan(&input, remaining_year(), &existing).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_single_center,
    bench_regional,
    bench_scaling,
    bench_resumed_run,
);
criterion_main!(benches);
