//! Performance benchmarks for the guideline engine.
//!
//! Covers the library pipeline on its own and the HTTP path end to end:
//! - Single calculation, library only
//! - Single calculation through the router
//! - Batches of 100 and 1000 calculations
//! - Scaling with the number of children
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use guideline_engine::api::{AppState, create_router};
use guideline_engine::calculation::{calculate_batch, calculate_guideline};
use guideline_engine::config::{ConfigLoader, statutory_schedule};
use guideline_engine::models::{GuidelineInput, OvernightSplit, SupplementalExpenses};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/guideline").expect("Failed to load config");
    AppState::new(config)
}

/// Builds an input whose incomes and schedule vary with `seed`.
fn create_input(seed: u32, children: u32) -> GuidelineInput {
    let mother_overnights = 100 + (seed * 37) % 165;
    GuidelineInput {
        mother_gross_annual: Decimal::from(20_000 + (seed * 1_733) % 120_000),
        mother_deductions_annual: Decimal::from((seed * 211) % 9_000),
        father_gross_annual: Decimal::from(15_000 + (seed * 2_417) % 140_000),
        father_deductions_annual: Decimal::from((seed * 173) % 7_000),
        number_of_children: children,
        supplemental_expenses: SupplementalExpenses {
            childcare: Decimal::from((seed * 97) % 4_000),
            ..SupplementalExpenses::default()
        },
        parenting_schedule: (0..children)
            .map(|_| OvernightSplit::new(mother_overnights, 365 - mother_overnights))
            .collect(),
    }
}

/// Builds a JSON request body for `/calculate`.
fn create_request_body(seed: u32, children: u32) -> serde_json::Value {
    let input = create_input(seed, children);
    serde_json::json!({
        "mother_gross_annual": input.mother_gross_annual.to_string(),
        "mother_deductions_annual": input.mother_deductions_annual.to_string(),
        "father_gross_annual": input.father_gross_annual.to_string(),
        "father_deductions_annual": input.father_deductions_annual.to_string(),
        "number_of_children": children,
        "supplemental_expenses": {
            "childcare": input.supplemental_expenses.childcare.to_string()
        },
        "parenting_schedule": input.parenting_schedule.iter().map(|split| serde_json::json!({
            "mother_overnights": split.mother_overnights,
            "father_overnights": split.father_overnights,
        })).collect::<Vec<_>>()
    })
}

fn post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: Single calculation without HTTP.
///
/// Target: < 50μs mean
fn bench_single_library(c: &mut Criterion) {
    let input = create_input(7, 2);
    let schedule = statutory_schedule();

    c.bench_function("single_library", |b| {
        b.iter(|| black_box(calculate_guideline(black_box(&input), schedule)))
    });
}

/// Benchmark: Single calculation through the router.
///
/// Target: < 1ms mean
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::to_string(&create_request_body(7, 2)).unwrap();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(post("/calculate", body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Library batches of 100 and 1000 inputs.
///
/// Target: < 100ms mean for 1000
fn bench_batch_library(c: &mut Criterion) {
    let schedule = statutory_schedule();
    let mut group = c.benchmark_group("batch_library");

    for size in [100u32, 1000] {
        let inputs: Vec<GuidelineInput> = (0..size).map(|i| create_input(i, 1 + i % 4)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("inputs", size), &inputs, |b, inputs| {
            b.iter(|| black_box(calculate_batch(inputs, schedule)))
        });
    }

    group.finish();
}

/// Benchmark: Batch of 1000 calculations through `/calculate/batch`.
///
/// Target: < 500ms mean
fn bench_batch_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let calculations: Vec<serde_json::Value> =
        (0..1000).map(|i| create_request_body(i, 1 + i % 4)).collect();
    let body = serde_json::to_string(&serde_json::json!({ "calculations": calculations })).unwrap();

    let mut group = c.benchmark_group("large_batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(post("/calculate/batch", body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

/// Benchmark: Various child counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let schedule = statutory_schedule();
    let mut group = c.benchmark_group("scaling");

    for children in [1u32, 2, 4, 8].iter() {
        let input = create_input(11, *children);

        group.throughput(Throughput::Elements(*children as u64));
        group.bench_with_input(BenchmarkId::new("children", children), &input, |b, input| {
            b.iter(|| black_box(calculate_guideline(input, schedule)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_library,
    bench_single_request,
    bench_batch_library,
    bench_batch_request,
    bench_scaling,
);
criterion_main!(benches);
