//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers:
//! - Single forward calculation per jurisdiction
//! - Net-to-gross solve
//! - Period run over 100 and 1000 employees
//! - A calculation through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    InMemoryDirectory, calculate_payroll, process_period, solve_gross_for_net,
};
use payroll_engine::config::{BatchSettings, ConfigLoader, SolverSettings};
use payroll_engine::models::{
    CalculationInput, Contract, ContractType, Employee, Jurisdiction, PayrollRun,
    PensionFundChoice, Tenant,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/bih").expect("Failed to load config")
}

fn effective_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Builds a tenant with `count` employees, each with one active contract.
fn create_directory(jurisdiction: Jurisdiction, count: usize) -> InMemoryDirectory {
    let employees = (0..count)
        .map(|i| Employee {
            id: format!("emp_{:04}", i),
            tenant_id: "tenant_bench".to_string(),
            first_name: "Bench".to_string(),
            last_name: format!("Employee {}", i),
            tax_factor: 100 + (i as i64 % 3) * 25,
            is_active: true,
        })
        .collect();

    let contracts = (0..count)
        .map(|i| {
            let start = NaiveDate::from_ymd_opt(2005 + (i % 18) as i32, 3, 1).unwrap();
            Contract {
                id: format!("contract_{:04}", i),
                employee_id: format!("emp_{:04}", i),
                contract_type: ContractType::Indefinite,
                gross_amount: 120_000 + (i as i64 % 50) * 4_000,
                start_date: start,
                end_date: None,
                pension_fund_choice: Some(PensionFundChoice::FbihFund),
                tenure_start_date: start,
                previous_tenure_years: (i % 4) as i64,
                is_active: true,
            }
        })
        .collect();

    InMemoryDirectory {
        tenants: vec![Tenant {
            id: "tenant_bench".to_string(),
            name: "Bench d.o.o.".to_string(),
            jurisdiction,
        }],
        payroll_runs: vec![PayrollRun {
            id: "run_bench".to_string(),
            tenant_id: "tenant_bench".to_string(),
            month: 1,
            year: 2024,
            payment_date: None,
        }],
        employees,
        contracts,
    }
}

/// Benchmark: One forward calculation per jurisdiction.
fn bench_forward_calculation(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("forward_calculation");

    for jurisdiction in Jurisdiction::ALL {
        let input = CalculationInput::new(jurisdiction, 200_000, effective_date())
            .with_seniority(500)
            .with_pension_fund(PensionFundChoice::RsFund);

        group.bench_with_input(
            BenchmarkId::from_parameter(jurisdiction),
            &input,
            |b, input| b.iter(|| black_box(calculate_payroll(black_box(input), &config).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark: Net-to-gross solve for a mid-range target.
fn bench_net_to_gross(c: &mut Criterion) {
    let config = load_config();
    let settings = SolverSettings::default();

    c.bench_function("net_to_gross_fbih", |b| {
        b.iter(|| {
            black_box(
                solve_gross_for_net(
                    black_box(150_000),
                    Jurisdiction::Fbih,
                    100,
                    effective_date(),
                    None,
                    &config,
                    &settings,
                )
                .unwrap(),
            )
        })
    });
}

/// Benchmark: Period runs of increasing size.
fn bench_period_run(c: &mut Criterion) {
    let config = load_config();
    let settings = BatchSettings::default();

    let mut group = c.benchmark_group("period_run");
    group.sample_size(20);

    for count in [100usize, 1000] {
        let directory = create_directory(Jurisdiction::Rs, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &directory, |b, dir| {
            b.iter(|| {
                black_box(
                    process_period("run_bench", "tenant_bench", dir, &config, &settings).unwrap(),
                )
            })
        });
    }

    group.finish();
}

/// Benchmark: One calculation through the router, including JSON handling.
fn bench_http_calculate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::json!({
        "jurisdiction": "FBIH",
        "gross_amount": 200000,
        "effective_date": "2024-01-01"
    })
    .to_string();

    c.bench_function("http_calculate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_forward_calculation,
    bench_net_to_gross,
    bench_period_run,
    bench_http_calculate,
);
criterion_main!(benches);
