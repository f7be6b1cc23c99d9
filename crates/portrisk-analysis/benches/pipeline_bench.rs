//! Pipeline benchmarks.
//!
//! Benchmarks: end-to-end run over a synthetic 57-pair survey at several
//! respondent counts, sequential vs rayon classification.
//! Run with: cargo bench -p portrisk-analysis --bench pipeline_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use portrisk_analysis::ingest::{RawTable, ResponseTable};
use portrisk_analysis::pipeline::RiskAnalysisPipeline;
use portrisk_core::config::PortRiskConfig;
use portrisk_core::types::{Dimension, Period};

const VARIABLES_PER_DIMENSION: [usize; 5] = [12, 11, 12, 11, 11];

/// Long-format survey with every variable answered in all three periods.
fn synthetic_survey(respondents: usize) -> RawTable {
    let mut raw = RawTable::new(["respondent", "dimension", "variable_code", "period", "response"]);
    for (d, &n) in VARIABLES_PER_DIMENSION.iter().enumerate() {
        for k in 1..=n {
            let code = format!("{}.{}", d + 1, k);
            for (p, period) in Period::ALL.iter().enumerate() {
                for r in 0..respondents {
                    let value = (d * 7 + k * 3 + p * k + r % 4) % 5 + 1;
                    raw.push_row([
                        Some(format!("r{r}")),
                        Some(Dimension::ALL[d].name().to_string()),
                        Some(code.clone()),
                        Some(period.name().to_string()),
                        Some(value.to_string()),
                    ]);
                }
            }
        }
    }
    raw
}

fn pipeline_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    for respondents in [50, 500, 5000] {
        let table = ResponseTable::from_raw(&synthetic_survey(respondents)).unwrap();
        for parallel in [false, true] {
            let mut config = PortRiskConfig::default();
            config.analysis.parallel = Some(parallel);
            let pipeline = RiskAnalysisPipeline::new(&config);
            let label = if parallel { "rayon" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, respondents), &table, |b, table| {
                b.iter(|| pipeline.run(table));
            });
        }
    }
    group.finish();
}

fn ingest_validation(c: &mut Criterion) {
    let raw = synthetic_survey(500);
    c.bench_function("ingest_from_raw_500", |b| {
        b.iter(|| ResponseTable::from_raw(&raw));
    });
}

criterion_group!(benches, pipeline_end_to_end, ingest_validation);
criterion_main!(benches);
