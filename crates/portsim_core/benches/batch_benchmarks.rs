//! Criterion benchmarks for portsim_core
//!
//! Run with: cargo bench -p portsim_core

use std::collections::BTreeMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use portsim_core::date_math::Period;
use portsim_core::model::{PortfolioWeights, PriceSeries, ReturnSeries, Ticker};
use portsim_core::portfolio::aggregate;
use portsim_core::returns::log_returns;
use portsim_core::simulation::{GrowthParams, run_batch_seeded};
use portsim_core::summary::summarize;

fn daily_prices(ticker: &str, years: i16) -> PriceSeries {
    let mut pairs = Vec::new();
    let mut price = 100.0;
    for year in 2000..2000 + years {
        for month in 1..=12 {
            for day in [3, 10, 17, 24] {
                price *= 1.0 + 0.002 * f64::from((day + month) % 5) - 0.003;
                pairs.push((jiff::civil::date(year, month, day), price));
            }
        }
    }
    PriceSeries::from_unsorted(Ticker::new(ticker), pairs).unwrap()
}

fn growth_params(months: usize) -> GrowthParams {
    GrowthParams {
        init_value: 1.0,
        months,
        mean: 0.008,
        std_dev: 0.04,
    }
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let params = growth_params(120);

    for simulations in [51, 500, 5000].iter() {
        group.bench_with_input(
            BenchmarkId::new("simulations", simulations),
            simulations,
            |b, &k| b.iter(|| run_batch_seeded(black_box(42), k, black_box(&params))),
        );
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let batch = run_batch_seeded(42, 5000, &growth_params(120)).unwrap();
    c.bench_function("summarize_5000", |b| b.iter(|| summarize(black_box(&batch))));
}

fn bench_aggregate(c: &mut Criterion) {
    let tickers = ["SPY", "AGG", "QQQ", "VXUS"];
    let returns: BTreeMap<Ticker, ReturnSeries> = tickers
        .iter()
        .map(|t| {
            let series = log_returns(&daily_prices(t, 20), Period::Monthly).unwrap();
            (Ticker::new(t), series)
        })
        .collect();
    let weights = PortfolioWeights::new(tickers.iter().map(|t| (Ticker::new(t), 0.25))).unwrap();

    let mut group = c.benchmark_group("aggregate");
    for rebalance in [Period::Monthly, Period::Annually] {
        group.bench_function(format!("{rebalance:?}"), |b| {
            b.iter(|| aggregate(black_box(&returns), black_box(&weights), rebalance))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch, bench_summarize, bench_aggregate);

criterion_main!(benches);
