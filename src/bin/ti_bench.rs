//! Benchmark binary for the rust-ti dispatch engine.
//!
//! Usage:
//!     ti_bench <data_file> <iterations>
//!
//! The data file is JSON of the form
//! `{"ohlcv": {"open": [..], "high": [..], "low": [..], "close": [..], "volume": [..]},
//!   "timestamps": [..]}` with `timestamps` optional.
//!
//! Every registered indicator is invoked through the façades with its
//! default parameters (sequence indicators run on the close column with
//! `n = 14`). Outputs a JSON array of benchmark results to stdout. Set
//! `RUST_LOG` to control log output on stderr.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use ti_accessor::prelude::*;
use ti_core::{DataFrame, Index, Series};

#[derive(Debug, Deserialize)]
struct OhlcvData {
    ohlcv: OhlcvRaw,
    #[serde(default)]
    timestamps: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
struct OhlcvRaw {
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct BenchmarkResult {
    name: String,
    scope: &'static str,
    candles: usize,
    iterations: usize,
    no_value_rows: usize,
    total_time_ms: f64,
    avg_time_ms: f64,
    min_time_ms: f64,
    max_time_ms: f64,
    throughput_candles_per_sec: f64,
}

fn load_table(path: &str) -> Result<DataFrame<f64>, Box<dyn Error>> {
    let file = File::open(path)?;
    let data: OhlcvData = serde_json::from_reader(BufReader::new(file))?;

    let index = match data.timestamps {
        Some(labels) => Index::from_labels(labels),
        None => Index::range(data.ohlcv.close.len()),
    };
    let mut df = DataFrame::with_index(index);
    for (label, values) in [
        ("Open", data.ohlcv.open),
        ("High", data.ohlcv.high),
        ("Low", data.ohlcv.low),
        ("Close", data.ohlcv.close),
        ("Volume", data.ohlcv.volume),
    ] {
        df.add_column(label, Series::from_vec(values))?;
    }
    Ok(df)
}

/// Missing rows of the headline sequence: the output itself, or the last
/// column of a multi-sequence output.
fn no_value_rows(output: &IndicatorOutput) -> usize {
    match output {
        IndicatorOutput::Series(s) => s.nan_count(),
        IndicatorOutput::Frame(df) => df.iter().last().map_or(0, |(_, s)| s.nan_count()),
    }
}

fn benchmark<F>(
    name: &str,
    scope: Scope,
    iterations: usize,
    candles: usize,
    mut f: F,
) -> Result<BenchmarkResult, EngineError>
where
    F: FnMut() -> Result<IndicatorOutput, EngineError>,
{
    let mut times = Vec::with_capacity(iterations);
    let mut no_value = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        let output = f()?;
        times.push(start.elapsed().as_secs_f64() * 1000.0);
        no_value = no_value_rows(&output);
    }

    let total_time: f64 = times.iter().sum();
    let avg_time = total_time / iterations as f64;
    let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let throughput = if avg_time > 0.0 {
        (candles as f64 / avg_time) * 1000.0
    } else {
        0.0
    };

    tracing::info!(indicator = name, avg_ms = avg_time, "benchmarked");
    Ok(BenchmarkResult {
        name: name.to_string(),
        scope: scope.as_str(),
        candles,
        iterations,
        no_value_rows: no_value,
        total_time_ms: total_time,
        avg_time_ms: avg_time,
        min_time_ms: min_time,
        max_time_ms: max_time,
        throughput_candles_per_sec: throughput,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(format!("usage: {} <data_file> <iterations>", args[0]).into());
    }
    let data_file = &args[1];
    let iterations: usize = args[2].parse()?;
    if iterations == 0 {
        return Err("iterations must be at least 1".into());
    }

    tracing::info!(path = %data_file, "loading data");
    let df = load_table(data_file)?;
    let candles = df.len();
    tracing::info!(candles, "data loaded");

    let mut results = Vec::new();

    let table = TableAccessor::new(&df);
    for (name, _) in table.indicators() {
        results.push(benchmark(name, Scope::Table, iterations, candles, || {
            table.invoke(name, &Params::new())
        })?);
    }

    let close = df
        .get_column("Close")
        .ok_or_else(|| EngineError::MissingColumn("Close".to_string()))?;
    let sequence = SeriesAccessor::new(close);
    let params = Params::new().with("n", 14);
    for (name, _) in sequence.indicators() {
        results.push(benchmark(name, Scope::Sequence, iterations, candles, || {
            sequence.invoke(name, &params)
        })?);
    }

    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}
