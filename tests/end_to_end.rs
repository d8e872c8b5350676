//! End-to-end tests: bar table in, aligned indicator output out.

mod common;

use ti_accessor::prelude::*;
use ti_core::{Indicator, OhlcvView, Role};
use ti_indicators::prelude::*;

use common::{assert_series_eq, generate_random_walk, ohlcv_table};

const CANONICAL: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

fn series(output: IndicatorOutput) -> ti_core::Series<f64> {
    output.into_series().expect("single-sequence output")
}

#[test]
fn test_dispatch_matches_direct_computation() {
    let close = generate_random_walk(100.0, 1.5, 300, 42);
    let df = ohlcv_table(&close, 0.02, CANONICAL);

    let view = OhlcvView::new()
        .with(Role::High, df.get_column("High").unwrap().as_slice())
        .with(Role::Low, df.get_column("Low").unwrap().as_slice())
        .with(Role::Close, df.get_column("Close").unwrap().as_slice());

    let ti = TableAccessor::new(&df);
    let params = Params::new().with("n", 10).with("N", 60).with("method", "iid");
    let dispatched = series(ti.invoke("SRTR", &params).unwrap());
    let direct = Srtr::<f64>::new(SrtrConfig::new(10, 60).with_method(SrtrMethod::Iid))
        .calculate(&view)
        .unwrap();

    assert_series_eq(dispatched.as_slice(), direct.srtr.as_slice(), 1e-12, "SRTR");
    assert_eq!(dispatched.index(), df.index());
    // rolling window: first value once 60 RTR values exist (rows 1..=60)
    assert!(dispatched[59].is_nan());
    assert!(dispatched[60].is_finite());
}

#[test]
fn test_label_conventions_agree() {
    let close = generate_random_walk(50.0, 0.8, 120, 9);
    let canonical = ohlcv_table(&close, 0.03, CANONICAL);
    let lower = ohlcv_table(&close, 0.03, ["open", "high", "low", "close", "volume"]);

    let params = Params::new().with("n", 5).with("N", 40).with("expand", true);
    let a = series(TableAccessor::new(&canonical).invoke("SRTR", &params).unwrap());
    let b = series(TableAccessor::new(&lower).invoke("SRTR", &params).unwrap());
    assert_series_eq(a.as_slice(), b.as_slice(), 1e-12, "SRTR");
}

#[test]
fn test_expanding_starts_earlier_than_rolling() {
    let close = generate_random_walk(100.0, 2.0, 200, 3);
    let df = ohlcv_table(&close, 0.02, CANONICAL);
    let ti = TableAccessor::new(&df);

    let rolling = series(ti.invoke("SRTR", &Params::new().with("n", 5).with("N", 50)).unwrap());
    let expanding = series(
        ti.invoke("SRTR", &Params::new().with("n", 5).with("N", 50).with("expand", true))
            .unwrap(),
    );

    assert_eq!(rolling.first_valid(), Some(50));
    assert_eq!(expanding.first_valid(), Some(5));
    // once both windows hold N values they agree
    assert_series_eq(&rolling.as_slice()[50..], &expanding.as_slice()[50..], 1e-12, "SRTR");
}

#[test]
fn test_cluster_is_less_extreme_in_trending_volatility() {
    // widening bars: RTR trends upward, so its autocovariances are positive
    let close: Vec<f64> = (0..120).map(|i| 100.0 + (i % 2) as f64).collect();
    let mut df = ohlcv_table(&close, 0.0, CANONICAL);
    let high: Vec<f64> = close.iter().enumerate().map(|(i, c)| c + 0.01 * i as f64).collect();
    let low: Vec<f64> = close.iter().enumerate().map(|(i, c)| c - 0.01 * i as f64).collect();
    df.set_column("High", high.into()).unwrap();
    df.set_column("Low", low.into()).unwrap();

    let ti = TableAccessor::new(&df);
    let full = |method: &str| {
        ti.invoke(
            "SRTR",
            &Params::new()
                .with("n", 5)
                .with("N", 30)
                .with("method", method)
                .with("full", true),
        )
        .unwrap()
        .into_frame()
        .unwrap()
    };
    let iid = full("iid");
    let cluster = full("cluster");

    let iid_var = iid.get_column("variance").unwrap();
    let hac_var = cluster.get_column("variance").unwrap();
    let iid_srtr = iid.get_column("SRTR").unwrap();
    let hac_srtr = cluster.get_column("SRTR").unwrap();
    for t in 40..120 {
        assert!(hac_var[t] >= iid_var[t], "row {t}");
        assert!(hac_srtr[t].abs() <= iid_srtr[t].abs() + 1e-12, "row {t}");
    }
}

#[test]
fn test_srtr_config_serde_round_trip() {
    let config = SrtrConfig::new(10, 250)
        .with_expand(true)
        .with_method(SrtrMethod::Iid)
        .with_lag(3);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"method\":\"iid\""));
    let back: SrtrConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
