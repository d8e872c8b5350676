//! Built-in indicator descriptors.
//!
//! Table scope: TR, ATR, RTR, ARTR, SRTR, ZigZag. Sequence scope: SMA, EMA.

use ti_core::{DataFrame, Indicator, IndicatorError, Role, SeriesIndicator};
use ti_indicators::prelude::*;

use crate::error::{EngineError, Result};
use crate::output::IndicatorOutput;
use crate::params::{ParamKind, ParamSchema, ParamSpec, ResolvedParams};
use crate::registry::{ComputeInput, Descriptor};

const HLC: &[Role] = &[Role::High, Role::Low, Role::Close];

fn window(default: i64) -> ParamSpec {
    ParamSpec::optional("n", ParamKind::PositiveInt, "window length").with_default(default)
}

/// Descriptors in registration order.
pub(crate) fn descriptors() -> Vec<Descriptor> {
    vec![
        Descriptor::table("TR", "True Range", HLC, tr).with_doc(
            "max(High - Low, |High - prior Close|, |Low - prior Close|). \
             No value at the first row.",
        ),
        Descriptor::table("ATR", "Average True Range", HLC, atr)
            .with_params(ParamSchema::new().with(window(14)))
            .with_doc("Simple moving average of TR over n rows. First value at row n."),
        Descriptor::table("RTR", "Relative True Range", HLC, rtr)
            .with_doc("TR divided by the prior close. No value at the first row."),
        Descriptor::table("ARTR", "Average Relative True Range", HLC, artr)
            .with_params(ParamSchema::new().with(window(14)))
            .with_doc("Simple moving average of RTR over n rows. First value at row n."),
        Descriptor::table("SRTR", "Standardized Relative True Range", HLC, srtr)
            .with_params(
                ParamSchema::new()
                    .with(window(14))
                    .with(
                        ParamSpec::optional("N", ParamKind::PositiveInt, "calibration window cap")
                            .with_default(1000),
                    )
                    .with(
                        ParamSpec::optional(
                            "expand",
                            ParamKind::Bool,
                            "grow the calibration window from the start up to N",
                        )
                        .with_default(false),
                    )
                    .with(
                        ParamSpec::optional(
                            "method",
                            ParamKind::Choice(SrtrMethod::CHOICES),
                            "variance estimator",
                        )
                        .with_default(SrtrMethod::default().as_str()),
                    )
                    .with(ParamSpec::optional(
                        "L",
                        ParamKind::NonNegativeInt,
                        "HAC truncation lag (default n - 1)",
                    ))
                    .with(
                        ParamSpec::optional(
                            "full",
                            ParamKind::Bool,
                            "return RTR, ARTR, mean, variance, numerator and SRTR",
                        )
                        .with_default(false),
                    ),
            )
            .with_doc(
                "(RTR - mean) / sqrt(variance) over a trailing calibration window of at most N \
                 RTR values. method=iid uses the sample variance; method=cluster uses a \
                 Bartlett-kernel Newey-West long-run variance with lag L. Rows whose variance \
                 is at or below 1e-18 have no value.",
            ),
        Descriptor::table("ZigZag", "ZigZag swing pivots", &[Role::High, Role::Low], zigzag)
            .with_params(
                ParamSchema::new().with(
                    ParamSpec::optional("pct", ParamKind::PositiveFloat, "minimum reversal")
                        .with_default(0.05),
                ),
            )
            .with_doc(
                "Swing highs and lows separated by at least pct. Confirmed pivots and the \
                 current candidate carry their price; other rows have no value.",
            ),
        Descriptor::sequence("SMA", "Simple Moving Average", sma)
            .with_params(ParamSchema::new().with(ParamSpec::required(
                "n",
                ParamKind::PositiveInt,
                "window length",
            )))
            .with_doc("Trailing mean of the last n values. No value for the first n - 1 rows."),
        Descriptor::sequence("EMA", "Exponential Moving Average", ema)
            .with_params(ParamSchema::new().with(ParamSpec::required(
                "n",
                ParamKind::PositiveInt,
                "span",
            )))
            .with_doc("Exponential average with alpha = 2 / (n + 1), seeded at the first value."),
    ]
}

/// Re-express a config range error as a keyword error.
fn keyword_error(err: IndicatorError) -> EngineError {
    match err {
        IndicatorError::InvalidParameter {
            name,
            value,
            expected,
        } => EngineError::invalid_parameter(name, format!("{value} (expected {expected})")),
        IndicatorError::InvalidWindow(w) => {
            EngineError::invalid_parameter("n", format!("{w} (expected a positive integer)"))
        }
        other => other.into(),
    }
}

fn tr(input: ComputeInput<'_>, _: &ResolvedParams) -> Result<IndicatorOutput> {
    let view = input.table("TR")?;
    Ok(TrueRange::<f64>::new(TrueRangeConfig).calculate(&view)?.into())
}

fn atr(input: ComputeInput<'_>, params: &ResolvedParams) -> Result<IndicatorOutput> {
    let view = input.table("ATR")?;
    let config = AtrConfig::new(params.usize("n")?);
    Ok(Atr::<f64>::new(config).calculate(&view)?.into())
}

fn rtr(input: ComputeInput<'_>, _: &ResolvedParams) -> Result<IndicatorOutput> {
    let view = input.table("RTR")?;
    Ok(Rtr::<f64>::new(RtrConfig).calculate(&view)?.into())
}

fn artr(input: ComputeInput<'_>, params: &ResolvedParams) -> Result<IndicatorOutput> {
    let view = input.table("ARTR")?;
    let config = ArtrConfig::new(params.usize("n")?);
    Ok(Artr::<f64>::new(config).calculate(&view)?.into())
}

fn srtr(input: ComputeInput<'_>, params: &ResolvedParams) -> Result<IndicatorOutput> {
    let view = input.table("SRTR")?;
    let method: SrtrMethod = params.str("method")?.parse().map_err(keyword_error)?;
    let mut config = SrtrConfig::new(params.usize("n")?, params.usize("N")?)
        .with_expand(params.bool("expand")?)
        .with_method(method);
    if let Some(lag) = params.opt_usize("L")? {
        config = config.with_lag(lag);
    }
    config.validate().map_err(keyword_error)?;

    let out = Srtr::<f64>::new(config).calculate(&view)?;
    if params.bool("full")? {
        let mut frame = DataFrame::new();
        for (label, series) in out.into_columns() {
            frame.add_column(label, series)?;
        }
        Ok(frame.into())
    } else {
        Ok(out.srtr.into())
    }
}

fn zigzag(input: ComputeInput<'_>, params: &ResolvedParams) -> Result<IndicatorOutput> {
    let view = input.table("ZigZag")?;
    let config = ZigZagConfig::new(params.f64("pct")?);
    Ok(ZigZag::<f64>::new(config).calculate(&view)?.into())
}

fn sma(input: ComputeInput<'_>, params: &ResolvedParams) -> Result<IndicatorOutput> {
    let values = input.sequence("SMA")?;
    let config = SmaConfig::new(params.usize("n")?);
    Ok(Sma::<f64>::new(config).calculate(values)?.into())
}

fn ema(input: ComputeInput<'_>, params: &ResolvedParams) -> Result<IndicatorOutput> {
    let values = input.sequence("EMA")?;
    let config = EmaConfig::new(params.usize("n")?);
    Ok(Ema::<f64>::new(config).calculate(values)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use approx::assert_relative_eq;
    use ti_core::OhlcvView;

    const HIGH: [f64; 6] = [10.0, 10.5, 11.0, 10.8, 11.5, 11.2];
    const LOW: [f64; 6] = [9.5, 9.8, 10.1, 10.2, 10.6, 10.7];
    const CLOSE: [f64; 6] = [10.0, 10.2, 10.9, 10.4, 11.3, 10.9];

    fn run(name: &str, params: Params) -> Result<IndicatorOutput> {
        let descriptor = descriptors()
            .into_iter()
            .find(|d| d.name() == name)
            .unwrap();
        let bound = descriptor.params().bind(&params)?;
        let view = OhlcvView::new()
            .with(Role::High, &HIGH)
            .with(Role::Low, &LOW)
            .with(Role::Close, &CLOSE);
        (descriptor.compute())(ComputeInput::Table(view), &bound)
    }

    #[test]
    fn test_srtr_full_columns() {
        let out = run("SRTR", Params::new().with("n", 2).with("N", 3).with("full", true)).unwrap();
        let frame = out.as_frame().unwrap();
        assert_eq!(frame.column_names(), SrtrOutput::<f64>::COLUMNS.to_vec());
        assert_eq!(frame.len(), 6);
    }

    #[test]
    fn test_srtr_calibration_must_exceed_window() {
        match run("SRTR", Params::new().with("n", 5).with("N", 5)) {
            Err(EngineError::InvalidParameter { name, .. }) => assert_eq!(name, "N"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_srtr_explicit_lag_zero_matches_iid() {
        let iid = run("SRTR", Params::new().with("n", 2).with("N", 3).with("method", "iid")).unwrap();
        let hac = run("SRTR", Params::new().with("n", 2).with("N", 3).with("L", 0)).unwrap();
        let (iid, hac) = (iid.as_series().unwrap(), hac.as_series().unwrap());
        for (a, b) in iid.iter().zip(hac.iter()) {
            if a.is_nan() {
                assert!(b.is_nan());
            } else {
                assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_sequence_descriptor_rejects_table_input() {
        let err = run("SMA", Params::new().with("n", 2)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDescriptor { .. }));
    }
}
