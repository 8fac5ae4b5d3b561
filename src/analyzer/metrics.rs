use crate::model::PricePoint;

/// Stateless calculator for the four performance indicators.
///
/// Every operation degrades to `0.0` when the series holds fewer than two
/// points; insufficient data is a reporting condition here, not an error.
#[derive(Debug, Clone, Copy)]
pub struct MetricCalculator {
    trading_days_per_year: f64,
}

impl MetricCalculator {
    pub fn new(trading_days_per_year: f64) -> Self {
        Self {
            trading_days_per_year,
        }
    }

    /// Total return over the series endpoints, in percent. Path-indifferent.
    pub fn performance(&self, series: &[PricePoint]) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }
        let start_price = series[0].price;
        let end_price = series[series.len() - 1].price;
        (end_price / start_price - 1.0) * 100.0
    }

    /// Sample standard deviation of period-over-period returns, in percent.
    /// Annualization multiplies by the square root of the trading-day basis.
    pub fn volatility(&self, series: &[PricePoint], annualize: bool) -> f64 {
        let returns = pct_changes(series);
        if returns.len() < 2 {
            return 0.0;
        }
        let mut vol = sample_std_dev(&returns);
        if annualize {
            vol *= self.trading_days_per_year.sqrt();
        }
        vol * 100.0
    }

    /// Mean of period-over-period returns, in percent. Annualization is
    /// linear in the trading-day basis, unlike volatility's square root.
    pub fn expected_return(&self, series: &[PricePoint], annualize: bool) -> f64 {
        let returns = pct_changes(series);
        if returns.is_empty() {
            return 0.0;
        }
        let mut mean = returns.iter().sum::<f64>() / returns.len() as f64;
        if annualize {
            mean *= self.trading_days_per_year;
        }
        mean * 100.0
    }

    /// Largest peak-to-trough decline of the cumulative growth curve, as a
    /// positive percentage. The curve starts at 1 (the first point carries a
    /// zero return), so the result is always non-negative.
    pub fn max_drawdown(&self, series: &[PricePoint]) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }
        let mut cumulative = 1.0_f64;
        let mut running_max = 1.0_f64;
        let mut worst = 0.0_f64;
        for window in series.windows(2) {
            let step_return = window[1].price / window[0].price - 1.0;
            cumulative *= 1.0 + step_return;
            if cumulative > running_max {
                running_max = cumulative;
            }
            let drawdown = cumulative / running_max - 1.0;
            if drawdown < worst {
                worst = drawdown;
            }
        }
        worst.abs() * 100.0
    }
}

/// Period-over-period percentage changes; the first point has no predecessor
/// and is dropped, so N points yield N-1 values.
fn pct_changes(series: &[PricePoint]) -> Vec<f64> {
    series
        .windows(2)
        .map(|window| window[1].price / window[0].price - 1.0)
        .collect()
}

fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                price,
            })
            .collect()
    }

    fn calc() -> MetricCalculator {
        MetricCalculator::new(252.0)
    }

    #[test]
    fn short_series_yields_zero_for_every_metric() {
        for prices in [&[][..], &[100.0][..]] {
            let s = series(prices);
            assert_eq!(calc().performance(&s), 0.0);
            assert_eq!(calc().volatility(&s, true), 0.0);
            assert_eq!(calc().expected_return(&s, true), 0.0);
            assert_eq!(calc().max_drawdown(&s), 0.0);
        }
    }

    #[test]
    fn constant_prices_yield_zero_metrics() {
        let s = series(&[100.0, 100.0, 100.0, 100.0]);
        assert_eq!(calc().performance(&s), 0.0);
        assert_eq!(calc().volatility(&s, true), 0.0);
        assert_eq!(calc().expected_return(&s, true), 0.0);
        assert_eq!(calc().max_drawdown(&s), 0.0);
    }

    #[test]
    fn performance_uses_endpoints_only() {
        let s = series(&[100.0, 110.0]);
        assert!((calc().performance(&s) - 10.0).abs() < 1e-9);

        // A detour between the endpoints changes nothing.
        let s = series(&[100.0, 140.0, 80.0, 110.0]);
        assert!((calc().performance(&s) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn drawdown_measures_trough_against_running_peak() {
        let s = series(&[100.0, 90.0, 100.0]);
        assert!((calc().max_drawdown(&s) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn drawdown_is_zero_for_monotonic_rise() {
        let s = series(&[100.0, 101.0, 105.0, 120.0]);
        assert_eq!(calc().max_drawdown(&s), 0.0);
    }

    #[test]
    fn drawdown_is_never_negative() {
        let cases = [
            vec![100.0, 110.0, 90.0, 95.0, 120.0],
            vec![50.0, 40.0, 30.0, 20.0],
            vec![100.0, 200.0, 100.0, 200.0],
        ];
        for prices in cases {
            assert!(calc().max_drawdown(&series(&prices)) >= 0.0);
        }
    }

    #[test]
    fn volatility_matches_sample_deviation_with_sqrt_annualization() {
        // Returns +10% then -10%: mean 0, sample std dev sqrt(0.02).
        let s = series(&[100.0, 110.0, 99.0]);
        let std_dev = (0.02_f64).sqrt();

        let annualized = calc().volatility(&s, true);
        assert!((annualized - std_dev * 100.0 * 252.0_f64.sqrt()).abs() < 1e-9);

        let raw = calc().volatility(&s, false);
        assert!((raw - std_dev * 100.0).abs() < 1e-9);
    }

    #[test]
    fn expected_return_scales_linearly_with_trading_days() {
        // Two identical +10% steps: mean return is exactly 0.1.
        let s = series(&[100.0, 110.0, 121.0]);

        let annualized = calc().expected_return(&s, true);
        assert!((annualized - 0.1 * 100.0 * 252.0).abs() < 1e-9);

        let raw = calc().expected_return(&s, false);
        assert!((raw - 10.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_of_a_single_return_degrades_to_zero() {
        // Two points produce one return; a sample deviation needs two.
        let s = series(&[100.0, 110.0]);
        assert_eq!(calc().volatility(&s, true), 0.0);
        assert_eq!(calc().volatility(&s, false), 0.0);
    }

    #[test]
    fn annualization_basis_is_injected_not_hardcoded() {
        let s = series(&[100.0, 110.0, 121.0]);
        let weekly = MetricCalculator::new(52.0);
        assert!((weekly.expected_return(&s, true) - 0.1 * 100.0 * 52.0).abs() < 1e-9);
    }
}
