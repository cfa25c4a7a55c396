//! Fund performance metrics engine.
//!
//! Pure, synchronous functions over an immutable most-recent-first NAV
//! history: horizon returns, annualized volatility, risk-adjusted ratio, and
//! assembly of the per-fund record compared against a category benchmark.

pub mod assembly;
pub mod batch;
pub mod benchmark;
pub mod comparison;
pub mod returns;
pub mod risk;

pub use assembly::MetricsAssembler;
pub use batch::{analyze_batch, FundInput};
pub use benchmark::BenchmarkTable;
pub use comparison::{BenchmarkComparison, ExpenseCost, ExpenseDrag, MetricDelta, PeriodSharpe};
pub use returns::{compound_annual_growth_rate, compute_returns, AnnualizationMode, ReturnAnnualizer};
pub use risk::{
    compute_risk_adjusted_ratio, compute_volatility, RiskMetricsCalculator, DEFAULT_VOLATILITY,
    VOLATILITY_WINDOW,
};

/// Risk-free rate (%) applied when the caller does not supply one.
pub const DEFAULT_RISK_FREE_RATE: f64 = 6.5;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fund_core::NavHistory;

    #[test]
    fn test_five_day_scenario() {
        let history = NavHistory::from_navs(&[110.0, 108.0, 105.0, 102.0, 100.0]);

        let returns = compute_returns(&history);
        assert_relative_eq!(returns.one_year, 10.0, epsilon = 1e-9);
        assert_relative_eq!(returns.three_year, 3.3333, epsilon = 1e-4);
        assert_relative_eq!(returns.five_year, 2.0, epsilon = 1e-9);
        assert_relative_eq!(returns.ten_year, 1.0, epsilon = 1e-9);

        let volatility = compute_volatility(&history);
        assert_relative_eq!(volatility, 7.7837, epsilon = 1e-3);

        let ratio = compute_risk_adjusted_ratio(returns.three_year, DEFAULT_RISK_FREE_RATE, volatility);
        assert_relative_eq!(ratio, (10.0 / 3.0 - 6.5) / volatility, epsilon = 1e-12);
        assert!(ratio < 0.0);
    }

    #[test]
    fn test_outputs_always_finite() {
        let cases: Vec<Vec<f64>> = vec![
            vec![],
            vec![0.0],
            vec![0.0, 0.0, 0.0],
            vec![-5.0, 10.0],
            vec![1e300, 1e-300],
            vec![f64::MIN_POSITIVE, 1e308, f64::MIN_POSITIVE],
            (0..3000).map(|i| 10.0 + (i % 7) as f64).collect(),
        ];

        for navs in cases {
            let history = NavHistory::from_navs(&navs);
            let returns = compute_returns(&history);
            let volatility = compute_volatility(&history);
            assert!(returns.is_finite(), "non-finite returns for {:?}", &navs[..navs.len().min(3)]);
            assert!(volatility.is_finite() && volatility >= 0.0);
            assert!(compute_risk_adjusted_ratio(returns.three_year, 6.5, volatility).is_finite());
        }
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let navs: Vec<f64> = (0..600).map(|i| 100.0 + ((i * 37) % 11) as f64 * 0.73).collect();
        let history = NavHistory::from_navs(&navs);

        let vol_a = compute_volatility(&history);
        let vol_b = compute_volatility(&history);
        assert_eq!(vol_a.to_bits(), vol_b.to_bits());

        let returns = compute_returns(&history);
        let ratio_a = compute_risk_adjusted_ratio(returns.three_year, DEFAULT_RISK_FREE_RATE, vol_a);
        let ratio_b = compute_risk_adjusted_ratio(returns.three_year, DEFAULT_RISK_FREE_RATE, vol_b);
        assert_eq!(ratio_a.to_bits(), ratio_b.to_bits());
    }
}
