use fund_core::{NavHistory, TRADING_DAYS_PER_YEAR};
use statrs::statistics::Statistics;

/// Volatility (%) reported when there is not enough data to estimate one.
pub const DEFAULT_VOLATILITY: f64 = 15.0;

/// Maximum number of adjacent NAV pairs sampled for volatility.
pub const VOLATILITY_WINDOW: usize = TRADING_DAYS_PER_YEAR;

/// Volatility and risk-adjusted ratio calculations over NAV histories.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskMetricsCalculator;

impl RiskMetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Simple daily returns `(nav[i] - nav[i+1]) / nav[i+1]` over the most
    /// recent [`VOLATILITY_WINDOW`] pairs. Pairs with a non-positive NAV on
    /// either side are skipped.
    pub fn daily_returns(&self, history: &NavHistory) -> Vec<f64> {
        let navs: Vec<f64> = history.navs().collect();
        navs.windows(2)
            .take(VOLATILITY_WINDOW)
            .filter(|w| w[0] > 0.0 && w[1] > 0.0)
            .map(|w| (w[0] - w[1]) / w[1])
            .collect()
    }

    /// Annualized population standard deviation of daily returns, in percent.
    pub fn compute_volatility(&self, history: &NavHistory) -> f64 {
        if history.len() < 2 {
            tracing::debug!(len = history.len(), "history too short, using default volatility");
            return DEFAULT_VOLATILITY;
        }

        let returns = self.daily_returns(history);
        if returns.is_empty() {
            tracing::debug!("no valid NAV pairs, using default volatility");
            return DEFAULT_VOLATILITY;
        }

        let std_dev = returns.iter().population_std_dev();
        let annualized = std_dev * (TRADING_DAYS_PER_YEAR as f64).sqrt() * 100.0;

        if annualized.is_finite() {
            annualized
        } else {
            DEFAULT_VOLATILITY
        }
    }

    /// `(period_return - risk_free_rate) / volatility`, all in percent.
    ///
    /// Zero or non-finite volatility yields 0. The result is not clamped.
    pub fn compute_risk_adjusted_ratio(
        &self,
        period_return: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> f64 {
        if volatility == 0.0 || !volatility.is_finite() {
            return 0.0;
        }
        let ratio = (period_return - risk_free_rate) / volatility;
        if ratio.is_finite() {
            ratio
        } else {
            0.0
        }
    }
}

pub fn compute_volatility(history: &NavHistory) -> f64 {
    RiskMetricsCalculator.compute_volatility(history)
}

pub fn compute_risk_adjusted_ratio(period_return: f64, risk_free_rate: f64, volatility: f64) -> f64 {
    RiskMetricsCalculator.compute_risk_adjusted_ratio(period_return, risk_free_rate, volatility)
}
