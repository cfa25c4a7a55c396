use fund_core::{Horizon, HorizonCoverage, NavHistory, ReturnSet};
use serde::{Deserialize, Serialize};

/// How multi-year raw returns are turned into yearly figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnualizationMode {
    /// Raw period return divided by the year count. Matches the published
    /// dashboard figures, so it stays the default.
    #[default]
    Simple,
    /// Compound annual growth rate: `(1 + r)^(1/years) - 1`.
    Compound,
}

impl std::str::FromStr for AnnualizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(AnnualizationMode::Simple),
            "compound" | "cagr" => Ok(AnnualizationMode::Compound),
            other => Err(format!("unknown annualization mode '{}'", other)),
        }
    }
}

/// Computes horizon returns from a most-recent-first NAV history.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnAnnualizer {
    mode: AnnualizationMode,
}

impl ReturnAnnualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: AnnualizationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AnnualizationMode {
        self.mode
    }

    /// Annualized percentage return for every horizon.
    ///
    /// Histories shorter than a horizon's offset reuse the oldest observation
    /// as the reference, so a "10y" figure may cover far less than ten years.
    /// Use [`ReturnAnnualizer::coverage`] to tell the two cases apart.
    pub fn compute_returns(&self, history: &NavHistory) -> ReturnSet {
        let mut returns = ReturnSet::default();
        let Some(current) = history.latest() else {
            return returns;
        };

        for horizon in Horizon::ALL {
            let reference = reference_nav(history, horizon);
            let raw = raw_return(current.nav, reference);
            returns.set(horizon, self.annualize(raw, horizon));
        }

        returns
    }

    /// Which horizons had enough history to reach their trading-day offset.
    pub fn coverage(&self, history: &NavHistory) -> HorizonCoverage {
        let mut coverage = HorizonCoverage::default();
        for horizon in Horizon::ALL {
            coverage.set(horizon, history.get(horizon.trading_day_offset()).is_some());
        }
        coverage
    }

    fn annualize(&self, raw_pct: f64, horizon: Horizon) -> f64 {
        let years = horizon.years() as f64;
        if horizon.years() == 1 {
            return raw_pct;
        }
        match self.mode {
            AnnualizationMode::Simple => raw_pct / years,
            AnnualizationMode::Compound => {
                let growth = 1.0 + raw_pct / 100.0;
                if growth <= 0.0 {
                    return -100.0;
                }
                finite_or_zero((growth.powf(1.0 / years) - 1.0) * 100.0)
            }
        }
    }
}

/// NAV at the horizon offset, or the oldest NAV when the history is too short.
fn reference_nav(history: &NavHistory, horizon: Horizon) -> f64 {
    history
        .get(horizon.trading_day_offset())
        .or_else(|| history.oldest())
        .map(|o| o.nav)
        .unwrap_or(0.0)
}

/// Percentage change from `reference` to `current`; 0 for a non-positive reference.
fn raw_return(current: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        tracing::debug!(reference, "non-positive reference NAV, return set to 0");
        return 0.0;
    }
    finite_or_zero((current - reference) / reference * 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Horizon returns using the default simple-division annualization.
pub fn compute_returns(history: &NavHistory) -> ReturnSet {
    ReturnAnnualizer::new().compute_returns(history)
}

/// Compound annual growth rate (%) between two values `years` apart.
/// Returns 0 for non-positive start values or spans.
pub fn compound_annual_growth_rate(start: f64, end: f64, years: f64) -> f64 {
    if start <= 0.0 || years <= 0.0 || end < 0.0 {
        return 0.0;
    }
    finite_or_zero(((end / start).powf(1.0 / years) - 1.0) * 100.0)
}
