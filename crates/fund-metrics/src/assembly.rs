use fund_core::{ExternalFields, Horizon, MetricsRecord, NavHistory, SchemeDetail};

use crate::returns::{AnnualizationMode, ReturnAnnualizer};
use crate::risk::RiskMetricsCalculator;
use crate::DEFAULT_RISK_FREE_RATE;

/// Builds a [`MetricsRecord`] from a scheme's NAV history plus externally
/// supplied fields.
#[derive(Debug, Clone, Copy)]
pub struct MetricsAssembler {
    risk_free_rate: f64,
    ratio_horizon: Horizon,
    annualizer: ReturnAnnualizer,
    risk: RiskMetricsCalculator,
}

impl Default for MetricsAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_FREE_RATE)
    }
}

impl MetricsAssembler {
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            ratio_horizon: Horizon::ThreeYear,
            annualizer: ReturnAnnualizer::new(),
            risk: RiskMetricsCalculator::new(),
        }
    }

    pub fn with_mode(mut self, mode: AnnualizationMode) -> Self {
        self.annualizer = ReturnAnnualizer::with_mode(mode);
        self
    }

    /// Horizon whose return feeds the risk-adjusted ratio (3y by default).
    pub fn with_ratio_horizon(mut self, horizon: Horizon) -> Self {
        self.ratio_horizon = horizon;
        self
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Assemble the record for one scheme. Returns `None` when the scheme has
    /// no NAV rows, which callers treat as "no data available".
    pub fn assemble(
        &self,
        scheme_code: u64,
        detail: &SchemeDetail,
        external: &ExternalFields,
    ) -> Option<MetricsRecord> {
        if detail.data.is_empty() {
            tracing::debug!(scheme_code, "scheme has no NAV history");
            return None;
        }

        let history = NavHistory::from_raw(&detail.data);
        Some(self.assemble_history(
            scheme_code.to_string(),
            detail.meta.scheme_name.clone(),
            detail.meta.scheme_category.clone(),
            &history,
            external,
        ))
    }

    /// Assemble from an already parsed history. Always yields a complete record.
    pub fn assemble_history(
        &self,
        id: String,
        name: String,
        category: String,
        history: &NavHistory,
        external: &ExternalFields,
    ) -> MetricsRecord {
        let returns = self.annualizer.compute_returns(history);
        let volatility = self.risk.compute_volatility(history);
        let sharpe_ratio = self.risk.compute_risk_adjusted_ratio(
            returns.get(self.ratio_horizon),
            self.risk_free_rate,
            volatility,
        );

        MetricsRecord {
            id,
            name,
            category,
            nav: history.latest().map(|o| o.nav).unwrap_or(0.0),
            returns,
            volatility,
            sharpe_ratio,
            aum: finite(external.aum),
            expense_ratio: finite(external.expense_ratio),
            upside_capture: finite(external.upside_capture),
            downside_capture: finite(external.downside_capture),
            beta: finite(external.beta),
            alpha: finite(external.alpha),
            coverage: self.annualizer.coverage(history),
        }
    }
}

/// Pass-through values must be finite; anything else counts as unavailable.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
