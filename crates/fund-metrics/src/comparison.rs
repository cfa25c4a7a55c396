use fund_core::{BenchmarkRecord, Horizon, MetricsRecord, ReturnSet};
use serde::{Deserialize, Serialize};

use crate::risk::compute_risk_adjusted_ratio;

/// Investment amounts used for expense cost projections.
pub const DEFAULT_INVESTMENT_AMOUNTS: [f64; 4] = [50_000.0, 100_000.0, 500_000.0, 1_000_000.0];

/// Holding periods (years) for the cumulative expense drag table.
pub const DEFAULT_DRAG_PERIODS: [u32; 3] = [1, 5, 10];

/// Horizons compared on a risk-adjusted basis.
pub const SHARPE_PERIODS: [Horizon; 3] = [Horizon::OneYear, Horizon::ThreeYear, Horizon::FiveYear];

/// Fund value against the category average for a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub metric: String,
    pub fund: Option<f64>,
    pub category: f64,
    /// `fund - category`, absent when the fund value is unavailable
    pub difference: Option<f64>,
    pub outperforming: Option<bool>,
}

impl MetricDelta {
    fn new(metric: &str, fund: Option<f64>, category: f64, higher_is_better: bool) -> Self {
        let difference = fund.map(|f| f - category);
        let outperforming = difference.map(|d| if higher_is_better { d > 0.0 } else { d < 0.0 });
        Self {
            metric: metric.to_string(),
            fund,
            category,
            difference,
            outperforming,
        }
    }
}

/// Yearly expense cost for a given investment amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCost {
    pub investment: f64,
    pub fund_cost: Option<f64>,
    pub category_cost: f64,
    /// Category cost minus fund cost; positive means the fund is cheaper.
    pub savings: Option<f64>,
}

/// Cumulative expense drag over a holding period, in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDrag {
    pub years: u32,
    pub fund_impact: Option<f64>,
    pub category_impact: f64,
    /// Category drag minus fund drag; positive means the fund costs less.
    pub savings: Option<f64>,
}

/// Fund and category risk-adjusted ratio for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodSharpe {
    pub horizon: Horizon,
    pub fund: f64,
    pub category: f64,
}

/// Fund-vs-category comparison across returns, risk, cost and capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub fund_id: String,
    pub category: String,
    pub metrics: Vec<MetricDelta>,
    #[serde(skip)]
    fund_expense_ratio: Option<f64>,
    #[serde(skip)]
    category_expense_ratio: f64,
    #[serde(skip)]
    fund_returns: ReturnSet,
    #[serde(skip)]
    fund_volatility: f64,
    #[serde(skip)]
    category_returns: ReturnSet,
    #[serde(skip)]
    category_volatility: f64,
}

impl BenchmarkComparison {
    pub fn new(fund: &MetricsRecord, benchmark: &BenchmarkRecord) -> Self {
        let mut metrics: Vec<MetricDelta> = Horizon::ALL
            .iter()
            .map(|h| {
                MetricDelta::new(
                    &format!("returns_{}", h.label()),
                    Some(fund.returns.get(*h)),
                    benchmark.avg_returns.get(*h),
                    true,
                )
            })
            .collect();

        metrics.push(MetricDelta::new("sharpe_ratio", Some(fund.sharpe_ratio), benchmark.avg_sharpe_ratio, true));
        metrics.push(MetricDelta::new(
            "standard_deviation",
            Some(fund.volatility),
            benchmark.avg_standard_deviation,
            false,
        ));
        metrics.push(MetricDelta::new("expense_ratio", fund.expense_ratio, benchmark.avg_expense_ratio, false));
        metrics.push(MetricDelta::new("upside_capture", fund.upside_capture, benchmark.avg_upside_capture, true));
        metrics.push(MetricDelta::new(
            "downside_capture",
            fund.downside_capture,
            benchmark.avg_downside_capture,
            false,
        ));

        Self {
            fund_id: fund.id.clone(),
            category: benchmark.category.clone(),
            metrics,
            fund_expense_ratio: fund.expense_ratio,
            category_expense_ratio: benchmark.avg_expense_ratio,
            fund_returns: fund.returns,
            fund_volatility: fund.volatility,
            category_returns: benchmark.avg_returns,
            category_volatility: benchmark.avg_standard_deviation,
        }
    }

    pub fn metric(&self, name: &str) -> Option<&MetricDelta> {
        self.metrics.iter().find(|m| m.metric == name)
    }

    /// Number of metrics where the fund beats the category.
    pub fn outperforming_count(&self) -> usize {
        self.metrics.iter().filter(|m| m.outperforming == Some(true)).count()
    }

    /// Annual expense cost (`amount × ratio / 100`) for each amount.
    pub fn expense_impact(&self, amounts: &[f64]) -> Vec<ExpenseCost> {
        amounts
            .iter()
            .map(|&amount| {
                let category_cost = amount * self.category_expense_ratio / 100.0;
                let fund_cost = self.fund_expense_ratio.map(|r| amount * r / 100.0);
                ExpenseCost {
                    investment: amount,
                    fund_cost,
                    category_cost,
                    savings: fund_cost.map(|f| category_cost - f),
                }
            })
            .collect()
    }

    /// Cumulative expense drag for each holding period, with the savings the
    /// fund offers over the category average.
    pub fn expense_drag(&self, periods: &[u32]) -> Vec<ExpenseDrag> {
        periods
            .iter()
            .map(|&years| {
                let span = years as f64;
                let category_impact = -self.category_expense_ratio * span;
                let fund_impact = self.fund_expense_ratio.map(|r| -r * span);
                ExpenseDrag {
                    years,
                    fund_impact,
                    category_impact,
                    savings: self
                        .fund_expense_ratio
                        .map(|r| (self.category_expense_ratio - r) * span),
                }
            })
            .collect()
    }

    /// Risk-adjusted ratio per horizon, fund against category. A category
    /// with zero standard deviation yields 0 rather than an infinite ratio.
    pub fn sharpe_by_period(&self, risk_free_rate: f64) -> Vec<PeriodSharpe> {
        SHARPE_PERIODS
            .iter()
            .map(|&horizon| PeriodSharpe {
                horizon,
                fund: compute_risk_adjusted_ratio(
                    self.fund_returns.get(horizon),
                    risk_free_rate,
                    self.fund_volatility,
                ),
                category: compute_risk_adjusted_ratio(
                    self.category_returns.get(horizon),
                    risk_free_rate,
                    self.category_volatility,
                ),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BenchmarkTable;
    use approx::assert_relative_eq;
    use fund_core::{HorizonCoverage, ReturnSet};

    fn fund(expense_ratio: Option<f64>) -> MetricsRecord {
        MetricsRecord {
            id: "120503".into(),
            name: "Sample Large Cap".into(),
            category: "Equity Scheme - Large Cap Fund".into(),
            nav: 82.4,
            returns: ReturnSet { one_year: 12.0, three_year: 13.0, five_year: 12.5, ten_year: 14.0 },
            volatility: 16.0,
            sharpe_ratio: 0.40625,
            aum: None,
            expense_ratio,
            upside_capture: None,
            downside_capture: Some(88.0),
            beta: None,
            alpha: None,
            coverage: HorizonCoverage::default(),
        }
    }

    #[test]
    fn test_deltas_and_direction() {
        let table = BenchmarkTable::with_defaults();
        let benchmark = table.resolve("Equity Scheme - Large Cap Fund");
        let cmp = BenchmarkComparison::new(&fund(Some(1.2)), benchmark);

        assert_eq!(cmp.category, "Large Cap");
        let one_year = cmp.metric("returns_1y").unwrap();
        assert_relative_eq!(one_year.difference.unwrap(), 0.8, epsilon = 1e-9);
        assert_eq!(one_year.outperforming, Some(true));

        // 13.0 < 13.8
        assert_eq!(cmp.metric("returns_3y").unwrap().outperforming, Some(false));
        // lower volatility and expense are better
        assert_eq!(cmp.metric("standard_deviation").unwrap().outperforming, Some(true));
        assert_eq!(cmp.metric("expense_ratio").unwrap().outperforming, Some(true));
        assert_eq!(cmp.metric("downside_capture").unwrap().outperforming, Some(true));
        // unavailable upside capture
        let upside = cmp.metric("upside_capture").unwrap();
        assert_eq!(upside.fund, None);
        assert_eq!(upside.outperforming, None);
    }

    #[test]
    fn test_expense_impact() {
        let benchmark = BenchmarkTable::with_defaults().fallback().clone();
        let cmp = BenchmarkComparison::new(&fund(Some(1.5)), &benchmark);
        let costs = cmp.expense_impact(&DEFAULT_INVESTMENT_AMOUNTS);
        assert_eq!(costs.len(), 4);
        assert_relative_eq!(costs[1].fund_cost.unwrap(), 1_500.0, epsilon = 1e-9);
        assert_relative_eq!(costs[1].category_cost, 2_000.0, epsilon = 1e-9);
        assert_relative_eq!(costs[1].savings.unwrap(), 500.0, epsilon = 1e-9);

        let drag = cmp.expense_drag(&DEFAULT_DRAG_PERIODS);
        assert_eq!(drag.iter().map(|d| d.years).collect::<Vec<_>>(), vec![1, 5, 10]);
        assert_relative_eq!(drag[1].fund_impact.unwrap(), -7.5, epsilon = 1e-9);
        assert_relative_eq!(drag[1].category_impact, -10.0, epsilon = 1e-9);
        assert_relative_eq!(drag[1].savings.unwrap(), 2.5, epsilon = 1e-9);
        assert_relative_eq!(drag[2].savings.unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_expense_impact_without_fund_ratio() {
        let benchmark = BenchmarkTable::with_defaults().fallback().clone();
        let cmp = BenchmarkComparison::new(&fund(None), &benchmark);
        let costs = cmp.expense_impact(&[10_000.0]);
        assert_eq!(costs[0].fund_cost, None);
        assert_eq!(costs[0].savings, None);
        let drag = cmp.expense_drag(&[1]);
        assert_eq!(drag[0].fund_impact, None);
        assert_eq!(drag[0].savings, None);
        assert_relative_eq!(drag[0].category_impact, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outperforming_count() {
        let table = BenchmarkTable::with_defaults();
        let cmp = BenchmarkComparison::new(&fund(Some(1.2)), table.resolve("Equity Scheme - Large Cap Fund"));
        // 1y and 10y returns, volatility, expense, downside capture; 5y ties
        assert_eq!(cmp.outperforming_count(), 5);
    }

    #[test]
    fn test_sharpe_by_period() {
        let table = BenchmarkTable::with_defaults();
        let cmp = BenchmarkComparison::new(&fund(None), table.resolve("Equity Scheme - Large Cap Fund"));
        let periods = cmp.sharpe_by_period(6.5);

        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].horizon, Horizon::OneYear);
        assert_eq!(periods[2].horizon, Horizon::FiveYear);
        assert_relative_eq!(periods[0].fund, (12.0 - 6.5) / 16.0, epsilon = 1e-12);
        assert_relative_eq!(periods[1].category, (13.8 - 6.5) / 17.2, epsilon = 1e-12);
        assert_relative_eq!(periods[2].fund, (12.5 - 6.5) / 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sharpe_by_period_zero_category_volatility() {
        let json = r#"{
            "categories": {
                "Liquid": {
                    "category": "Liquid",
                    "avg_returns": {"1y": 7.1, "3y": 6.4, "5y": 5.9, "10y": 6.8},
                    "avg_sharpe_ratio": 0.0,
                    "avg_upside_capture": 100.0,
                    "avg_downside_capture": 100.0,
                    "avg_expense_ratio": 0.3,
                    "avg_standard_deviation": 0.0
                }
            },
            "fallback": {
                "category": "Mixed",
                "avg_returns": {"1y": 14.0, "3y": 16.5, "5y": 15.2, "10y": 14.8},
                "avg_sharpe_ratio": 1.05,
                "avg_upside_capture": 100.0,
                "avg_downside_capture": 98.5,
                "avg_expense_ratio": 2.0,
                "avg_standard_deviation": 20.0
            }
        }"#;
        let table = BenchmarkTable::from_json(json).unwrap();
        let cmp = BenchmarkComparison::new(&fund(None), table.resolve("Liquid"));

        for period in cmp.sharpe_by_period(6.5) {
            assert_eq!(period.category, 0.0);
            assert!(period.fund.is_finite());
        }
    }
}
