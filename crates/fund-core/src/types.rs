use serde::{Deserialize, Serialize};

use crate::RawNavPoint;

/// Fixed trading-day convention used for horizons and annualization.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Lookback horizon for annualized returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYear,
    #[serde(rename = "5y")]
    FiveYear,
    #[serde(rename = "10y")]
    TenYear,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [
        Horizon::OneYear,
        Horizon::ThreeYear,
        Horizon::FiveYear,
        Horizon::TenYear,
    ];

    pub fn years(&self) -> u32 {
        match self {
            Horizon::OneYear => 1,
            Horizon::ThreeYear => 3,
            Horizon::FiveYear => 5,
            Horizon::TenYear => 10,
        }
    }

    /// Index of the reference observation in a most-recent-first history.
    pub fn trading_day_offset(&self) -> usize {
        self.years() as usize * TRADING_DAYS_PER_YEAR
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::OneYear => "1y",
            Horizon::ThreeYear => "3y",
            Horizon::FiveYear => "5y",
            Horizon::TenYear => "10y",
        }
    }
}

/// One annualized percentage return per horizon. Always fully populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSet {
    #[serde(rename = "1y")]
    pub one_year: f64,
    #[serde(rename = "3y")]
    pub three_year: f64,
    #[serde(rename = "5y")]
    pub five_year: f64,
    #[serde(rename = "10y")]
    pub ten_year: f64,
}

impl ReturnSet {
    pub fn get(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::OneYear => self.one_year,
            Horizon::ThreeYear => self.three_year,
            Horizon::FiveYear => self.five_year,
            Horizon::TenYear => self.ten_year,
        }
    }

    pub fn set(&mut self, horizon: Horizon, value: f64) {
        match horizon {
            Horizon::OneYear => self.one_year = value,
            Horizon::ThreeYear => self.three_year = value,
            Horizon::FiveYear => self.five_year = value,
            Horizon::TenYear => self.ten_year = value,
        }
    }

    pub fn is_finite(&self) -> bool {
        Horizon::ALL.iter().all(|h| self.get(*h).is_finite())
    }
}

/// Whether each horizon was computed over its full lookback (`true`) or fell
/// back to the oldest available observation (`false`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonCoverage {
    #[serde(rename = "1y")]
    pub one_year: bool,
    #[serde(rename = "3y")]
    pub three_year: bool,
    #[serde(rename = "5y")]
    pub five_year: bool,
    #[serde(rename = "10y")]
    pub ten_year: bool,
}

impl HorizonCoverage {
    pub fn get(&self, horizon: Horizon) -> bool {
        match horizon {
            Horizon::OneYear => self.one_year,
            Horizon::ThreeYear => self.three_year,
            Horizon::FiveYear => self.five_year,
            Horizon::TenYear => self.ten_year,
        }
    }

    pub fn set(&mut self, horizon: Horizon, covered: bool) {
        match horizon {
            Horizon::OneYear => self.one_year = covered,
            Horizon::ThreeYear => self.three_year = covered,
            Horizon::FiveYear => self.five_year = covered,
            Horizon::TenYear => self.ten_year = covered,
        }
    }
}

/// Catalog listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeSummary {
    pub scheme_code: u64,
    pub scheme_name: String,
}

/// Scheme metadata from the catalog detail endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeMeta {
    #[serde(default)]
    pub scheme_type: String,
    #[serde(default)]
    pub scheme_category: String,
    #[serde(default)]
    pub scheme_code: u64,
    #[serde(default)]
    pub scheme_name: String,
}

/// Scheme detail: metadata plus most-recent-first NAV rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeDetail {
    #[serde(default)]
    pub meta: SchemeMeta,
    #[serde(default)]
    pub data: Vec<RawNavPoint>,
    #[serde(default)]
    pub status: String,
}

/// Fields that cannot be derived from NAV history. `None` means the value is
/// unavailable and needs external enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalFields {
    /// Assets under management (crore)
    pub aum: Option<f64>,
    /// Annual expense ratio (%)
    pub expense_ratio: Option<f64>,
    /// Upside capture ratio (%)
    pub upside_capture: Option<f64>,
    /// Downside capture ratio (%)
    pub downside_capture: Option<f64>,
    pub beta: Option<f64>,
    /// Alpha (%)
    pub alpha: Option<f64>,
}

/// Complete per-fund metrics consumed by presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Latest NAV
    pub nav: f64,
    pub returns: ReturnSet,
    /// Annualized standard deviation of daily returns (%)
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub aum: Option<f64>,
    pub expense_ratio: Option<f64>,
    pub upside_capture: Option<f64>,
    pub downside_capture: Option<f64>,
    pub beta: Option<f64>,
    pub alpha: Option<f64>,
    pub coverage: HorizonCoverage,
}

/// Category-average reference values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub category: String,
    pub avg_returns: ReturnSet,
    pub avg_sharpe_ratio: f64,
    pub avg_upside_capture: f64,
    pub avg_downside_capture: f64,
    pub avg_expense_ratio: f64,
    pub avg_standard_deviation: f64,
}
