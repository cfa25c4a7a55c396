use std::collections::HashMap;

use fund_core::{BenchmarkRecord, FundError, FundResult, ReturnSet};
use serde::{Deserialize, Serialize};

/// Read-only category benchmark lookup, injected into callers.
///
/// Unknown categories resolve to the fallback record instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkTable {
    categories: HashMap<String, BenchmarkRecord>,
    fallback: BenchmarkRecord,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BenchmarkTable {
    pub fn new(categories: HashMap<String, BenchmarkRecord>, fallback: BenchmarkRecord) -> Self {
        Self { categories, fallback }
    }

    /// Built-in table for the three equity categories plus the "Mixed" fallback.
    pub fn with_defaults() -> Self {
        let mut categories = HashMap::new();
        categories.insert(
            "Equity Scheme - Large Cap Fund".to_string(),
            record("Large Cap", [11.2, 13.8, 12.5, 13.1], 1.12, 92.3, 91.7, 1.95, 17.2),
        );
        categories.insert(
            "Equity Scheme - Mid Cap Fund".to_string(),
            record("Mid Cap", [16.5, 19.8, 17.9, 16.2], 1.08, 108.5, 102.3, 2.25, 23.5),
        );
        categories.insert(
            "Equity Scheme - Small Cap Fund".to_string(),
            record("Small Cap", [22.1, 25.3, 21.8, 19.5], 0.98, 118.2, 115.6, 2.55, 31.2),
        );

        Self {
            categories,
            fallback: record("Mixed", [14.0, 16.5, 15.2, 14.8], 1.05, 100.0, 98.5, 2.0, 20.0),
        }
    }

    /// Parse an alternate table: `{"categories": {<name>: <record>}, "fallback": <record>}`.
    pub fn from_json(json: &str) -> FundResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FundError::InvalidData(format!("benchmark table: {}", e)))
    }

    pub fn resolve(&self, category: &str) -> &BenchmarkRecord {
        self.categories.get(category).unwrap_or_else(|| {
            tracing::debug!(category, "unknown category, using fallback benchmark");
            &self.fallback
        })
    }

    pub fn fallback(&self) -> &BenchmarkRecord {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn record(
    label: &str,
    returns: [f64; 4],
    sharpe: f64,
    upside: f64,
    downside: f64,
    expense: f64,
    std_dev: f64,
) -> BenchmarkRecord {
    BenchmarkRecord {
        category: label.to_string(),
        avg_returns: ReturnSet {
            one_year: returns[0],
            three_year: returns[1],
            five_year: returns[2],
            ten_year: returns[3],
        },
        avg_sharpe_ratio: sharpe,
        avg_upside_capture: upside,
        avg_downside_capture: downside,
        avg_expense_ratio: expense,
        avg_standard_deviation: std_dev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category() {
        let table = BenchmarkTable::with_defaults();
        let mid = table.resolve("Equity Scheme - Mid Cap Fund");
        assert_eq!(mid.category, "Mid Cap");
        assert_eq!(mid.avg_returns.three_year, 19.8);
        assert_eq!(mid.avg_standard_deviation, 23.5);
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let table = BenchmarkTable::with_defaults();
        let rec = table.resolve("Debt Scheme - Gilt Fund");
        assert_eq!(rec.category, "Mixed");
        assert_eq!(rec.avg_expense_ratio, 2.0);
        assert_eq!(table.resolve("").category, "Mixed");
    }

    #[test]
    fn test_from_json_alternate_table() {
        let json = r#"{
            "categories": {
                "Gilt": {
                    "category": "Gilt",
                    "avg_returns": {"1y": 7.0, "3y": 6.0, "5y": 6.5, "10y": 7.2},
                    "avg_sharpe_ratio": 0.4,
                    "avg_upside_capture": 80.0,
                    "avg_downside_capture": 60.0,
                    "avg_expense_ratio": 0.9,
                    "avg_standard_deviation": 0.0
                }
            },
            "fallback": {
                "category": "Other",
                "avg_returns": {"1y": 0.0, "3y": 0.0, "5y": 0.0, "10y": 0.0},
                "avg_sharpe_ratio": 0.0,
                "avg_upside_capture": 0.0,
                "avg_downside_capture": 0.0,
                "avg_expense_ratio": 0.0,
                "avg_standard_deviation": 0.0
            }
        }"#;
        let table = BenchmarkTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("Gilt").avg_returns.ten_year, 7.2);
        assert_eq!(table.resolve("Large Cap").category, "Other");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            BenchmarkTable::from_json("{\"categories\": 3}"),
            Err(FundError::InvalidData(_))
        ));
    }
}
