use anyhow::{Context, Result};
use fund_metrics::{AnnualizationMode, BenchmarkTable, DEFAULT_RISK_FREE_RATE};
use mfapi_client::{MfApiConfig, DEFAULT_SCHEME_LIMIT};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub mfapi: MfApiConfig,
    pub risk_free_rate: f64,                   // 6.5 (%)
    pub scheme_list_limit: usize,              // 50
    pub benchmark_table_path: Option<PathBuf>, // built-in table when unset
    pub annualization_mode: AnnualizationMode, // simple
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            mfapi: MfApiConfig::default(),
            risk_free_rate: env::var("RISK_FREE_RATE")
                .unwrap_or_else(|_| DEFAULT_RISK_FREE_RATE.to_string())
                .parse()
                .context("RISK_FREE_RATE must be a number")?,
            scheme_list_limit: env::var("SCHEME_LIST_LIMIT")
                .unwrap_or_else(|_| DEFAULT_SCHEME_LIMIT.to_string())
                .parse()
                .context("SCHEME_LIST_LIMIT must be a positive integer")?,
            benchmark_table_path: env::var("BENCHMARK_TABLE_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            annualization_mode: env::var("ANNUALIZATION_MODE")
                .unwrap_or_else(|_| "simple".to_string())
                .parse()
                .map_err(anyhow::Error::msg)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.risk_free_rate.is_finite() {
            anyhow::bail!("risk-free rate must be finite");
        }
        if self.scheme_list_limit == 0 {
            anyhow::bail!("scheme list limit must be at least 1");
        }
        Ok(())
    }

    /// Category benchmarks: the configured JSON file, or the built-in table.
    pub fn benchmark_table(&self) -> Result<BenchmarkTable> {
        match &self.benchmark_table_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading benchmark table {}", path.display()))?;
                Ok(BenchmarkTable::from_json(&json)?)
            }
            None => Ok(BenchmarkTable::with_defaults()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> AnalyzerConfig {
        AnalyzerConfig {
            mfapi: MfApiConfig {
                base_url: "http://localhost".to_string(),
                timeout: Duration::from_secs(1),
            },
            risk_free_rate: 6.5,
            scheme_list_limit: 50,
            benchmark_table_path: None,
            annualization_mode: AnnualizationMode::Simple,
        }
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());

        let mut bad = config();
        bad.scheme_list_limit = 0;
        assert!(bad.validate().is_err());

        let mut bad = config();
        bad.risk_free_rate = f64::NAN;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_builtin_benchmarks() {
        let table = config().benchmark_table().unwrap();
        assert_eq!(table.resolve("Equity Scheme - Small Cap Fund").category, "Small Cap");
    }

    #[test]
    fn test_missing_benchmark_file() {
        let mut cfg = config();
        cfg.benchmark_table_path = Some(PathBuf::from("/nonexistent/benchmarks.json"));
        assert!(cfg.benchmark_table().is_err());
    }
}
