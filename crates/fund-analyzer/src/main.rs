//! fund-analyzer: fetch NAV histories from the mutual fund catalog and print
//! performance metrics against the category benchmark.
//!
//! Usage:
//!   cargo run -p fund-analyzer -- list --limit 20
//!   cargo run -p fund-analyzer -- analyze 119551 120503 --rfr 7.0
//!   cargo run -p fund-analyzer -- analyze 119551 --cagr
//!   cargo run -p fund-analyzer -- compare 119551

mod config;

use anyhow::{Context, Result};
use config::AnalyzerConfig;
use fund_core::{BenchmarkRecord, ExternalFields, MetricsRecord, SchemeDetail, SchemeSource};
use fund_metrics::comparison::{DEFAULT_DRAG_PERIODS, DEFAULT_INVESTMENT_AMOUNTS};
use fund_metrics::{analyze_batch, AnnualizationMode, BenchmarkComparison, FundInput, MetricsAssembler};
use mfapi_client::{fetch_metrics, list_schemes_or_empty, MfApiClient};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fund_analyzer=info,mfapi_client=warn,fund_metrics=warn".into());
    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let args: Vec<String> = std::env::args().collect();
    let mut config = AnalyzerConfig::from_env()?;
    apply_flags(&mut config, &args)?;

    let client = Arc::new(MfApiClient::from_config(&config.mfapi));
    tracing::info!("Catalog: {}", client.base_url());

    match args.get(1).map(String::as_str) {
        Some("list") => run_list(&*client, &config).await,
        Some("analyze") => run_analyze(client, &config, &scheme_codes(&args)?).await,
        Some("compare") => {
            let code = scheme_codes(&args)?
                .into_iter()
                .next()
                .context("compare needs a scheme code")?;
            run_compare(&*client, &config, code).await
        }
        _ => {
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  fund-analyzer list [--limit N]              List catalog schemes");
    eprintln!("  fund-analyzer analyze CODE... [options]     Metrics for one or more schemes");
    eprintln!("  fund-analyzer compare CODE [options]        Metrics vs category benchmark");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --rfr R             Risk-free rate in percent (default: 6.5)");
    eprintln!("  --cagr              Compound annualization instead of simple division");
    eprintln!("  --benchmarks PATH   JSON benchmark table replacing the built-in one");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// CLI flags take precedence over environment configuration.
fn apply_flags(config: &mut AnalyzerConfig, args: &[String]) -> Result<()> {
    if let Some(v) = flag_value(args, "--limit") {
        config.scheme_list_limit = v.parse().context("--limit must be a positive integer")?;
    }
    if let Some(v) = flag_value(args, "--rfr") {
        config.risk_free_rate = v.parse().context("--rfr must be a number")?;
    }
    if let Some(v) = flag_value(args, "--benchmarks") {
        config.benchmark_table_path = Some(PathBuf::from(v));
    }
    if args.iter().any(|a| a == "--cagr") {
        config.annualization_mode = AnnualizationMode::Compound;
    }
    config.validate()
}

/// Positional scheme codes following the subcommand, up to the first flag.
fn scheme_codes(args: &[String]) -> Result<Vec<u64>> {
    let codes: Vec<u64> = args
        .iter()
        .skip(2)
        .take_while(|a| !a.starts_with("--"))
        .map(|a| a.parse().with_context(|| format!("invalid scheme code '{}'", a)))
        .collect::<Result<_>>()?;

    if codes.is_empty() {
        anyhow::bail!("no scheme codes given");
    }
    Ok(codes)
}

fn assembler(config: &AnalyzerConfig) -> MetricsAssembler {
    MetricsAssembler::new(config.risk_free_rate).with_mode(config.annualization_mode)
}

async fn run_list(source: &dyn SchemeSource, config: &AnalyzerConfig) -> Result<()> {
    let schemes = list_schemes_or_empty(source, config.scheme_list_limit).await;
    tracing::info!("Fetched {} schemes", schemes.len());
    println!("{}", serde_json::to_string_pretty(&schemes)?);
    Ok(())
}

async fn run_analyze(client: Arc<MfApiClient>, config: &AnalyzerConfig, codes: &[u64]) -> Result<()> {
    let mut handles = Vec::with_capacity(codes.len());
    for &code in codes {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            let detail = match client.get_scheme_detail(code).await {
                Ok(detail) => detail,
                Err(e) => {
                    tracing::warn!("{} failed: {}", code, e);
                    SchemeDetail::default()
                }
            };
            FundInput {
                scheme_code: code,
                detail,
                external: ExternalFields::default(),
            }
        }));
    }

    let mut inputs = Vec::with_capacity(handles.len());
    for handle in handles {
        inputs.push(handle.await?);
    }

    let records = analyze_batch(&inputs, &assembler(config));
    let output: Vec<_> = codes
        .iter()
        .zip(records)
        .map(|(code, record)| json!({ "scheme_code": code, "metrics": record }))
        .collect();

    let available = output.iter().filter(|o| !o["metrics"].is_null()).count();
    tracing::info!("Analyzed {}/{} schemes", available, codes.len());
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_compare(source: &dyn SchemeSource, config: &AnalyzerConfig, code: u64) -> Result<()> {
    let benchmarks = config.benchmark_table()?;
    let Some(record) = fetch_metrics(source, code, &assembler(config), &ExternalFields::default()).await else {
        println!("{}", json!({ "scheme_code": code, "metrics": null }));
        return Ok(());
    };

    let benchmark = benchmarks.resolve(&record.category);
    let output = compare_report(config.risk_free_rate, &record, benchmark);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn compare_report(risk_free_rate: f64, record: &MetricsRecord, benchmark: &BenchmarkRecord) -> serde_json::Value {
    let comparison = BenchmarkComparison::new(record, benchmark);
    json!({
        "scheme_code": record.id,
        "risk_free_rate": risk_free_rate,
        "metrics": record,
        "benchmark": benchmark,
        "comparison": comparison,
        "outperforming_metrics": comparison.outperforming_count(),
        "sharpe_by_period": comparison.sharpe_by_period(risk_free_rate),
        "expense_impact": comparison.expense_impact(&DEFAULT_INVESTMENT_AMOUNTS),
        "expense_drag": comparison.expense_drag(&DEFAULT_DRAG_PERIODS),
    })
}
