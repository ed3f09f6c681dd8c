//! Keystone budget report.
//!
//! Reads a budget snapshot (or a flat list of budget lines) and writes the
//! filtered, grouped budget table with grand totals as JSON to stdout.
//!
//! Usage: `keystone-report <input.json> [grouping] [quick-filter]`

mod input;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use keystone_core::budget::{BudgetReportService, GroupingType, QuickFilter};
use keystone_shared::{AppConfig, AppError, AppResult, LoggingConfig};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(&LoggingConfig::default())?;
            exit_with(&err, "Failed to load configuration");
        }
    };

    init_tracing(&config.logging)?;

    if let Err(err) = run(&config, std::env::args().skip(1).collect()) {
        exit_with(&err, "Report failed");
    }

    Ok(())
}

fn exit_with(err: &AppError, message: &str) -> ! {
    error!(code = err.error_code(), error = %err, "{message}");
    std::process::exit(err.exit_code());
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the report
    let installed = if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    installed.context("Failed to install tracing subscriber")
}

fn run(config: &AppConfig, args: Vec<String>) -> AppResult<()> {
    let mut args = args.into_iter();
    let path = args.next().map(PathBuf::from).ok_or_else(|| {
        AppError::InvalidInput(
            "usage: keystone-report <input.json> [grouping] [quick-filter]".to_string(),
        )
    })?;
    let grouping = GroupingType::parse(
        &args
            .next()
            .unwrap_or_else(|| config.report.default_grouping.clone()),
    );
    let quick_filter = QuickFilter::parse(
        &args
            .next()
            .unwrap_or_else(|| config.report.default_quick_filter.clone()),
    );

    let lines = input::load_input(&path)?;
    let report = BudgetReportService::build(&lines, quick_filter, grouping);

    info!(
        input = %path.display(),
        %grouping,
        %quick_filter,
        lines = lines.len(),
        filtered_lines = report.line_count,
        top_level_rows = report.rows.len(),
        original_budget = %report.grand_totals.original_budget_amount,
        revised_budget = %report.grand_totals.revised_budget,
        "Budget report built"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.report.pretty {
        serde_json::to_writer_pretty(&mut out, &report)?;
    } else {
        serde_json::to_writer(&mut out, &report)?;
    }
    writeln!(out)?;

    Ok(())
}
