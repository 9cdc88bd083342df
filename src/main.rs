use analytics::{StatisticsEngine, correlation_matrix, month_name, normalize, seasonal_aggregate};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use configuration::Config;
use core_types::{AssetCategory, CorrelationStrength, PriceFrame};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// The main entry point for the MarketScope analytics CLI.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = configuration::load_config_from(&cli.config)?;

    // The one table of the process; every command is a pure function of it.
    let frame = market_data::load_price_table(&config.data.price_table_path)?;

    match cli.command {
        Commands::Overview { category } => handle_overview(&frame, &config, category, cli.json),
        Commands::Seasonal { asset, year } => {
            handle_seasonal(&frame, &config, &asset, year, cli.json)
        }
        Commands::Correlation { category, asset } => {
            handle_correlation(&frame, &config, category, asset.as_deref(), cli.json)
        }
        Commands::Portfolio { assets, amount } => {
            handle_portfolio(&frame, &assets, amount, cli.json)
        }
        Commands::Leaderboard => handle_leaderboard(&frame, &config, cli.json),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Market analytics over the US stock/crypto/commodity basket.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to load.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the normalized performance of the basket or one category.
    Overview {
        /// Restrict to one category (tech, crypto, commodities, indices).
        #[arg(long)]
        category: Option<AssetCategory>,
    },

    /// Break one asset's year down by month.
    Seasonal {
        /// Asset column name, e.g. "Gold_Price".
        #[arg(long)]
        asset: String,

        /// Calendar year to slice, e.g. 2022.
        #[arg(long)]
        year: i32,
    },

    /// Correlation matrix, category sub-matrix, or single-asset ranking.
    Correlation {
        /// Project the matrix onto one category.
        #[arg(long)]
        category: Option<AssetCategory>,

        /// Rank every other asset against this one instead.
        #[arg(long)]
        asset: Option<String>,
    },

    /// Split an investment across selected assets by positive total return.
    Portfolio {
        /// Comma-separated asset column names.
        #[arg(long, value_delimiter = ',', required = true)]
        assets: Vec<String>,

        /// Total investment in dollars.
        #[arg(long)]
        amount: Decimal,
    },

    /// Per-asset risk/return statistics with letter grades.
    Leaderboard,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_overview(
    frame: &PriceFrame,
    config: &Config,
    category: Option<AssetCategory>,
    json: bool,
) -> anyhow::Result<()> {
    let normalized = normalize(frame, config.analytics.smoothing_window)?;
    let engine = StatisticsEngine::new(config.analytics.clone());

    let assets = select_assets(&normalized, category);
    let mut summaries = Vec::new();
    for asset in assets {
        summaries.push(engine.series_summary(&normalized, &asset)?);
    }

    if json {
        return print_json(&summaries);
    }

    let mut table = new_table(vec![
        "Asset", "Start", "Close", "Max", "Min", "Average", "Change %", "Volatility",
    ]);
    for s in &summaries {
        table.add_row(vec![
            display_name(&s.asset).to_string(),
            format!("{:.3}", s.start),
            format!("{:.3}", s.close),
            format!("{:.3}", s.max),
            format!("{:.3}", s.min),
            format!("{:.3}", s.average),
            format!("{:+.2}", s.change_pct),
            fmt_num(s.volatility, 3),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_seasonal(
    frame: &PriceFrame,
    config: &Config,
    asset: &str,
    year: i32,
    json: bool,
) -> anyhow::Result<()> {
    let normalized = normalize(frame, config.analytics.smoothing_window)?;
    let series = normalized
        .series(asset)
        .ok_or_else(|| anyhow::anyhow!("unknown asset: {asset}"))?;
    let aggregate = seasonal_aggregate(&series, year);

    if json {
        return print_json(&aggregate);
    }

    println!("{} — {}", display_name(asset), year);
    if let (Some((start_date, start)), Some((end_date, end))) =
        (aggregate.slice.first(), aggregate.slice.last())
    {
        println!(
            "{} trading days from {start_date} to {end_date}; open {start:.2}, close {end:.2}",
            aggregate.slice.len()
        );
    } else {
        println!("no data for {year}");
    }

    let mut table = new_table(vec![
        "Month", "Days", "Start", "End", "High", "Low", "Mean", "Change %",
    ]);
    for detail in &aggregate.months {
        match &detail.stats {
            Some(stats) => table.add_row(vec![
                month_name(detail.month).to_string(),
                detail.days.to_string(),
                format!("{:.2}", stats.start),
                format!("{:.2}", stats.end),
                format!("{:.2}", stats.high),
                format!("{:.2}", stats.low),
                format!("{:.2}", stats.mean),
                format!("{:+.1}", stats.change_pct),
            ]),
            None => table.add_row(vec![
                month_name(detail.month).to_string(),
                "0".to_string(),
                "no data".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ]),
        };
    }
    println!("{table}");

    if let (Some(best), Some(worst)) = (aggregate.best_month, aggregate.worst_month) {
        println!("Best month: {}, worst month: {}", month_name(best), month_name(worst));
    }
    if let Some(mean) = aggregate.average_monthly_mean {
        println!("Average monthly mean: {mean:.2}");
    }
    if let Some(volatility) = aggregate.volatility {
        println!("Volatility (stdev of the year): {volatility:.2}");
    }
    Ok(())
}

fn handle_correlation(
    frame: &PriceFrame,
    config: &Config,
    category: Option<AssetCategory>,
    asset: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let normalized = normalize(frame, config.analytics.smoothing_window)?;
    let matrix = correlation_matrix(&normalized)?;

    // Single-asset view: ranked coefficients with strength buckets.
    if let Some(asset) = asset {
        let ranked = matrix.asset_correlations(asset)?;
        if json {
            return print_json(&ranked);
        }
        let mut table = new_table(vec!["Asset", "Correlation", "Strength"]);
        for entry in &ranked {
            table.add_row(vec![
                display_name(&entry.asset).to_string(),
                fmt_num(entry.coefficient, 3),
                CorrelationStrength::classify(entry.coefficient).to_string(),
            ]);
        }
        println!("Correlation of {} with the basket:", display_name(asset));
        println!("{table}");
        return Ok(());
    }

    let scoped = match category {
        Some(category) => matrix.submatrix(category.members()),
        None => matrix,
    };
    if json {
        return print_json(&scoped);
    }

    let mut header = vec!["".to_string()];
    header.extend(scoped.assets().iter().map(|a| display_name(a).to_string()));
    let mut table = new_table(header);
    for (i, asset) in scoped.assets().iter().enumerate() {
        let mut row = vec![display_name(asset).to_string()];
        row.extend(scoped.values()[i].iter().map(|r| fmt_num(*r, 2)));
        table.add_row(row);
    }
    println!("{table}");

    let pairs = scoped.pair_rankings();
    if pairs.len() > 1 {
        println!("Top positive pairs:");
        for pair in pairs.iter().take(3) {
            println!(
                "  {} <-> {}: {}",
                display_name(&pair.first),
                display_name(&pair.second),
                fmt_num(pair.coefficient, 3)
            );
        }
        println!("Top negative pairs:");
        for pair in pairs.iter().rev().take(3) {
            println!(
                "  {} <-> {}: {}",
                display_name(&pair.first),
                display_name(&pair.second),
                fmt_num(pair.coefficient, 3)
            );
        }
    }
    Ok(())
}

fn handle_portfolio(
    frame: &PriceFrame,
    assets: &[String],
    amount: Decimal,
    json: bool,
) -> anyhow::Result<()> {
    let allocation = portfolio::allocate(frame, assets, amount)?;

    if json {
        return print_json(&allocation);
    }

    if allocation.warning.is_some() {
        println!(
            "Warning: none of the selected assets has a positive total return; nothing to allocate."
        );
        return Ok(());
    }

    let mut table = new_table(vec!["Asset", "Total Return %", "Weight", "Amount $"]);
    for line in &allocation.lines {
        table.add_row(vec![
            display_name(&line.asset).to_string(),
            format!("{:+.2}", line.total_return_pct),
            format!("{:.4}", line.weight),
            line.amount.to_string(),
        ]);
    }
    println!("{table}");
    if !allocation.excluded.is_empty() {
        let excluded: Vec<&str> = allocation.excluded.iter().map(|a| display_name(a)).collect();
        println!("Excluded (non-positive return): {}", excluded.join(", "));
    }
    Ok(())
}

fn handle_leaderboard(frame: &PriceFrame, config: &Config, json: bool) -> anyhow::Result<()> {
    let engine = StatisticsEngine::new(config.analytics.clone());

    let mut reports: Vec<_> = engine
        .all_statistics(frame)
        .into_iter()
        .filter_map(|(_, result)| result.ok())
        .collect();
    reports.sort_by(|a, b| {
        b.total_return_pct
            .partial_cmp(&a.total_return_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if json {
        return print_json(&reports);
    }

    let mut table = new_table(vec![
        "Asset",
        "Return %",
        "Volatility %",
        "Sharpe",
        "VaR 95%",
        "Max DD %",
        "Skew",
        "Kurtosis",
        "Grade",
    ]);
    for r in &reports {
        table.add_row(vec![
            display_name(&r.asset).to_string(),
            format!("{:+.2}", r.total_return_pct),
            fmt_num(r.annualized_volatility_pct, 2),
            fmt_num(r.sharpe_ratio, 2),
            fmt_num(r.var_95_pct, 2),
            fmt_num(r.max_drawdown_pct, 2),
            fmt_num(r.skewness, 2),
            fmt_num(r.kurtosis, 2),
            r.grade.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Output Helpers
// ==============================================================================

fn select_assets(frame: &PriceFrame, category: Option<AssetCategory>) -> Vec<String> {
    match category {
        // Category members missing from the table are skipped, not errors.
        Some(category) => category
            .members()
            .iter()
            .filter(|name| frame.contains(name))
            .map(|name| name.to_string())
            .collect(),
        None => frame.assets().to_vec(),
    }
}

fn new_table<T: Into<comfy_table::Cell>>(header: Vec<T>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

/// NaN-aware number formatting: undefined statistics render as "n/a".
fn fmt_num(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// The `_Price` suffix is a storage detail, not a display name.
fn display_name(asset: &str) -> &str {
    asset.strip_suffix("_Price").unwrap_or(asset)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
