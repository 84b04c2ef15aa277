use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Parser;
use collector::fetch_yearly_stats_with_report;
use common::{config::AppConfig, logging};
use gh_graphql::{ClientOptions, GraphqlClient};
use tracing::{info, warn};

/// Aggregate a GitHub user's year of activity into a JSON snapshot
#[derive(Parser, Debug)]
#[command(name = "yearly-stats")]
#[command(version)]
struct Args {
    /// GitHub login to summarize
    username: String,

    /// Year to summarize (default: current UTC year)
    #[arg(long)]
    year: Option<i32>,

    /// GitHub access token (overrides github.token from configuration)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Write the stats JSON here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write the organization collection report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load().context("failed to load configuration")?;
    logging::init_logging(&config.logging.level);

    if args.token.is_some() {
        config.github.token = args.token.clone();
    }
    let token = config.github.resolved_token()?;
    let client = GraphqlClient::new(
        &token,
        ClientOptions {
            endpoint: config.github.endpoint.clone(),
            user_agent: config.github.user_agent.clone(),
        },
    )?;

    let year = args.year.unwrap_or_else(|| Utc::now().year());
    info!(endpoint = %client.endpoint(), login = %args.username, year, "aggregating yearly stats");
    let (stats, report) =
        fetch_yearly_stats_with_report(&client, &config.collector, &args.username, year)
            .await
            .with_context(|| format!("failed to aggregate {year} stats for {}", args.username))?;

    for skipped in report.skipped() {
        warn!(source = %skipped.source, kind = skipped.kind.label(), "source skipped");
    }
    info!(
        login = %stats.user.login,
        total_contributions = stats.contributions.total_contributions,
        skipped = report.skipped().count(),
        "yearly stats ready"
    );

    let json = to_json(&stats, args.pretty)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    if let Some(path) = &args.report {
        std::fs::write(path, to_json(&report, args.pretty)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
