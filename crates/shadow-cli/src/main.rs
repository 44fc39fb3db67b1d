use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use shadow_core::{
    DataSourceMappingsRetriever, ShadowOperationType, ShadowRule, ShadowRuleConfig,
    TableHintMappingsRetriever, apply_mappings,
};
use tracing_subscriber::{EnvFilter, fmt};

mod statement;

use statement::RouteReport;

const CONFIG_ENV: &str = "SHADOW_ROUTE_CONFIG";
const CONFIG_FILE: &str = "shadow.toml";

#[derive(Parser)]
#[command(
    name = "shadow-route",
    about = "Shadow routing check: which shadow data sources a statement is routed to"
)]
struct Cli {
    /// Path to the shadow rule config (defaults to $SHADOW_ROUTE_CONFIG, ./shadow.toml,
    /// then the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Statement kind: insert, update, delete or select
    #[arg(long)]
    operation: String,

    /// Table touched by the statement, as `alias=name` or just `name`
    #[arg(long = "table")]
    tables: Vec<String>,

    /// Ask whether the statement stays on production instead of going to shadow
    #[arg(long)]
    production: bool,

    /// Route unit to rewrite, as `logic=actual`
    #[arg(long = "route")]
    routes: Vec<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return Ok(local);
    }
    if let Some(user) = dirs::config_dir().map(|dir| dir.join("shadow-route").join(CONFIG_FILE))
        && user.exists()
    {
        return Ok(user);
    }

    bail!("no shadow config found: pass --config, set {CONFIG_ENV}, or create ./{CONFIG_FILE}")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the JSON report
    let subscriber = fmt()
        .with_env_filter(EnvFilter::from_env("SHADOW_ROUTE_LOG"))
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_path = resolve_config_path(cli.config)?;
    let config = ShadowRuleConfig::from_file(&config_path)
        .with_context(|| format!("failed to load shadow config {}", config_path.display()))?;
    let rule = ShadowRule::new(&config)
        .with_context(|| format!("invalid shadow config {}", config_path.display()))?;

    let operation: ShadowOperationType = cli.operation.parse()?;
    let tables = statement::table_aliases(&cli.tables)?;
    let routes = statement::route_units(&cli.routes)?;
    let is_shadow = !cli.production;

    tracing::info!(
        config = %config_path.display(),
        operation = %operation,
        tables = tables.len(),
        is_shadow,
        "Retrieving shadow data source mappings"
    );

    let retriever = TableHintMappingsRetriever::new(operation, is_shadow, tables);
    let mappings = retriever.retrieve(&rule)?;
    let routes = apply_mappings(&routes, &mappings);

    tracing::info!(mappings = mappings.len(), "Shadow routing decided");

    let report = RouteReport {
        is_shadow,
        mappings,
        routes,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
