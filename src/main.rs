use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use tokenscope::apis::ApiManager;
use tokenscope::classifier::{classify, format_address, AddressIdentity, MatchKind};
use tokenscope::config::{self, Config};
use tokenscope::links::{self, ServiceLink};
use tokenscope::logger::{self, LogLevel, LogTag, LoggerConfig};
use tokenscope::tokens::{AddressAnalyzer, Analysis, AnalysisStatus, TokenMetadata, TokenResolver};

#[derive(Parser)]
#[command(name = "tokenscope", version)]
#[command(about = "Resolve token addresses, explorer URLs and cashtags", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/tokenscope/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logs for a tag (classifier, resolver, api, cache, links, config, all)
    #[arg(long = "debug", global = true, value_name = "TAG")]
    debug: Vec<String>,

    /// Verbose logs, including raw API responses
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify input without any network access
    Classify { input: String },
    /// Classify and resolve token metadata
    Resolve { input: String },
    /// Resolve and list explorer, token and service links
    Links { input: String },
    /// Write the effective configuration to the config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct LinksReport {
    analysis: Analysis,
    explorer: Option<ServiceLink>,
    token_links: Vec<ServiceLink>,
    service_links: Vec<ServiceLink>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = result {
        logger::error(LogTag::System, &format!("{:#}", e));
        logger::flush();
        std::process::exit(1);
    }
    logger::flush();
}

async fn run(cli: Cli) -> Result<()> {
    // Flags only until the config file has been read
    logger::init(LoggerConfig::from_flags(&cli.debug, cli.verbose, cli.quiet));

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    config::load_config_from_path(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let config = config::get_config_clone();
    logger::init(logger_config(&cli, &config));

    if !config.logging.colored {
        colored::control::set_override(false);
    }

    match &cli.command {
        Command::Classify { input } => {
            let identity = classify(input);
            if cli.json {
                print_json(&identity)?;
            } else {
                print_identity(&identity);
            }
        }
        Command::Resolve { input } => {
            let manager = ApiManager::from_config(&config)?;
            let analysis = analyze(&manager, &config, input).await?;
            if cli.json {
                print_json(&analysis)?;
            } else {
                print_analysis(&analysis);
            }
            log_api_stats(&manager).await;
        }
        Command::Links { input } => {
            let manager = ApiManager::from_config(&config)?;
            let analysis = analyze(&manager, &config, input).await?;
            let report = build_links_report(&manager, &config, analysis).await;
            if cli.json {
                print_json(&report)?;
            } else {
                print_analysis(&report.analysis);
                print_links(&report);
            }
            log_api_stats(&manager).await;
        }
        Command::InitConfig { force } => {
            if config_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            config::save_config(&config_path)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            logger::info(
                LogTag::Config,
                &format!("Wrote configuration to {}", config_path.display()),
            );
        }
    }

    Ok(())
}

/// CLI flags win over the `[logging]` section
fn logger_config(cli: &Cli, config: &Config) -> LoggerConfig {
    let mut logger_config = LoggerConfig::from_flags(&cli.debug, cli.verbose, cli.quiet);
    let flags_set = !cli.debug.is_empty() || cli.verbose || cli.quiet;
    if !flags_set {
        if let Some(level) = LogLevel::parse(&config.logging.level) {
            logger_config.min_level = level;
        }
    }
    logger_config.colored = config.logging.colored;
    logger_config.file_path = config.logging.file.clone();
    logger_config
}

async fn analyze(manager: &ApiManager, config: &Config, input: &str) -> Result<Analysis> {
    let resolver = Arc::new(TokenResolver::from_manager(manager, &config.resolver));
    let analyzer = AddressAnalyzer::new(resolver);
    match analyzer.analyze(input).await {
        Some(analysis) => Ok(analysis),
        None => bail!("analysis of '{}' was superseded", input),
    }
}

async fn build_links_report(manager: &ApiManager, config: &Config, analysis: Analysis) -> LinksReport {
    let metadata = analysis
        .metadata
        .clone()
        .unwrap_or_else(|| TokenMetadata::empty(&analysis.identity.address));
    let address = if analysis.identity.address.is_empty() {
        analysis.input.clone()
    } else {
        analysis.identity.address.clone()
    };

    let explorer = links::explorer_link(&metadata, &address, &config.links.preferred_explorers);
    let token_links = links::token_links(&metadata);
    let service_links = links::service_links(
        &address,
        &config.links.preferences,
        &metadata,
        manager.listings.as_ref(),
    )
    .await;

    LinksReport {
        analysis,
        explorer,
        token_links,
        service_links,
    }
}

async fn log_api_stats(manager: &ApiManager) {
    let stats = manager.get_all_stats().await;
    for (name, stats) in [
        ("dexscreener", &stats.dexscreener),
        ("jupiter", &stats.jupiter),
        ("coingecko", &stats.coingecko),
        ("listings", &stats.listings),
    ] {
        if stats.total_requests == 0 && stats.cache_hits == 0 {
            continue;
        }
        logger::debug(
            LogTag::Api,
            &format!(
                "{}: {} requests, {:.0}% ok, {} cache hits, avg {:.0}ms",
                name,
                stats.total_requests,
                stats.success_rate(),
                stats.cache_hits,
                stats.average_response_time_ms
            ),
        );
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn kind_label(kind: &MatchKind) -> String {
    match kind {
        MatchKind::Empty => "empty".to_string(),
        MatchKind::Cashtag => "cashtag".to_string(),
        MatchKind::LedgerAccount => "XRPL account".to_string(),
        MatchKind::LedgerComposite => "XRPL currency".to_string(),
        MatchKind::DirectAddress => "address".to_string(),
        MatchKind::ServiceUrl(id) => format!("{} URL", id.descriptor().name),
        MatchKind::Unrecognized => "unrecognized".to_string(),
    }
}

fn print_identity(identity: &AddressIdentity) {
    let chain = identity
        .chain
        .map(|chain| chain.display_name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("{:<10} {}", "Address".bold(), identity.address);
    println!("{:<10} {}", "Chain".bold(), chain);
    println!("{:<10} {}", "Matched".bold(), kind_label(&identity.kind));
    if let Some(currency) = identity.currency.as_ref().or(identity.currency_id.as_ref()) {
        println!("{:<10} {}", "Currency".bold(), currency);
    }
    if let Some(issuer) = &identity.issuer {
        println!("{:<10} {}", "Issuer".bold(), issuer);
    }
    if identity.invalid {
        println!("{}", "Not an address, supported URL or cashtag".red());
    }
}

fn print_analysis(analysis: &Analysis) {
    print_identity(&analysis.identity);

    let status = match analysis.status {
        AnalysisStatus::Valid => "valid".green(),
        AnalysisStatus::Invalid => "not found".red(),
        AnalysisStatus::Loading => "loading".yellow(),
        AnalysisStatus::Idle => "idle".dimmed(),
    };
    println!("{:<10} {}", "Status".bold(), status);

    let Some(meta) = &analysis.metadata else {
        return;
    };
    println!();
    if let Some(name) = &meta.name {
        println!("{:<10} {}", "Name".bold(), name);
    }
    if let Some(symbol) = meta.symbol.as_ref().or(meta.currency.as_ref()) {
        println!("{:<10} {}", "Symbol".bold(), symbol.cyan());
    }
    if let Some(chain) = meta.chain {
        println!("{:<10} {}", "Network".bold(), chain.display_name());
    }
    if let Some(base) = &meta.base_token {
        println!("{:<10} {}", "Token".bold(), format_address(base));
    }
    if let Some(price) = meta.price_usd {
        let change = match meta.price_change_24h {
            Some(change) if change >= 0.0 => format!("+{:.2}%", change).green(),
            Some(change) => format!("{:.2}%", change).red(),
            None => "".normal(),
        };
        println!("{:<10} ${} {}", "Price".bold(), price, change);
    }
    if let Some(description) = &meta.description {
        println!("{:<10} {}", "About".bold(), description.lines().next().unwrap_or(""));
    }
}

fn print_link_section(title: &str, links: &[ServiceLink]) {
    if links.is_empty() {
        return;
    }
    println!("\n{}", title.bold().underline());
    for link in links {
        println!(
            "  {:<18} {:<10} {}",
            link.name,
            link.service_type.as_str().dimmed(),
            link.url.as_deref().unwrap_or("").blue()
        );
    }
}

fn print_links(report: &LinksReport) {
    if let Some(explorer) = &report.explorer {
        print_link_section("Explorer", std::slice::from_ref(explorer));
    }
    print_link_section("Token", &report.token_links);
    print_link_section("Services", &report.service_links);

    if report.service_links.is_empty() && report.explorer.is_none() {
        println!("\n{}", "No chain resolved; no service links".yellow());
    }
}
