use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use tickerboard::cli::{Cli, Commands, ExportArgs, PortfolioCommand};
use tickerboard::config::AppConfig;
use tickerboard::external::yahoo::YahooChartProvider;
use tickerboard::logging::{init_logging, LoggingConfig};
use tickerboard::models::Quote;
use tickerboard::services::{
    export_service, history_service, insight_service, portfolio_service, quote_service, symbols,
};
use tickerboard::state::AppState;
use tickerboard::store::FileStore;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("failed to initialize logging")?;

    let cli = Cli::parse();
    tracing::debug!("Command line input recorded: {cli:?}");

    let config = AppConfig::from_env().context("invalid configuration")?;
    let provider = YahooChartProvider::from_config(&config).context("failed to build HTTP client")?;
    let storage = FileStore::new(config.data_dir.clone());
    tracing::info!("📡 Chart endpoint {}, data in {}", config.chart_base_url, storage.dir().display());

    let mut state = AppState::new(config, Arc::new(provider), Arc::new(storage));

    match cli.command {
        Commands::Quotes(args) => {
            let symbols = if args.symbols.is_empty() {
                symbols::default_universe()
            } else {
                args.symbols.iter().map(|s| symbols::normalize(s)).collect()
            };
            let quotes = fetch(&state, &symbols).await;
            print_json_lines(&quotes)?;
        }

        Commands::Opportunities => {
            let quotes = fetch(&state, &symbols::default_universe()).await;
            print_json_lines(&insight_service::opportunities(&quotes))?;
        }

        Commands::Portfolio(command) => return run_portfolio(&mut state, command).await,

        Commands::Export(args) => export(&state, args).await?,

        Commands::History(args) => {
            let symbol = symbols::normalize(&args.symbol);
            let history =
                history_service::chart_history(state.price_provider.as_ref(), &symbol, args.period)
                    .await
                    .with_context(|| format!("no {} chart for {}", args.period, symbol))?;
            println!("{}", serde_json::to_string(&history)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn fetch(state: &AppState, symbols: &[String]) -> Vec<Quote> {
    quote_service::fetch_quotes(state.price_provider.as_ref(), symbols, state.config.batch).await
}

async fn run_portfolio(state: &mut AppState, command: PortfolioCommand) -> anyhow::Result<ExitCode> {
    match command {
        PortfolioCommand::List => {
            let mut out = io::stdout().lock();
            for entry in state.portfolio.list() {
                writeln!(out, "{}", serde_json::to_string(entry)?)?;
            }
        }
        PortfolioCommand::Add { symbol } => {
            if !portfolio_service::add(state, &symbol).await? {
                println!("{} is already in the portfolio", symbols::normalize(&symbol));
            }
        }
        PortfolioCommand::Remove { symbol } => {
            if !portfolio_service::remove(state, &symbol)? {
                println!("{} is not in the portfolio", symbols::normalize(&symbol));
            }
        }
        PortfolioCommand::Toggle { symbol } => {
            let saved = portfolio_service::toggle(state, &symbol).await?;
            println!("{}", if saved { "saved" } else { "removed" });
        }
        PortfolioCommand::Contains { symbol } => {
            let saved = portfolio_service::contains(state, &symbol);
            println!("{saved}");
            if !saved {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn export(state: &AppState, args: ExportArgs) -> anyhow::Result<()> {
    let quotes = portfolio_service::refresh(state).await;
    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            export_service::write_quotes_csv(BufWriter::new(file), &quotes)?;
            tracing::info!("💾 Exported {} quotes to {}", quotes.len(), path.display());
        }
        None => export_service::write_quotes_csv(io::stdout().lock(), &quotes)?,
    }
    Ok(())
}

fn print_json_lines(quotes: &[Quote]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for quote in quotes {
        writeln!(out, "{}", serde_json::to_string(quote)?)?;
    }
    Ok(())
}
