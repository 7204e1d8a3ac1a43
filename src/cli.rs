use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::external::chart_provider::ChartRange;

#[derive(Parser, Debug)]
#[command(name = "tickerboard", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch quotes and print one JSON object per line. Defaults to the whole catalogue.
    Quotes(QuotesArgs),

    /// Scan the catalogue for the day's best favorable movers.
    Opportunities,

    /// Inspect or change the saved portfolio.
    #[command(subcommand)]
    Portfolio(PortfolioCommand),

    /// Fetch the portfolio symbols and write them as CSV.
    Export(ExportArgs),

    /// Print the price bars of one symbol for the detail chart.
    History(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct QuotesArgs {
    /// Symbols to fetch; bare local tickers get the Istanbul suffix.
    pub symbols: Vec<String>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    pub symbol: String,

    /// 1d (hourly bars), 1mo (daily bars) or 1y (weekly bars).
    #[arg(short, long, default_value_t = ChartRange::Month)]
    pub period: ChartRange,
}

#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// Print saved entries.
    List,
    /// Save a symbol with its current quote.
    Add { symbol: String },
    /// Forget a symbol.
    Remove { symbol: String },
    /// Save the symbol if missing, forget it otherwise.
    Toggle { symbol: String },
    /// Exit status 0 when the symbol is saved, 1 otherwise.
    Contains { symbol: String },
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
