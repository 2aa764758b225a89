use crate::reports::{
    run_contract_review, run_insight_report, run_metrics_report, run_scrape, InsightArgs,
    MetricsArgs, ReviewArgs, ScrapeArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Insight",
    about = "Analyze income properties and review lease contracts from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Calculate cap rate, NOI and the expense breakdown for a property
    Metrics(MetricsArgs),
    /// Look up a property by address and report its investment metrics
    Insight(InsightArgs),
    /// Send a contract file to the AI advisor and print the review
    Review(ReviewArgs),
    /// Fetch a web page and print its visible text
    Scrape(ScrapeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Metrics(args) => run_metrics_report(args),
        Command::Insight(args) => run_insight_report(args),
        Command::Review(args) => run_contract_review(args).await,
        Command::Scrape(args) => run_scrape(args).await,
    }
}
