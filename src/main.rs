use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use tribune::{
    run_batch, AnthropicClient, AnthropicConfig, PostgrestStore, RunOptions, StoreConfig,
};

/// Extract, attribute and summarize councillor speeches from stored
/// meeting transcripts.
#[derive(Parser)]
#[command(name = "tribune")]
#[command(author, version, about = "Council meeting speech extraction pipeline", long_about = None)]
struct Cli {
    /// Number of meetings to process
    #[arg(long)]
    limit: Option<u32>,

    /// Specific meeting ID to process
    #[arg(long)]
    meeting_id: Option<String>,

    /// Re-extract even if already processed (deletes existing speeches)
    #[arg(long)]
    force: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

const REQUIRED_ENV: [&str; 3] = ["SUPABASE_URL", "SUPABASE_KEY", "ANTHROPIC_API_KEY"];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    check_required_env()?;

    let store = PostgrestStore::new(StoreConfig::from_env()?);
    let client = AnthropicClient::new(AnthropicConfig::from_env()?);

    info!("starting speech extraction");
    info!(
        "limit: {}",
        cli.limit.map_or("all".to_string(), |n| n.to_string())
    );
    info!("force re-extract: {}", cli.force);

    let options = RunOptions {
        meeting_id: cli.meeting_id,
        limit: cli.limit,
        force: cli.force,
    };

    run_batch(&store, &client, &options).await?;

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Fail fast before any meeting is touched, naming every missing variable.
fn check_required_env() -> Result<()> {
    let missing: Vec<&str> = REQUIRED_ENV
        .iter()
        .copied()
        .filter(|name| std::env::var(name).map_or(true, |value| value.is_empty()))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    for name in &missing {
        error!("missing required environment variable: {name}");
    }
    anyhow::bail!("missing required configuration: {}", missing.join(", "));
}
