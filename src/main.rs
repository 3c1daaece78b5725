use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use bucket_resource::resource::{self, CheckRequest, FetchRequest};
use bucket_resource::storage::BucketClient;

#[derive(Parser)]
#[command(name = "bucket-resource")]
#[command(version, about = "Version resolution for bucket-stored release artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report the versions released since the one in the request
    Check,
    /// Download one version into a destination directory
    Fetch { destination: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

/// Logs go to stderr; stdout belongs to the response payload.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command) -> anyhow::Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request from stdin")?;

    match command {
        Command::Check => {
            let request: CheckRequest =
                serde_json::from_str(&input).context("Failed to parse check request")?;
            let store = BucketClient::from_source(&request.source);
            let versions = resource::check(&store, &request).await?;
            println!("{}", serde_json::to_string(&versions)?);
        }
        Command::Fetch { destination } => {
            let request: FetchRequest =
                serde_json::from_str(&input).context("Failed to parse fetch request")?;
            let store = BucketClient::from_source(&request.source);
            let result = resource::fetch(&store, &request, &destination).await?;
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    Ok(())
}
