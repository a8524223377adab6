//! Branch relay: builds Branch API requests from a batch of tag-manager
//! events and optionally sends them.
//!
//! Reads `{ "client": {...}, "cookies": {...}, "events": [...] }` from a file
//! or stdin. Without `--send` the built requests are printed as JSON.

mod transport;

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use branch_core::{BranchConfig, CaptureClient, ClientContext};
use branch_web_sdk::{EventDispatcher, McEvent};
use clap::Parser;
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "branch-relay")]
#[command(about = "Translate analytics events into Branch API requests")]
#[command(version)]
struct Cli {
    /// Event batch file (reads stdin when omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Branch key (overrides config)
    #[arg(long, env = "BRANCH_MC__BRANCH_KEY")]
    branch_key: Option<String>,

    /// Branch API base URL (overrides config)
    #[arg(long, env = "BRANCH_MC__API_BASE_URL")]
    api_base_url: Option<String>,

    /// Skip ecommerce events
    #[arg(long, default_value_t = false)]
    no_ecommerce: bool,

    /// POST the built requests instead of printing them
    #[arg(long, default_value_t = false)]
    send: bool,

    /// Per-request timeout when sending, in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,
}

/// Batch of events produced by one client.
#[derive(Debug, Deserialize)]
struct RelayInput {
    client: ClientContext,
    #[serde(default)]
    cookies: HashMap<String, String>,
    events: Vec<McEvent>,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<RelayInput> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parsing event batch")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "branch_relay=info,branch_web_sdk=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = BranchConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        BranchConfig::default()
    });

    if let Some(key) = cli.branch_key {
        config.branch_key = key;
    }
    if let Some(url) = cli.api_base_url {
        config.api_base_url = url;
    }
    if cli.no_ecommerce {
        config.ecommerce = false;
    }

    info!(
        api_base_url = %config.api_base_url,
        ecommerce = config.ecommerce,
        "Configuration loaded"
    );

    let input = read_input(cli.input.as_ref())?;
    let client = CaptureClient::new(input.client).with_cookies(input.cookies);
    let dispatcher = EventDispatcher::new(config)?;

    dispatcher.dispatch_batch(&input.events, &client)?;
    let requests = client.take_requests();

    for stats in dispatcher.all_stats() {
        info!(kind = %stats.kind, sent = stats.sent, skipped = stats.skipped, "dispatch stats");
    }

    if cli.send {
        let delivered = transport::send_all(requests, cli.timeout_ms).await?;
        info!(delivered, "requests sent");
    } else {
        println!("{}", serde_json::to_string_pretty(&requests)?);
    }

    Ok(())
}
