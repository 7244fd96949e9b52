use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tokenlens::trace::TokenTrace;
use tokenlens::tui::app::{TokenAction, ViewerApp};
use tokenlens::tui::runner::{self, SelectionCell};
use tokenlens::view::{Percentile, ViewOptions};

#[derive(Parser)]
#[command(name = "tokenlens", about = "Terminal viewer for token activation traces.")]
struct Cli {
    /// Trace file (JSON: {"tokens": [...], "activations": [...]}).
    /// Omitted: a built-in sample trace.
    trace: Option<PathBuf>,

    /// Start in collapsed shorthand mode (window around the peak token)
    #[arg(short, long)]
    shorthand: bool,

    /// Highlight cutoff percentile, strictly between 0 and 100
    #[arg(short, long, default_value_t = 90.0)]
    percentile: f64,

    /// Token index to mark as selected at startup
    #[arg(long)]
    highlight: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tokenlens=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let trace = match &cli.trace {
        Some(path) => TokenTrace::load(path)?,
        None => TokenTrace::sample(),
    };
    info!(tokens = trace.tokens.len(), "trace loaded");

    let options = ViewOptions {
        shorthand: cli.shorthand,
        percentile: Percentile::new(cli.percentile)?,
    };

    // Clicking a token records it as the external selection; the runner
    // feeds it back as the highlighted token.
    let selection: SelectionCell = Arc::new(Mutex::new(cli.highlight));
    let actions: Vec<Option<TokenAction>> = (0..trace.tokens.len())
        .map(|i| {
            let cell = Arc::clone(&selection);
            Some(Box::new(move || {
                if let Ok(mut guard) = cell.lock() {
                    *guard = Some(i);
                }
            }) as TokenAction)
        })
        .collect();

    let mut app = ViewerApp::new(trace, options).with_actions(actions);
    runner::run_viewer(&mut app, Some(selection)).await
}
