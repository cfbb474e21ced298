use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use realtime_session::{
    config::RealtimeConfig, logging::init_logging, replay::replay, EventPublisher, EventRouter,
    SessionContext,
};
use tokio::io::BufReader;
use tracing::info;

/// Replay a JSON-lines stream of realtime client events against a fresh
/// session and print every server event as one JSON line.
#[derive(Parser, Debug)]
#[command(name = "realtime-session", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "REALTIME_SESSION_CONFIG")]
    config: Option<PathBuf>,

    /// File of client events, one JSON object per line (stdin if omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, env = "REALTIME_SESSION_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RealtimeConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RealtimeConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.log_json;
    init_logging(&config.logging)?;

    let router = Arc::new(EventRouter::realtime()?);
    info!(?router, "Event router initialized");

    let (publisher, outbound) = EventPublisher::channel();
    let session = config.session.new_session();
    info!(session_id = %session.id, "Session created");
    let ctx = SessionContext::new(session, publisher)
        .with_turn_detection_defaults(config.session.turn_detection_defaults());

    let mut stdout = tokio::io::stdout();
    match &cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            replay(router, ctx, outbound, BufReader::new(file), &mut stdout).await
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            replay(router, ctx, outbound, stdin, &mut stdout).await
        }
    }
}
