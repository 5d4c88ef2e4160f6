//! Risk Daemon - GRC risk workflow service
//!
//! Serves the risk workflow over REST:
//! - Risk intake, assessment and treatment actions
//! - Role assignment gated by workflow phase
//! - Per-risk transition history and a live event stream

use clap::Parser;
use risk_daemon::{DaemonConfig, DaemonError, DaemonResult, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Risk Daemon CLI
#[derive(Parser)]
#[command(name = "riskd")]
#[command(about = "Risk Daemon - GRC risk workflow service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "RISK_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the config file)
    #[arg(short, long, env = "RISK_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level (overrides the config file)
    #[arg(long, env = "RISK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "RISK_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    println!(
        r#"
  riskd - GRC risk workflow
  Version: {}
  Phase mode: {:?}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.workflow.phase_mode,
        config.server.listen_addr
    );

    let server = Server::new(config).await?;
    server.run().await
}
