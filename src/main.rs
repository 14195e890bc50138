use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use relayq::{QueueRegistry, Server, ServerConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listening port
    #[arg(short, long, env = "RELAYQ_PORT", default_value_t = 8080)]
    port: u16,

    /// Listening address
    #[arg(long, env = "RELAYQ_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Seconds an unclaimed PUT value stays claimable (unbounded if unset)
    #[arg(long, env = "RELAYQ_SEND_TTL")]
    send_ttl: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RELAYQ_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        send_ttl: cli.send_ttl.map(Duration::from_secs),
    };

    let registry = Arc::new(QueueRegistry::new());

    let server = Server::new(config, registry);
    server.run().await?;

    Ok(())
}
