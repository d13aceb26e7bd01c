#![warn(clippy::all)]

use drive_prep::config::Config;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = Config::new()?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter());

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        // routes log their spans on close
        .with_span_events(FmtSpan::CLOSE)
        .init();

    drive_prep::run(config).await
}
