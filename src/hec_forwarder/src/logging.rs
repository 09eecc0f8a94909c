use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber: JSON lines on stdout, which the Lambda
/// runtime ships to CloudWatch as-is.
pub fn setup_logging() -> Result<()> {
    // RUST_LOG wins, otherwise info and up
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_level(true)
        .with_current_span(false)
        .with_ansi(false)
        .with_writer(std::io::stdout);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::debug!("Logging system initialized");

    Ok(())
}
