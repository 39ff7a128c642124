use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;

/// Try to setup a logger.
///
/// Logs go to stderr, so they stay out of the way of the board on stdout.
/// The level defaults to info and can be changed with `RUST_LOG`.
pub fn setup() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::filter::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env_lossy();
    let stderr_formatting_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(stderr_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(())
}
