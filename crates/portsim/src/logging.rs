use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// stdout is reserved for the JSON report, so diagnostics always go to
/// stderr. The level can be controlled via the `level` parameter or the
/// `RUST_LOG` environment variable, which takes precedence.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("portsim={level},portsim_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::debug!(level, "portsim logging initialized");
    Ok(())
}
