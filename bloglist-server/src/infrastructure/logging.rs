use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset. sqlx logs every statement at `info`.
pub const DEFAULT_DIRECTIVES: &str = "info,bloglist_server=debug,sqlx=warn";

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(default_directives: &str) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directives))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logging initialized");
    Ok(())
}
