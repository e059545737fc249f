use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the tracing subscriber and error reporting hooks.
///
/// The filter honors `RUST_LOG` and defaults to `info`. Call once at
/// process start; embedding applications with their own subscriber should
/// skip this.
pub fn init_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .init();

    color_eyre::install()?;

    Ok(())
}
