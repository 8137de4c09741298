use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber for the current thread. Logging stays active
/// until the returned guard is dropped. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) -> DefaultGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
