use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Environment variable holding the `EnvFilter` directives.
pub const TRACING_ENV: &str = "PARSETT_LOG";

/// Installs a compact stderr subscriber filtered by [`TRACING_ENV`].
///
/// Logging is off unless the variable is set, so stderr only carries the
/// JSON error envelope by default.
pub fn setup_logger() -> Result<(), SetGlobalDefaultError> {
    let env_filter = EnvFilter::builder()
        .with_env_var(TRACING_ENV)
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
