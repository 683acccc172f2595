//! Tracing setup for the turntable tools.

use std::fs::File;
use std::sync::Arc;

use crate::config::LoggingConfig;
use crate::error::SpintableResult;

/// Initialize the global tracing subscriber from the logging configuration.
///
/// When `config.file` is set, output goes to that file (without ANSI codes)
/// instead of the terminal, so long batch runs can be inspected afterwards.
pub fn init_logging(config: &LoggingConfig) -> SpintableResult<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if let Some(path) = &config.file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = Arc::new(File::create(path)?);
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(file)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
        return Ok(());
    }

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
    Ok(())
}
