use color_eyre::Result;
use std::sync::LazyLock;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const PROJECT_NAME: &str = "CHUNKED_FIZZBUZZ";
pub static LOG_ENV: LazyLock<String> = LazyLock::new(|| format!("{}_LOG_LEVEL", PROJECT_NAME));

/// Logs go to stderr; stdout carries nothing but FizzBuzz.
pub fn init() -> Result<()> {
    let env_filter = EnvFilter::builder().with_default_directive(tracing::Level::WARN.into());

    // If the `RUST_LOG` environment variable is set, use that as the default,
    // otherwise use the value of the `LOG_ENV` environment variable.
    let env_filter = env_filter
        .try_from_env()
        .or_else(|_| env_filter.with_env_var(&*LOG_ENV).from_env())?;

    let stderr_subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(stderr_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
