//! Logging setup for the application

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log levels selected by the number of `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Debug level, one verbose flag (-v)
    Debug = 1,
    /// Trace level, two or more verbose flags (-v -v)
    Trace = 2,
}

impl LogLevel {
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Normal,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Default filter directive when `RUST_LOG` is not set
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Normal => "s3_file_gateway=info,tower_http=info",
            LogLevel::Debug => "s3_file_gateway=debug,tower_http=debug",
            LogLevel::Trace => "s3_file_gateway=trace,tower_http=trace,aws_sdk_s3=debug",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity count.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LogLevel::from_verbosity(verbosity).directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
