use std::str::FromStr;

use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line output with span close events, for local development.
    #[default]
    Pretty,
    /// One line per event, for log collectors.
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

/// Log an error if it exists using the alternate selector, which emits the
/// error chain.
pub fn log_error(e: impl Into<anyhow::Error>) {
    let e: anyhow::Error = e.into();
    tracing::error!("{e:#}");
}

/// Build the subscriber. `RUST_LOG` takes precedence over `env_filter`.
pub fn get_subscriber(
    env_filter: String,
    format: LogFormat,
) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .pretty()
            .with_span_events(fmt::format::FmtSpan::CLOSE)
    });
    let compact = (format == LogFormat::Compact).then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .compact()
            .with_ansi(false)
    });
    Registry::default()
        .with(env_filter)
        .with(pretty)
        .with(compact)
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("Compact".parse(), Ok(LogFormat::Compact));
        assert_eq!(" pretty ".parse(), Ok(LogFormat::Pretty));
        assert!("json".parse::<LogFormat>().is_err());
    }
}
