//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Install the console subscriber. Request tagging in `bindings` logs at
/// debug level, so it is enabled alongside the ui itself.
pub fn init_logging() {
    let env_filter = EnvFilter::new("error,ui=debug,bindings=debug");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    if installed.is_ok() {
        tracing::info!("Initialized logs");
    }
}
