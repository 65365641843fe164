use api::{
    Config, build,
    telemetry::{get_subscriber, init_subscriber},
};

/// Intranet portal server: health check and the MAI search proxy.
///
/// Environment variables can be set directly or loaded from a .env file in the project root.
///
/// Required environment variables:
/// - IP_ADDRESS: Server bind address (127.0.0.1 for local, 0.0.0.0 for public)
/// - PORT: Server port
/// - MAI_BACKEND_URL: Base URL of the MAI backend (the context endpoint is
///   `{MAI_BACKEND_URL}/rag/context/`)
///
/// Optional environment variables:
/// - ALLOWED_ORIGINS: CORS origins ("*" for any origin in development, or comma-separated list for production)
/// - UPSTREAM_TIMEOUT_SECS: Timeout for one forwarded search (default 30)
/// - LOG_FORMAT: "pretty" (default) or "compact"
/// - RUST_LOG: Overrides the default "info" log filter
///
/// Example .env file:
/// IP_ADDRESS=127.0.0.1
/// PORT=3000
/// MAI_BACKEND_URL=http://localhost:8000/api
/// ALLOWED_ORIGINS=*
///
/// Example production command:
/// IP_ADDRESS=0.0.0.0 PORT=3000 LOG_FORMAT=compact \
/// MAI_BACKEND_URL=http://mai-backend:8000/api \
/// ALLOWED_ORIGINS=https://intranet.example.com \
/// cargo run --release
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if available
    // This will silently ignore if the file doesn't exist
    let _ = dotenvy::dotenv();

    let mut config = Config::from_env()?;

    let subscriber = get_subscriber("info".into(), config.log_format);
    init_subscriber(subscriber);

    let server = build(&mut config)?;
    server.await?;
    Ok(())
}
