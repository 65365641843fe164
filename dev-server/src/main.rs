//! Development server for portal UI development
//!
//! Runs the portal server against the in-process mock backend, which serves
//! articles, users and stats and answers MAI context queries with a canned
//! document excerpt.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use api::telemetry::LogFormat;
use test_helpers::{mai_context, mock::USERS_TOKEN};
use tracing::info;

const SAMPLE_CONTEXT: &str = "Note de service RH-2025-04 : les demandes de \
congés d'été sont à déposer avant le 30 avril auprès du responsable \
hiérarchique.";

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber =
        api::telemetry::get_subscriber("info".into(), LogFormat::Pretty);
    api::telemetry::init_subscriber(subscriber);

    info!("Starting portal development server");

    let app = test_helpers::spawn_app().await;
    app.backend
        .reply_to_context(200, mai_context("congés", SAMPLE_CONTEXT));

    info!("Development server ready");
    info!("   Portal:  http://127.0.0.1:{}", app.port);
    info!("   Backend: {}", app.backend.address);
    info!(
        "   UI:  cd ui && BACKEND_URL={} PORTAL_URL=http://127.0.0.1:{} trunk serve",
        app.backend.address, app.port
    );
    info!("   Directory token: {USERS_TOKEN}");
    info!("Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down development server");
    Ok(())
}
