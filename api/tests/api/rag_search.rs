use anyhow::Result;
use api::routes::rag::{INTERNAL_ERROR, UPSTREAM_ERROR};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

use test_helpers::{
    MockBackend, assert_search_failed, mai_context, spawn_app, spawn_portal,
    spawn_portal_with_timeout,
};

#[tokio::test]
async fn successful_context_is_passed_through() -> Result<()> {
    let app = spawn_app().await;
    app.backend.reply_to_context(
        200,
        mai_context("politique RH", "Article 4 : congés annuels"),
    );

    let (status, envelope) = app.search("politique RH").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.context, "Article 4 : congés annuels");
    assert_eq!(envelope.query.as_deref(), Some("politique RH"));
    assert_eq!(envelope.error, None);
    assert_eq!(app.backend.context_queries(), vec!["politique RH"]);
    Ok(())
}

#[tokio::test]
async fn upstream_status_is_propagated() -> Result<()> {
    let app = spawn_app().await;
    app.backend
        .reply_to_context(503, json!({"detail": "index en reconstruction"}));

    let result = app.search("sécurité incendie").await?;

    assert_search_failed(
        result,
        StatusCode::SERVICE_UNAVAILABLE,
        UPSTREAM_ERROR,
    );
    Ok(())
}

#[tokio::test]
async fn upstream_not_found_is_propagated() -> Result<()> {
    let app = spawn_app().await;
    app.backend.reply_to_context_raw(404, "<html>Not Found</html>");

    let result = app.search("procédure").await?;

    assert_search_failed(result, StatusCode::NOT_FOUND, UPSTREAM_ERROR);
    Ok(())
}

#[tokio::test]
async fn missing_upstream_fields_fall_back() -> Result<()> {
    let app = spawn_app().await;
    app.backend.reply_to_context(200, json!({"success": true}));

    let (status, envelope) = app.search("bac 12").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(envelope.success);
    assert_eq!(envelope.context, "");
    assert_eq!(envelope.query.as_deref(), Some("bac 12"));
    Ok(())
}

#[tokio::test]
async fn empty_upstream_object_is_an_unsuccessful_search() -> Result<()> {
    let app = spawn_app().await;
    app.backend.reply_to_context(200, json!({}));

    let (status, envelope) = app.search("cantine").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.success);
    assert_eq!(envelope.context, "");
    assert_eq!(envelope.query.as_deref(), Some("cantine"));
    assert_eq!(envelope.error, None);
    Ok(())
}

#[tokio::test]
async fn non_json_upstream_body_is_an_internal_error() -> Result<()> {
    let app = spawn_app().await;
    app.backend.reply_to_context_raw(200, "contexte brut");

    let result = app.search("distillation").await?;

    assert_search_failed(
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR,
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_an_internal_error() -> Result<()> {
    let (_, client) = spawn_portal("http://mai-backend.invalid").await;
    let body = payloads::requests::RagSearch {
        query: "politique RH".into(),
    };

    let result = client.rag_search(&body).await?;

    assert_search_failed(
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR,
    );
    Ok(())
}

#[tokio::test]
async fn slow_backend_is_an_internal_error() -> Result<()> {
    let backend = MockBackend::spawn().await;
    backend.reply_to_context(200, mai_context("politique RH", "trop tard"));
    backend.delay_context_reply(Duration::from_secs(2));
    let (_, client) =
        spawn_portal_with_timeout(&backend.address, Duration::from_secs(1))
            .await;
    let body = payloads::requests::RagSearch {
        query: "politique RH".into(),
    };

    let result = client.rag_search(&body).await?;

    assert_search_failed(
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR,
    );
    assert_eq!(backend.context_queries(), vec!["politique RH"]);
    Ok(())
}

#[tokio::test]
async fn malformed_request_is_an_internal_error() -> Result<()> {
    let app = spawn_app().await;

    let url = format!("{}/api/rag/search", app.client.address);
    let response = app
        .client
        .inner_client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    let status = response.status();
    let result = (status, response.json().await?);

    assert_search_failed(
        result,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR,
    );
    assert!(app.backend.context_queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_query_is_forwarded_as_empty() -> Result<()> {
    let app = spawn_app().await;
    app.backend.reply_to_context(200, json!({"success": true}));

    let url = format!("{}/api/rag/search", app.client.address);
    let response = app
        .client
        .inner_client
        .post(&url)
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.backend.context_queries(), vec![""]);
    Ok(())
}

#[tokio::test]
async fn query_is_url_encoded() -> Result<()> {
    let app = spawn_app().await;
    let query = "accès & sécurité ? 100% = oui #12";
    app.backend.reply_to_context(200, mai_context(query, "…"));

    let (status, envelope) = app.search(query).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.backend.context_queries(), vec![query]);
    assert_eq!(envelope.query.as_deref(), Some(query));
    Ok(())
}

#[tokio::test]
async fn responses_are_not_cached() -> Result<()> {
    let app = spawn_app().await;

    let url = format!("{}/api/rag/search", app.client.address);
    let response = app
        .client
        .inner_client
        .post(&url)
        .json(&json!({"query": "cantine"}))
        .send()
        .await?;

    let cache_control = response
        .headers()
        .get("cache-control")
        .expect("Cache-Control header should be present")
        .to_str()?;
    assert_eq!(cache_control, "no-store");
    Ok(())
}
