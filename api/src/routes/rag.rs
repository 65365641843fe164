//! `POST /api/rag/search`: forward a search to the MAI backend and reshape
//! its answer into a [`RagSearchResponse`].
//!
//! Every path ends in the same JSON envelope:
//! - upstream success: `200` with `success`/`context`/`query` filled from
//!   the upstream body, defaulting any missing or mistyped field;
//! - upstream non-success: the same status with [`UPSTREAM_ERROR`];
//! - anything that fails along the way (unparseable request, network,
//!   timeout, non-JSON upstream body): `500` with [`INTERNAL_ERROR`].

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, post, web};
use payloads::{requests, responses::RagSearchResponse};
use serde_json::Value;

use crate::telemetry::log_error;
use crate::upstream::{MaiClient, UpstreamError, UpstreamReply};

pub const UPSTREAM_ERROR: &str =
    "Erreur lors de la récupération du contexte MAI";
pub const INTERNAL_ERROR: &str =
    "Erreur interne du serveur lors de la recherche MAI";

#[derive(Debug, thiserror::Error)]
enum SearchError {
    #[error("Invalid search request")]
    Request(#[source] serde_json::Error),
    #[error("Upstream search failed")]
    Upstream(#[from] UpstreamError),
}

#[tracing::instrument(
    skip(body, mai),
    fields(
        request_id = %uuid::Uuid::new_v4(),
        query = tracing::field::Empty,
    )
)]
#[post("/rag/search")]
pub async fn search(
    body: web::Bytes,
    mai: web::Data<MaiClient>,
) -> HttpResponse {
    let (status, envelope) = match forward(&body, &mai).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log_error(e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                RagSearchResponse::failure(INTERNAL_ERROR),
            )
        }
    };
    HttpResponse::build(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(envelope)
}

async fn forward(
    body: &[u8],
    mai: &MaiClient,
) -> Result<(StatusCode, RagSearchResponse), SearchError> {
    let request: requests::RagSearch =
        serde_json::from_slice(body).map_err(SearchError::Request)?;
    tracing::Span::current()
        .record("query", tracing::field::display(&request.query));
    tracing::info!("search received");

    let reply = mai.fetch_context(&request.query).await?;
    Ok(normalize(&request.query, reply))
}

/// Map an upstream reply onto the envelope. Never fails.
pub fn normalize(
    query: &str,
    reply: UpstreamReply,
) -> (StatusCode, RagSearchResponse) {
    match reply {
        UpstreamReply::Failed(code) => {
            let status = StatusCode::from_u16(code)
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (status, RagSearchResponse::failure(UPSTREAM_ERROR))
        }
        UpstreamReply::Context(body) => {
            // empty strings count as absent
            let text = |field: &str| {
                body.get(field)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            };
            let envelope = RagSearchResponse {
                success: body
                    .get("success")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                context: text("context").unwrap_or_default().to_string(),
                query: Some(text("query").unwrap_or(query).to_string()),
                error: None,
            };
            (StatusCode::OK, envelope)
        }
    }
}
