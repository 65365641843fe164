//! In-process stand-in for the collaborating backend.
//!
//! Serves the endpoints the portal consumes:
//! - `GET /rag/context/` answers with a canned reply set by the test,
//!   optionally after a delay, and records every query it receives,
//! - `GET /articles` filters and paginates a fixed set of articles,
//! - `GET /auth/users/` requires the bearer token [`USERS_TOKEN`],
//! - `GET /stats` reports counters for the fixed data.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde::Deserialize;
use serde_json::{Value, json};

pub const USERS_TOKEN: &str = "test-session-token";

/// Article type tags used by the fixed data.
pub const ARTICLE_TYPES: [&str; 3] = ["actualite", "note", "procedure"];

struct CannedReply {
    status: u16,
    body: String,
}

struct MockState {
    context_reply: CannedReply,
    context_delay: Option<Duration>,
    context_queries: Vec<String>,
    article_queries: Vec<HashMap<String, String>>,
    articles: Vec<Value>,
    users: Vec<Value>,
}

#[derive(Clone)]
pub struct MockBackend {
    pub address: String,
    state: web::Data<Mutex<MockState>>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = web::Data::new(Mutex::new(MockState {
            context_reply: CannedReply {
                status: 200,
                body: json!({"success": true, "context": "", "query": ""})
                    .to_string(),
            },
            context_delay: None,
            context_queries: Vec::new(),
            article_queries: Vec::new(),
            articles: seed_articles(),
            users: seed_users(),
        }));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let app_state = state.clone();
        let server = HttpServer::new(move || {
            // The dev server lets the ui call this backend cross-origin
            App::new()
                .wrap(Cors::permissive())
                .app_data(app_state.clone())
                .route("/rag/context/", web::get().to(context))
                .route("/articles", web::get().to(articles))
                .route("/auth/users/", web::get().to(users))
                .route("/stats", web::get().to(stats))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        tokio::spawn(server);

        Self {
            address: format!("http://127.0.0.1:{port}"),
            state,
        }
    }

    /// Answer every following context request with `status` and `body`.
    pub fn reply_to_context(&self, status: u16, body: Value) {
        self.reply_to_context_raw(status, &body.to_string());
    }

    /// Like [`MockBackend::reply_to_context`], with a body that need not be
    /// JSON.
    pub fn reply_to_context_raw(&self, status: u16, body: &str) {
        self.state.lock().unwrap().context_reply = CannedReply {
            status,
            body: body.to_string(),
        };
    }

    /// Hold every following context reply for `delay` before answering.
    pub fn delay_context_reply(&self, delay: Duration) {
        self.state.lock().unwrap().context_delay = Some(delay);
    }

    /// Queries received by the context endpoint, decoded, in order.
    pub fn context_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().context_queries.clone()
    }

    /// Query strings received by the articles endpoint, in order.
    pub fn article_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().unwrap().article_queries.clone()
    }

    pub fn article_count(&self) -> usize {
        self.state.lock().unwrap().articles.len()
    }
}

async fn context(
    query: web::Query<HashMap<String, String>>,
    state: web::Data<Mutex<MockState>>,
) -> HttpResponse {
    let (status, body, delay) = {
        let mut state = state.lock().unwrap();
        state
            .context_queries
            .push(query.get("query").cloned().unwrap_or_default());
        let status = StatusCode::from_u16(state.context_reply.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, state.context_reply.body.clone(), state.context_delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    HttpResponse::build(status)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .body(body)
}

#[derive(Deserialize)]
struct ArticleQuery {
    search: Option<String>,
    #[serde(rename = "type")]
    article_type: Option<String>,
    page: Option<usize>,
    page_size: Option<usize>,
}

async fn articles(
    request: HttpRequest,
    state: web::Data<Mutex<MockState>>,
) -> HttpResponse {
    let raw = web::Query::<HashMap<String, String>>::from_query(
        request.query_string(),
    )
    .map(|q| q.into_inner())
    .unwrap_or_default();
    let Ok(query) =
        web::Query::<ArticleQuery>::from_query(request.query_string())
    else {
        return HttpResponse::BadRequest()
            .json(json!({"detail": "Paramètres de requête invalides."}));
    };

    let mut state = state.lock().unwrap();
    state.article_queries.push(raw);

    let needle = query.search.as_deref().map(str::to_lowercase);
    let matching: Vec<&Value> = state
        .articles
        .iter()
        .filter(|a| match &needle {
            Some(needle) => a["title"]
                .as_str()
                .is_some_and(|t| t.to_lowercase().contains(needle)),
            None => true,
        })
        .filter(|a| match &query.article_type {
            Some(t) => a["type"].as_str() == Some(t.as_str()),
            None => true,
        })
        .collect();

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).max(1);
    let start = (page - 1) * page_size;
    if start > 0 && start >= matching.len() {
        return HttpResponse::NotFound()
            .json(json!({"detail": "Page invalide."}));
    }
    let results: Vec<&Value> =
        matching.iter().skip(start).take(page_size).copied().collect();
    let link = |p: usize| format!("/articles?page={p}&page_size={page_size}");
    let next = (start + page_size < matching.len()).then(|| link(page + 1));
    let previous = (page > 1).then(|| link(page - 1));

    HttpResponse::Ok().json(json!({
        "results": results,
        "count": matching.len(),
        "next": next,
        "previous": previous,
    }))
}

async fn users(
    request: HttpRequest,
    state: web::Data<Mutex<MockState>>,
) -> HttpResponse {
    let expected = format!("Bearer {USERS_TOKEN}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return HttpResponse::Unauthorized().json(json!({
            "detail": "Informations d'authentification non fournies."
        }));
    }
    HttpResponse::Ok().json(&state.lock().unwrap().users)
}

async fn stats(state: web::Data<Mutex<MockState>>) -> HttpResponse {
    let state = state.lock().unwrap();
    HttpResponse::Ok().json(json!({
        "total_articles": state.articles.len(),
        "total_users": state.users.len(),
    }))
}

fn seed_articles() -> Vec<Value> {
    let titles = [
        "Arrêt technique de l'unité de distillation",
        "Politique RH : télétravail",
        "Procédure de consignation électrique",
        "Résultats trimestriels de la raffinerie",
        "Exercice incendie du bac 12",
        "Note de service : accès au parking",
        "Procédure de permis de feu",
        "Nouvelle cantine du site",
        "Politique RH : congés d'été",
        "Note sécurité : port des EPI",
        "Procédure d'évacuation",
        "Bilan énergétique annuel",
    ];
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "id": i + 1,
                "title": title,
                "summary": format!("Résumé de « {title} »"),
                "type": ARTICLE_TYPES[i % ARTICLE_TYPES.len()],
                "author": "Service communication",
                "published_at": format!("2025-03-{:02}T08:00:00Z", i + 1),
            })
        })
        .collect()
}

fn seed_users() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "username": "adupont",
            "email": "a.dupont@example.com",
            "first_name": "Anne",
            "last_name": "Dupont",
            "department": "Ressources humaines",
            "is_staff": true,
        }),
        json!({
            "id": 2,
            "username": "bmartin",
            "email": "b.martin@example.com",
            "first_name": "Bruno",
            "last_name": "Martin",
            "department": "Production",
        }),
        json!({
            "id": 3,
            "username": "cleroy",
            "department": "Maintenance",
            "is_active": false,
        }),
    ]
}
