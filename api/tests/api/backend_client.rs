use anyhow::Result;
use bindings::{AuthSignal, Completion, GatedBinding, ListBinding};
use payloads::{
    ClientError, FetchParams,
    responses::{Article, User},
};
use reqwest::StatusCode;
use std::cell::RefCell;
use std::rc::Rc;

use test_helpers::spawn_app;

#[tokio::test]
async fn list_params_are_sent_as_query_string() -> Result<()> {
    let app = spawn_app().await;
    let client = app.backend_client();

    let params = FetchParams::default()
        .with_search("Procédure")
        .with_type("procedure")
        .with_time_filter("month")
        .with_page_size(2);
    client.list_articles(&params).await?;
    client.list_articles(&FetchParams::default()).await?;

    let queries = app.backend.article_queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0]["search"], "Procédure");
    assert_eq!(queries[0]["type"], "procedure");
    assert_eq!(queries[0]["time_filter"], "month");
    assert_eq!(queries[0]["page"], "1");
    assert_eq!(queries[0]["page_size"], "2");
    // Unset filters are omitted rather than sent empty.
    assert!(!queries[1].contains_key("search"));
    assert!(!queries[1].contains_key("type"));
    assert_eq!(queries[1]["page_size"], "10");
    Ok(())
}

#[tokio::test]
async fn pages_report_neighbours_and_total() -> Result<()> {
    let app = spawn_app().await;
    let client = app.backend_client();
    let total = app.backend.article_count() as u64;

    let first = client.list_articles(&FetchParams::default()).await?;
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_count, total);
    assert!(first.has_next);
    assert!(!first.has_previous);

    let second = client
        .list_articles(&FetchParams::default().with_page(2))
        .await?;
    assert_eq!(second.items.len() as u64, total - 10);
    assert!(!second.has_next);
    assert!(second.has_previous);
    assert!(first.items.iter().all(|a| !second.items.contains(a)));
    Ok(())
}

#[tokio::test]
async fn list_binding_tracks_filter_changes() -> Result<()> {
    let app = spawn_app().await;
    let client = app.backend_client();
    let mut binding = ListBinding::<Article>::new();

    let ticket = binding.set_params(FetchParams::default()).unwrap();
    assert!(binding.loading());
    let result = client.list_articles(ticket.key()).await;
    assert_eq!(binding.complete(ticket, result), Completion::Applied);
    assert!(!binding.loading());
    assert_eq!(binding.items().len(), 10);

    // Same params by value: nothing to fetch.
    assert!(binding.set_params(FetchParams::default()).is_none());

    let slow = binding
        .set_params(FetchParams::default().with_search("politique"))
        .unwrap();
    let fast = binding
        .set_params(FetchParams::default().with_search("procédure"))
        .unwrap();
    let fast_result = client.list_articles(fast.key()).await;
    let slow_result = client.list_articles(slow.key()).await;

    assert_eq!(binding.complete(fast, fast_result), Completion::Applied);
    assert_eq!(binding.complete(slow, slow_result), Completion::Superseded);
    assert!(!binding.loading());
    assert_eq!(binding.error(), None);
    assert!(!binding.items().is_empty());
    assert!(
        binding
            .items()
            .iter()
            .all(|a| a.title.to_lowercase().contains("procédure"))
    );
    Ok(())
}

#[tokio::test]
async fn list_binding_keeps_items_when_a_page_fails() -> Result<()> {
    let app = spawn_app().await;
    let client = app.backend_client();
    let mut binding = ListBinding::<Article>::new();

    let ticket = binding.set_params(FetchParams::default()).unwrap();
    let result = client.list_articles(ticket.key()).await;
    binding.complete(ticket, result);

    let ticket = binding
        .set_params(FetchParams::default().with_page(99))
        .unwrap();
    let result = client.list_articles(ticket.key()).await;
    assert!(matches!(
        result,
        Err(ClientError::APIError(StatusCode::NOT_FOUND, _))
    ));
    binding.complete(ticket, result);

    assert_eq!(binding.error(), Some("Page invalide."));
    assert_eq!(binding.items().len(), 10);
    assert!(!binding.loading());
    Ok(())
}

#[tokio::test]
async fn users_require_authentication() -> Result<()> {
    let app = spawn_app().await;

    let anonymous = app.backend_client().list_users().await;
    assert!(matches!(
        anonymous,
        Err(ClientError::APIError(StatusCode::UNAUTHORIZED, _))
    ));

    let users = app.authenticated_backend_client().list_users().await?;
    assert_eq!(users.len(), 3);
    assert_eq!(users[0].display_name(), "Anne Dupont");
    assert_eq!(users[2].display_name(), "cleroy");
    assert!(!users[2].is_active);
    Ok(())
}

#[tokio::test]
async fn gated_binding_fetches_users_on_login() -> Result<()> {
    let app = spawn_app().await;
    let auth = AuthSignal::default();
    let binding = Rc::new(RefCell::new(GatedBinding::<User>::new()));
    let pending = Rc::new(RefCell::new(Vec::new()));

    let _subscription = auth.reader().subscribe({
        let binding = binding.clone();
        let pending = pending.clone();
        move |authenticated| {
            if let Some(ticket) = binding.borrow_mut().observe_auth(authenticated)
            {
                pending.borrow_mut().push(ticket);
            }
        }
    });

    assert!(binding.borrow_mut().refetch().is_none());
    auth.set(true);
    let ticket = pending.borrow_mut().pop().unwrap();
    assert!(binding.borrow().loading());

    let users = app.authenticated_backend_client().list_users().await;
    let outcome = binding.borrow_mut().complete(ticket, users);

    assert_eq!(outcome, Completion::Applied);
    assert_eq!(binding.borrow().items().len(), 3);
    assert_eq!(binding.borrow().error(), None);
    Ok(())
}

#[tokio::test]
async fn rejected_session_surfaces_the_backend_detail() -> Result<()> {
    let app = spawn_app().await;
    let mut binding = GatedBinding::<User>::new();

    let ticket = binding.observe_auth(true).unwrap();
    // The session cookie expired: the backend rejects the request.
    let users = app.backend_client().list_users().await;
    binding.complete(ticket, users);

    assert_eq!(
        binding.error(),
        Some("Informations d'authentification non fournies.")
    );
    assert!(binding.items().is_empty());
    Ok(())
}

#[tokio::test]
async fn stats_expose_counters() -> Result<()> {
    let app = spawn_app().await;

    let stats = app.backend_client().article_stats().await?;

    assert_eq!(
        stats.counter("total_articles"),
        Some(app.backend.article_count() as u64)
    );
    assert_eq!(stats.counter("total_users"), Some(3));
    assert_eq!(stats.counter("missing"), None);
    Ok(())
}
