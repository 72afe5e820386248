//! Router-level tests for the web API, driven without a socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use library_catalog::web::server::{create_router, ErrorResponse};
use library_catalog::{Availability, Book, CatalogStore, Patron, SharedCatalog};
use tower::ServiceExt;

fn router() -> Router {
    let mut store = CatalogStore::new();
    store.add_book(Book::new(1, "The Hobbit", "J.R.R. Tolkien", "Fantasy", Availability::Available));
    store.add_book(Book::new(2, "Hobbiton Tales", "Anonymous", "Fantasy", Availability::Borrowed));
    store.add_patron(Patron::new(5, "Alice", "alice@example.com"));
    create_router(SharedCatalog::from(store))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn titles(body: &[u8]) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_slice(body).unwrap();
    value["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_books_case_insensitive() {
    let (status, body) = send(router(), get("/api/books?q=HOBBIT")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["The Hobbit", "Hobbiton Tales"]);
}

#[tokio::test]
async fn test_search_books_without_keyword_returns_all() {
    let (status, body) = send(router(), get("/api/books")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body).len(), 2);

    let (_, body) = send(router(), get("/api/books?q=dune")).await;
    assert!(titles(&body).is_empty());
}

#[tokio::test]
async fn test_get_missing_book_is_404() {
    let (status, body) = send(router(), get("/api/books/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error_type, "not_found");
    assert_eq!(error.error, "Book with id 99 not found");
}

#[tokio::test]
async fn test_get_patron() {
    let (status, body) = send(router(), get("/api/patrons/5")).await;
    assert_eq!(status, StatusCode::OK);
    let patron: Patron = serde_json::from_slice(&body).unwrap();
    assert_eq!(patron, Patron::new(5, "Alice", "alice@example.com"));

    let (status, _) = send(router(), get("/api/patrons/6")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_book_then_find_it() {
    let app = router();

    let (status, _) = send(
        app.clone(),
        post_json(
            "/api/books",
            r#"{"id": 3, "title": "Dune", "author": "Frank Herbert", "genre": "SF"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app.clone(), get("/api/books/3")).await;
    assert_eq!(status, StatusCode::OK);
    let book: Book = serde_json::from_slice(&body).unwrap();
    assert_eq!(book.title(), "Dune");
    assert_eq!(book.availability(), Availability::Available);

    let (_, body) = send(app, get("/api/catalog")).await;
    let counts: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(counts["book_count"], 3);
    assert_eq!(counts["patron_count"], 1);
}

#[tokio::test]
async fn test_index_page_and_security_headers() {
    let response = router().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}

fn error_body(body: &[u8]) -> ErrorResponse {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_non_numeric_id_returns_json_error() {
    let (status, body) = send(router(), get("/api/books/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_body(&body).error_type, "bad_request");

    let (status, body) = send(router(), get("/api/patrons/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_body(&body).error_type, "bad_request");
}

#[tokio::test]
async fn test_malformed_json_returns_json_error() {
    let app = router();

    let (status, body) = send(app.clone(), post_json("/api/books", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_body(&body).error_type, "invalid_body");

    let (status, body) = send(app.clone(), post_json("/api/patrons", r#"{"id": 1}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = error_body(&body);
    assert_eq!(error.error_type, "invalid_body");
    assert!(error.error.contains("name"));

    let (_, body) = send(app, get("/api/catalog")).await;
    let counts: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(counts["book_count"], 2);
    assert_eq!(counts["patron_count"], 1);
}

#[tokio::test]
async fn test_negative_id_round_trip() {
    let app = router();

    let (status, _) = send(app.clone(), get("/api/books/-1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        app.clone(),
        post_json(
            "/api/books",
            r#"{"id": -1, "title": "Below Zero", "author": "N. Egative", "genre": "Mystery"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, get("/api/books/-1")).await;
    assert_eq!(status, StatusCode::OK);
    let book: Book = serde_json::from_slice(&body).unwrap();
    assert_eq!(book.title(), "Below Zero");
}
