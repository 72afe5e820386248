use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        DefaultBodyLimit, Path, Query, State,
    },
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::search::NotFound;
use crate::catalog::shared::SharedCatalog;
use crate::cli::{load_catalog, ServeArgs};
use crate::core::{Book, BookId, Patron, PatronId};

/// Largest JSON body accepted when adding an entry
pub const MAX_BODY_SIZE: usize = 64 * 1024; // 64KB

/// Requests handled at once before new ones wait.
/// axum applies router layers to each route, so the limit is per route.
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub catalog: SharedCatalog,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

#[derive(Deserialize)]
struct SearchParams {
    /// Keyword; absent means match everything
    q: Option<String>,
}

fn error_response(status: StatusCode, error_type: &str, error: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            error_type: error_type.to_string(),
        }),
    )
        .into_response()
}

fn not_found_response(e: NotFound) -> Response {
    error_response(StatusCode::NOT_FOUND, "not_found", e.to_string())
}

fn path_rejection_response(rejection: PathRejection) -> Response {
    error_response(rejection.status(), "bad_request", rejection.body_text())
}

fn json_rejection_response(rejection: JsonRejection) -> Response {
    error_response(rejection.status(), "invalid_body", rejection.body_text())
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the seed catalog cannot be loaded, the tokio runtime
/// cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, SharedCatalog::from(catalog)).await })
}

/// Create the application router with all routes and middleware configured.
pub fn create_router(catalog: SharedCatalog) -> Router {
    let state = Arc::new(AppState { catalog });

    Router::new()
        .route("/", get(index_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/books", get(search_books_handler).post(add_book_handler))
        .route("/api/books/{id}", get(get_book_handler))
        .route(
            "/api/patrons",
            get(search_patrons_handler).post(add_patron_handler),
        )
        .route("/api/patrons/{id}", get(get_patron_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, catalog: SharedCatalog) -> anyhow::Result<()> {
    tracing::info!(
        books = catalog.book_count(),
        patrons = catalog.patron_count(),
        "serving catalog"
    );
    let app = create_router(catalog);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting library-catalog web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!("Could not open browser: {e}");
        }
    }

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!("Failed to bind {addr}: {e}");
        e
    })?;
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server stopped with error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "book_count": state.catalog.book_count(),
        "patron_count": state.catalog.patron_count(),
    }))
}

async fn search_books_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let books = state.catalog.search_books(params.q.as_deref().unwrap_or(""));
    Json(serde_json::json!({
        "count": books.len(),
        "books": books,
    }))
}

async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection_response(rejection),
    };
    match state.catalog.find_book_by_id(BookId::new(id)) {
        Ok(book) => Json(book).into_response(),
        Err(e) => not_found_response(e),
    }
}

async fn add_book_handler(
    State(state): State<Arc<AppState>>,
    book: Result<Json<Book>, JsonRejection>,
) -> Response {
    let Json(book) = match book {
        Ok(book) => book,
        Err(rejection) => return json_rejection_response(rejection),
    };
    state.catalog.add_book(book.clone());
    (StatusCode::CREATED, Json(book)).into_response()
}

async fn search_patrons_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let patrons = state
        .catalog
        .search_patrons(params.q.as_deref().unwrap_or(""));
    Json(serde_json::json!({
        "count": patrons.len(),
        "patrons": patrons,
    }))
}

async fn get_patron_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection_response(rejection),
    };
    match state.catalog.find_patron_by_id(PatronId::new(id)) {
        Ok(patron) => Json(patron).into_response(),
        Err(e) => not_found_response(e),
    }
}

async fn add_patron_handler(
    State(state): State<Arc<AppState>>,
    patron: Result<Json<Patron>, JsonRejection>,
) -> Response {
    let Json(patron) = match patron {
        Ok(patron) => patron,
        Err(rejection) => return json_rejection_response(rejection),
    };
    state.catalog.add_patron(patron.clone());
    (StatusCode::CREATED, Json(patron)).into_response()
}
