use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, borrow_book, get_book, list_books, list_borrow_records, return_book,
    search_books,
};

/// Creates the API router with all catalog and lending endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Register a book
/// - POST /books/:isbn/borrow - Borrow a book
/// - POST /books/:isbn/return - Return a book
///
/// Query endpoints (Read operations):
/// - GET /books - List books, optionally filtered by status
/// - GET /books/:isbn - Get book details
/// - GET /search - Search by title, author or ISBN
/// - GET /borrow-records - Borrow history, optionally filtered by ISBN
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Catalog endpoints
        .route("/books", post(add_book).get(list_books))
        .route("/books/:isbn", get(get_book))
        .route("/search", get(search_books))
        // Lending endpoints
        .route("/books/:isbn/borrow", post(borrow_book))
        .route("/books/:isbn/return", post(return_book))
        .route("/borrow-records", get(list_borrow_records))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
