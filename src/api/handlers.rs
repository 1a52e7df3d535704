use crate::application::lending::{
    ServiceDependencies, add_book as execute_add_book, borrow_book as execute_borrow_book,
    get_book as query_book, get_borrow_history as query_borrow_history,
    list_books as query_books, return_book as execute_return_book,
    search_books as query_search_books,
};
use crate::domain::{
    Isbn,
    commands::{BorrowBook, ReturnBook},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BookResponse, BorrowBookRequest, BorrowHistoryQuery,
        BorrowRecordResponse, ListBooksQuery, SearchBooksQuery,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /books - 書籍を登録
///
/// 強制されるビジネスルール:
/// - ISBNが未登録であること
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = execute_add_book(&state.service_deps, req.into_new_book()).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// POST /books/:isbn/borrow - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 書籍が登録済みであること
/// - 書籍が貸出中でないこと
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
    Json(req): Json<BorrowBookRequest>,
) -> Result<(StatusCode, Json<BorrowRecordResponse>), ApiError> {
    let cmd = BorrowBook {
        isbn: Isbn::new(isbn),
        borrower_id: req.borrower_id(),
    };

    let record = execute_borrow_book(&state.service_deps, cmd).await?;

    Ok((StatusCode::CREATED, Json(BorrowRecordResponse::from(record))))
}

/// POST /books/:isbn/return - 書籍を返却
///
/// 強制されるビジネスルール:
/// - 書籍が登録済みであること
/// - 書籍が貸出中であること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = ReturnBook {
        isbn: Isbn::new(isbn),
    };

    let book = execute_return_book(&state.service_deps, cmd).await?;

    Ok(Json(BookResponse::from(book)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/:isbn - 書籍をISBNで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = query_book(&state.service_deps, &Isbn::new(isbn)).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /books - オプションフィルタ付き書籍一覧取得
///
/// クエリパラメータ:
/// - status: ステータスでフィルタリング（available, borrowed）（オプション）
///
/// フィルタが指定されない場合は、全書籍を登録順で返す。
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<BookResponse>>, QueryError> {
    let status = query
        .status
        .as_deref()
        .map(super::types::parse_status_filter)
        .transpose()
        .map_err(QueryError::BadRequest)?;

    let books = query_books(&state.service_deps, status).await;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /search?q= - タイトル・著者・ISBNの部分一致検索
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchBooksQuery>,
) -> Json<Vec<BookResponse>> {
    let books = query_search_books(&state.service_deps, &query.q).await;
    Json(books.into_iter().map(BookResponse::from).collect())
}

/// GET /borrow-records - 貸出履歴を作成順で取得
///
/// クエリパラメータ:
/// - isbn: ISBNでフィルタリング（オプション、空文字はフィルタなし）
pub async fn list_borrow_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BorrowHistoryQuery>,
) -> Json<Vec<BorrowRecordResponse>> {
    let isbn = query.isbn.filter(|isbn| !isbn.is_empty()).map(Isbn::new);
    let records = query_borrow_history(&state.service_deps, isbn.as_ref()).await;

    Json(
        records
            .into_iter()
            .map(BorrowRecordResponse::from)
            .collect(),
    )
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    BadRequest(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
        };

        let body = Json(super::types::ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
