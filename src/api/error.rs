use crate::domain::LibraryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// ドメイン層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryError);

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self.0 {
            // 404 Not Found - リクエストされた書籍が存在しない
            LibraryError::BookNotFound(_) => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),

            // 409 Conflict - ISBNの重複
            LibraryError::DuplicateBook(_) => (StatusCode::CONFLICT, "DUPLICATE_BOOK"),

            // 422 Unprocessable Entity - 貸出状態に関するルール違反
            LibraryError::BookNotAvailable(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BOOK_NOT_AVAILABLE")
            }
            LibraryError::InvalidReturn(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_RETURN"),

            // 500 Internal Server Error - 貸出履歴の不整合
            // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LibraryError::MissingBorrowRecord(ref isbn) => {
                tracing::error!(isbn = %isbn, "Borrow history inconsistency: {}", self.0);
                let body = Json(ErrorResponse::new(
                    "INCONSISTENT_BORROW_HISTORY",
                    "Borrow history is inconsistent",
                ));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(ErrorResponse::new(error_type, self.0.to_string()));
        (status, body).into_response()
    }
}
