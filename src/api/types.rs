use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Book, BookStatus, BorrowRecord, BorrowerId, Isbn, NewBook};

/// 書籍登録リクエスト（POST /books）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBookRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl AddBookRequest {
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            isbn: Isbn::new(self.isbn),
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}

/// 貸出リクエスト（POST /books/:isbn/borrow）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowBookRequest {
    pub borrower_id: String,
}

impl BorrowBookRequest {
    pub fn borrower_id(&self) -> BorrowerId {
        BorrowerId::new(self.borrower_id.as_str())
    }
}

/// 書籍一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// ステータスでフィルタリング（available, borrowed）
    pub status: Option<String>,
}

/// 検索のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct SearchBooksQuery {
    /// 検索語（省略時は全件）
    #[serde(default)]
    pub q: String,
}

/// 貸出履歴取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct BorrowHistoryQuery {
    /// ISBNでフィルタリング
    pub isbn: Option<String>,
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub available: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            isbn: book.isbn().value().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year(),
            available: book.is_available(),
        }
    }
}

/// 貸出記録レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecordResponse {
    pub record_id: Uuid,
    pub isbn: String,
    pub borrower_id: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl From<BorrowRecord> for BorrowRecordResponse {
    fn from(record: BorrowRecord) -> Self {
        Self {
            record_id: record.record_id.value(),
            isbn: record.isbn.value().to_string(),
            borrower_id: record.borrower_id.value().to_string(),
            borrow_date: record.borrow_date,
            return_date: record.return_date,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<BookStatus, String> {
    status.parse::<BookStatus>()
}
