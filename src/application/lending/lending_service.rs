use crate::domain::{
    Book, BorrowRecord, Library, LibraryError, NewBook, Result, commands::*,
};
use crate::ports::Clock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// サービスの依存関係
///
/// 登録簿と貸出履歴を1つのLibraryにまとめ、単一のMutexで保護する。
/// 貸出・返却は「読んでから書く」操作なので、各操作は1回のロック取得の中で完結させる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub library: Arc<Mutex<Library>>,
    pub clock: Arc<dyn Clock>,
}

impl ServiceDependencies {
    /// 空のLibraryで依存関係を作成する
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_library(Library::new(), clock)
    }

    pub fn with_library(library: Library, clock: Arc<dyn Clock>) -> Self {
        Self {
            library: Arc::new(Mutex::new(library)),
            clock,
        }
    }
}

/// 却下された操作をログに残す
///
/// 事前条件違反は警告、内部不整合はエラーとして記録する。
pub(super) fn log_rejection(operation: &str, err: &LibraryError) {
    match err {
        LibraryError::MissingBorrowRecord(isbn) => {
            tracing::error!(operation, isbn = %isbn, "{}", err);
        }
        _ => {
            tracing::warn!(operation, isbn = %err.isbn(), "{}", err);
        }
    }
}

/// 書籍を登録する
///
/// # エラー
/// - DuplicateBook: 同じISBNが登録済み
pub async fn add_book(deps: &ServiceDependencies, data: NewBook) -> Result<Book> {
    let mut library = deps.library.lock().await;

    let book = library
        .add_book(data)
        .inspect_err(|e| log_rejection("add_book", e))?
        .clone();

    tracing::info!(isbn = %book.isbn(), title = book.title(), "book registered");
    Ok(book)
}

/// 書籍を貸し出す
///
/// 貸出日は時計ポートの現在時刻。
///
/// # エラー
/// - BookNotFound: 未登録
/// - BookNotAvailable: 貸出中
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<BorrowRecord> {
    let mut library = deps.library.lock().await;
    let borrowed_at = deps.clock.now();

    let record = library
        .borrow_book(&cmd.isbn, cmd.borrower_id, borrowed_at)
        .inspect_err(|e| log_rejection("borrow_book", e))?
        .clone();

    tracing::info!(
        isbn = %record.isbn,
        borrower_id = %record.borrower_id,
        record_id = %record.record_id.value(),
        "book borrowed"
    );
    Ok(record)
}

/// 書籍を返却する
///
/// # エラー
/// - BookNotFound: 未登録
/// - InvalidReturn: 貸出されていない
/// - MissingBorrowRecord: 貸出中なのに未返却の記録がない
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<Book> {
    let mut library = deps.library.lock().await;
    let returned_at = deps.clock.now();

    let book = library
        .return_book(&cmd.isbn, returned_at)
        .inspect_err(|e| log_rejection("return_book", e))?
        .clone();

    tracing::info!(isbn = %book.isbn(), "book returned");
    Ok(book)
}
