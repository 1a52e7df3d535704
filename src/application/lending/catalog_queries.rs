use crate::domain::{Book, BookStatus, BorrowRecord, Isbn, Result};

use super::lending_service::{ServiceDependencies, log_rejection};

/// ISBNで書籍を取得する
///
/// ロックの外に持ち出すため、その時点のスナップショット（複製）を返す。
pub async fn get_book(deps: &ServiceDependencies, isbn: &Isbn) -> Result<Book> {
    let library = deps.library.lock().await;
    library
        .get_book(isbn)
        .cloned()
        .inspect_err(|e| log_rejection("get_book", e))
}

/// 書籍一覧（登録順）
///
/// ステータスを指定した場合は貸出可能・貸出中のどちらかに絞り込む。
pub async fn list_books(deps: &ServiceDependencies, status: Option<BookStatus>) -> Vec<Book> {
    let library = deps.library.lock().await;
    tracing::debug!(status = status.map(|s| s.as_str()), "list books");

    match status {
        Some(BookStatus::Available) => library.get_available_books().into_iter().cloned().collect(),
        Some(BookStatus::Borrowed) => library.get_borrowed_books().into_iter().cloned().collect(),
        None => library.books().to_vec(),
    }
}

/// 貸出可能な書籍（登録順）
pub async fn get_available_books(deps: &ServiceDependencies) -> Vec<Book> {
    list_books(deps, Some(BookStatus::Available)).await
}

/// 貸出中の書籍（登録順）
pub async fn get_borrowed_books(deps: &ServiceDependencies) -> Vec<Book> {
    list_books(deps, Some(BookStatus::Borrowed)).await
}

/// 部分一致検索（大文字小文字を区別しない）
pub async fn search_books(deps: &ServiceDependencies, query: &str) -> Vec<Book> {
    let library = deps.library.lock().await;
    let books: Vec<Book> = library.search_books(query).into_iter().cloned().collect();
    tracing::debug!(query, hits = books.len(), "search");
    books
}

/// 貸出履歴（作成順）
pub async fn get_borrow_history(
    deps: &ServiceDependencies,
    isbn: Option<&Isbn>,
) -> Vec<BorrowRecord> {
    deps.library.lock().await.get_borrow_history(isbn)
}
