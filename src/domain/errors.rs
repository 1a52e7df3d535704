use thiserror::Error;

use super::Isbn;

/// カタログ・貸出操作のエラー
///
/// いずれも事前条件の違反で、対象のISBNを保持する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// 未登録のISBN
    #[error("Book with ISBN {0} not found")]
    BookNotFound(Isbn),

    /// 貸出中の書籍を貸し出そうとした
    #[error("Book with ISBN {0} is not available")]
    BookNotAvailable(Isbn),

    /// 登録済みのISBNで登録しようとした
    #[error("Book with ISBN {0} already exists")]
    DuplicateBook(Isbn),

    /// 貸出されていない書籍を返却しようとした
    #[error("Cannot return book with ISBN {0}: book was not borrowed or doesn't exist")]
    InvalidReturn(Isbn),

    /// 貸出中なのに未返却の貸出記録がない（内部不整合）
    #[error("Book with ISBN {0} is marked as borrowed but has no open borrow record")]
    MissingBorrowRecord(Isbn),
}

impl LibraryError {
    /// エラー対象のISBN
    pub fn isbn(&self) -> &Isbn {
        match self {
            LibraryError::BookNotFound(isbn)
            | LibraryError::BookNotAvailable(isbn)
            | LibraryError::DuplicateBook(isbn)
            | LibraryError::InvalidReturn(isbn)
            | LibraryError::MissingBorrowRecord(isbn) => isbn,
        }
    }
}

/// ドメイン層の Result型
pub type Result<T> = std::result::Result<T, LibraryError>;
