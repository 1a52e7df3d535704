use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BorrowRecordId, BorrowerId, Isbn};

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// 書籍はISBNで参照するのみ（所有しない）。
/// 返却日が未設定の記録を「未返却の記録」と呼ぶ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub record_id: BorrowRecordId,
    pub isbn: Isbn,
    pub borrower_id: BorrowerId,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    /// 未返却の貸出記録を作成する
    pub fn open(isbn: Isbn, borrower_id: BorrowerId, borrow_date: DateTime<Utc>) -> Self {
        Self {
            record_id: BorrowRecordId::new(),
            isbn,
            borrower_id,
            borrow_date,
            return_date: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// 返却日を記録する
    pub fn close(&mut self, returned_at: DateTime<Utc>) {
        self.return_date = Some(returned_at);
    }
}
