use serde::{Deserialize, Serialize};

use super::{BorrowerId, Isbn};

/// コマンド：書籍を貸し出す
///
/// 貸出日はアプリケーション層が時計ポートから設定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub isbn: Isbn,
    pub borrower_id: BorrowerId,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub isbn: Isbn,
}
