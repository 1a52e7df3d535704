use serde::{Deserialize, Serialize};

use super::Isbn;

/// 書籍の登録データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// 書籍の貸出状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// 貸出可能
    Available,
    /// 貸出中
    Borrowed,
}

impl BookStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

/// 書籍 - カタログの1冊
///
/// 書誌情報は登録後に変わらない。`available`は貸出・返却の遷移でのみ変化する。
/// 遷移の事前条件（貸出中でないこと等）はこの層では検査しない。
/// 呼び出し側（`Library`）の責務。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    year: i32,
    available: bool,
}

impl Book {
    /// 登録データから書籍を作成する（初期状態は貸出可能）
    pub fn new(data: NewBook) -> Self {
        Self {
            isbn: data.isbn,
            title: data.title,
            author: data.author,
            year: data.year,
            available: true,
        }
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn status(&self) -> BookStatus {
        if self.available {
            BookStatus::Available
        } else {
            BookStatus::Borrowed
        }
    }

    /// 貸出中にする
    pub fn mark_as_borrowed(&mut self) {
        self.available = false;
    }

    /// 貸出可能に戻す
    pub fn mark_as_returned(&mut self) {
        self.available = true;
    }

    /// 検索語（小文字化済み）がタイトル・著者・ISBNのいずれかに含まれるか
    pub(super) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.isbn.value().to_lowercase().contains(needle)
    }
}
