#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rusty_library_catalog::adapters::mock::Clock as MockClock;
use rusty_library_catalog::application::lending::ServiceDependencies;
use rusty_library_catalog::domain::{Isbn, NewBook};
use std::sync::Arc;

/// テストの基準時刻
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap()
}

/// 書籍の登録データを作成
pub fn new_book(isbn: &str, title: &str, author: &str, year: i32) -> NewBook {
    NewBook {
        isbn: Isbn::from(isbn),
        title: title.to_string(),
        author: author.to_string(),
        year,
    }
}

pub fn clean_code() -> NewBook {
    new_book("1234", "Clean Code", "Robert C. Martin", 2008)
}

pub fn the_secret() -> NewBook {
    new_book("1001", "The Secret", "Om Panchwate", 2024)
}

pub fn life_amazing_secret() -> NewBook {
    new_book("1002", "Life Amazing Secret", "Gaur Gopal Das", 2022)
}

/// モック時計付きの依存関係を作成
///
/// 時計はテスト側から進められるように返す。
pub fn setup_deps() -> (ServiceDependencies, Arc<MockClock>) {
    let clock = Arc::new(MockClock::new(epoch()));
    let deps = ServiceDependencies::new(clock.clone());
    (deps, clock)
}
