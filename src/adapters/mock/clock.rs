use crate::ports::clock::Clock as ClockTrait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Clockのモック実装
///
/// 固定時刻を返す。`advance`で時刻を進められるので、
/// 貸出日・返却日を検証するテストで使う。
#[derive(Debug)]
pub struct Clock {
    now: Mutex<DateTime<Utc>>,
}

impl Clock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// テスト用に時刻を進める
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    /// テスト用に時刻を設定する
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap() = at;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ClockTrait for Clock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
