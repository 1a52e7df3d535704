use chrono::{DateTime, Utc};

/// 時計ポート
///
/// 貸出日・返却日の「現在時刻」を供給する。
/// ドメイン層は日時を引数で受け取るため、アプリケーション層がこのポート経由で取得する。
pub trait Clock: Send + Sync {
    /// 現在時刻
    fn now(&self) -> DateTime<Utc>;
}
