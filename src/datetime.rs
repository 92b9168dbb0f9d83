use chrono::{DateTime, Utc};

/// 現在のUTC時間を取得する。
///
/// 進行中のtime entryの経過時間計算に利用する。
/// テストビルドでは`mock_datetime`の固定時間に差し替わる。
#[cfg(not(test))]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// テスト時に現在時間を固定するためのモック。
#[cfg(test)]
pub mod mock_datetime {
    use std::cell::RefCell;

    use super::DateTime;
    use super::Utc;

    thread_local! {
        static FIXED_TIME: RefCell<Option<DateTime<Utc>>> = RefCell::new(None);
    }

    /// 固定時間が設定されていればその値を、なければ現在時間を返す。
    pub fn now() -> DateTime<Utc> {
        FIXED_TIME.with(|cell| cell.borrow().unwrap_or_else(Utc::now))
    }

    /// 現在時間を固定する。スレッドローカルのため並列テストでも干渉しない。
    pub fn fix(time: DateTime<Utc>) {
        FIXED_TIME.with(|cell| *cell.borrow_mut() = Some(time));
    }

    /// 固定した時間を解除する。
    pub fn reset() {
        FIXED_TIME.with(|cell| *cell.borrow_mut() = None);
    }
}

#[cfg(test)]
pub use mock_datetime::now;
