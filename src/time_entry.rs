use chrono::NaiveDateTime;

/// 正規化済みのtime entryを表す構造体。
///
/// `start`と`stop`は表示用タイムゾーンの壁時計時刻として保持する。
/// `stop`が`None`の場合は進行中のentryを表す。
/// `duration`は秒単位で常に解決済みの値を持つ(負値もそのまま保持する)。
/// `raw_duration`はAPIから渡された値をそのまま保持し、詳細表示でのみ利用する。
#[derive(Clone, Debug, PartialEq)]
pub struct TimeEntry {
    pub description: String,
    pub start: NaiveDateTime,
    pub stop: Option<NaiveDateTime>,
    pub duration: f64,
    pub raw_duration: Option<String>,
}
