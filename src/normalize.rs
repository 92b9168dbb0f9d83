use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::clockify::RawTimeEntry;
use crate::datetime;
use crate::time_entry::TimeEntry;

/// descriptionを持たないentryに割り当てる文言。
pub const NO_DESCRIPTION: &str = "No description";

/// タイムスタンプが解釈できないtime entryを表すエラー。
#[derive(Debug, Error, PartialEq)]
pub enum MalformedEntryError {
    #[error("time entry has no start timestamp")]
    MissingStart,
    #[error("failed to parse start timestamp: {0}")]
    InvalidStart(String),
    #[error("failed to parse end timestamp: {0}")]
    InvalidEnd(String),
}

/// APIのtime entryを内部表現へ正規化するための構造体。
///
/// 表示用タイムゾーンはコンストラクタで受け取る。プロセス全体の暗黙の設定は持たない。
pub struct Normalizer {
    zone: Tz,
}

impl Normalizer {
    /// 新しい`Normalizer`を返す。
    ///
    /// # Arguments
    ///
    /// * `zone` - 表示用タイムゾーン
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// 1件のtime entryを正規化する。
    ///
    /// - descriptionが無い、または空の場合は`NO_DESCRIPTION`を割り当てる。
    /// - タイムスタンプはUTCとして解釈し、表示用タイムゾーンの壁時計時刻へ変換して保持する。
    /// - durationは整数秒として解釈できる値が渡されていればそれを優先し、
    ///   なければendとstartの差を利用する。進行中のentryはendの代わりに現在時刻を利用する。
    ///   endがstartより前の場合は負値のまま保持する。
    pub fn normalize(&self, raw: &RawTimeEntry) -> Result<TimeEntry, MalformedEntryError> {
        let description = raw
            .description
            .as_deref()
            .filter(|description| !description.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        let start_text = raw
            .time_interval
            .start
            .as_deref()
            .ok_or(MalformedEntryError::MissingStart)?;
        let start = parse_instant(start_text)
            .ok_or_else(|| MalformedEntryError::InvalidStart(start_text.to_string()))?;
        let stop = match raw.time_interval.end.as_deref() {
            Some(end_text) => Some(
                parse_instant(end_text)
                    .ok_or_else(|| MalformedEntryError::InvalidEnd(end_text.to_string()))?,
            ),
            None => None,
        };

        let explicit_seconds = raw
            .time_interval
            .duration
            .as_ref()
            .and_then(|duration| duration.as_seconds());
        let duration = match explicit_seconds {
            Some(seconds) => seconds as f64,
            None => {
                // 進行中のentryは現在時刻までの経過時間とする。
                let resolved_stop = stop.unwrap_or_else(datetime::now);
                (resolved_stop - start).num_milliseconds() as f64 / 1000.0
            }
        };

        Ok(TimeEntry {
            description,
            start: self.to_wall_clock(start),
            stop: stop.map(|stop| self.to_wall_clock(stop)),
            duration,
            raw_duration: raw
                .time_interval
                .duration
                .as_ref()
                .map(|duration| duration.to_string()),
        })
    }

    /// UTCのinstantを表示用タイムゾーンの壁時計時刻へ変換する。
    fn to_wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.zone).naive_local()
    }
}

/// タイムスタンプをUTCのinstantとして解釈する。
///
/// Clockifyは"2024-05-01T10:00:00Z"形式を返す。末尾のゾーン記号は文字に関わらずUTCとして扱う。
fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
