use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::time_entry::TimeEntry;

/// 集計対象となった個々のentryの記録。
#[derive(Clone, Debug, PartialEq)]
pub struct Occurrence {
    pub start: NaiveDateTime,
    pub stop: Option<NaiveDateTime>,
    pub duration: f64,
}

/// 1つの(日付, task)に対する集計結果。
///
/// `occurrences`は入力順を保持する。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskAggregate {
    pub total_seconds: f64,
    pub occurrences: Vec<Occurrence>,
}

/// 日付 -> task -> 集計結果のマッピング。
///
/// 表示順を入力の初出順と一致させるため、挿入順を保持するIndexMapを利用する。
pub type DailyReport = IndexMap<NaiveDate, IndexMap<String, TaskAggregate>>;

/// 正規化済みのtime entry列を日付とtaskごとに集計する。
///
/// 入力順のみに依存する純粋な処理でソートは行わない。空の入力からは空のreportを返す。
pub fn aggregate(time_entries: &[TimeEntry]) -> DailyReport {
    time_entries
        .iter()
        .fold(IndexMap::new(), |mut report, entry| {
            let tasks = report.entry(entry.start.date()).or_default();
            let task = tasks.entry(entry.description.clone()).or_default();
            task.total_seconds += entry.duration;
            task.occurrences.push(Occurrence {
                start: entry.start,
                stop: entry.stop,
                duration: entry.duration,
            });
            report
        })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::aggregate;
    use crate::time_entry::TimeEntry;

    /// テスト用にTimeEntryを作成する。
    fn entry(description: &str, start: &str, duration: f64) -> TimeEntry {
        let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S").unwrap();
        TimeEntry {
            description: description.to_string(),
            start,
            stop: Some(start + chrono::Duration::seconds(duration as i64)),
            duration,
            raw_duration: None, // 集計では利用しない
        }
    }

    /// 空の入力からは空のreportが返る。
    #[test]
    fn test_aggregate_empty() {
        let report = aggregate(&[]);

        assert!(report.is_empty());
    }

    /// 同じ日の同じtaskは合算され、発生記録は入力順のまま保持される。
    #[test]
    fn test_aggregate_same_day_same_task() {
        let entries = vec![
            entry("task a", "2024-05-01T10:00:00", 3600.0),
            entry("task b", "2024-05-01T12:00:00", 600.0),
            entry("task a", "2024-05-01T14:00:00", 1800.0),
        ];

        let report = aggregate(&entries);

        assert_eq!(report.len(), 1);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let tasks = report.get(&date).unwrap();
        assert_eq!(tasks.len(), 2);

        let task_a = tasks.get("task a").unwrap();
        assert_eq!(task_a.total_seconds, 5400.0);
        assert_eq!(task_a.occurrences.len(), 2);
        assert_eq!(
            task_a.occurrences[0].start,
            NaiveDateTime::parse_from_str("2024-05-01T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
        );
        assert_eq!(
            task_a.occurrences[1].start,
            NaiveDateTime::parse_from_str("2024-05-01T14:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
        );

        let task_b = tasks.get("task b").unwrap();
        assert_eq!(task_b.total_seconds, 600.0);
        assert_eq!(task_b.occurrences.len(), 1);
    }

    /// 日付もtaskも初出順で保持される。ソートは行わない。
    #[test]
    fn test_aggregate_preserves_first_seen_order() {
        let entries = vec![
            entry("task b", "2024-05-02T10:00:00", 60.0),
            entry("task a", "2024-05-01T10:00:00", 60.0),
            entry("task c", "2024-05-02T12:00:00", 60.0),
        ];

        let report = aggregate(&entries);

        let dates: Vec<_> = report.keys().cloned().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            ]
        );
        let tasks: Vec<_> = report[&dates[0]].keys().cloned().collect();
        assert_eq!(tasks, vec!["task b".to_string(), "task c".to_string()]);
    }
}
