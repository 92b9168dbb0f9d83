use std::io::Write;

use anyhow::{Context, Result};

use crate::report::DailyReport;
use crate::time_entry::TimeEntry;

/// 進行中のentryの終了時刻として表示する文言。
pub const ONGOING: &str = "Ongoing";

const DATE_SEPARATOR: &str = "----------------------------------------";

/// Consoleにreportを表示するためのtrait。
pub trait ConsolePresenter {
    /// 正規化済みのtime entryを入力順に1件ずつ表示する。
    ///
    /// durationは解決済みの値ではなく、APIから渡された値をそのまま表示する。
    fn show_time_entries(&mut self, time_entries: &[TimeEntry]) -> Result<()>;

    /// 日付とtaskごとの集計結果を表示する。
    ///
    /// 空のreportでは何も出力しない。
    fn show_daily_report(&mut self, report: &DailyReport) -> Result<()>;
}

/// reportをMarkdownのlist形式で表示する。
pub struct ConsoleMarkdownReport<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleMarkdownReport<'a, W> {
    /// 新しい`ConsoleMarkdownReport`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleMarkdownReport<'a, W> {
    // time entryを入力順のまま1件ずつ表示する。
    fn show_time_entries(&mut self, time_entries: &[TimeEntry]) -> Result<()> {
        for (index, entry) in time_entries.iter().enumerate() {
            let stop_str = entry
                .stop
                .map(|stop| stop.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| ONGOING.to_string());
            writeln!(self.writer, "Task {}: {}", index + 1, entry.description)
                .with_context(|| format!("Failed to write time entry: {:?}", entry))?;
            writeln!(
                self.writer,
                "  {} ~ {} (duration: {})",
                entry.start.format("%Y-%m-%d %H:%M:%S"),
                stop_str,
                entry.raw_duration.as_deref().unwrap_or("-"),
            )
            .with_context(|| format!("Failed to write time entry: {:?}", entry))?;
        }

        Ok(())
    }

    // 日付ごと、taskごとの集計を初出順のまま表示する。時間は時間単位で小数2桁とする。
    fn show_daily_report(&mut self, report: &DailyReport) -> Result<()> {
        for (date, tasks) in report {
            writeln!(self.writer, "{}", DATE_SEPARATOR).context("Failed to write report")?;
            writeln!(self.writer, "## {}", date).context("Failed to write report")?;
            for (description, task) in tasks {
                writeln!(
                    self.writer,
                    "- {}: {:.2}",
                    description,
                    task.total_seconds / 3600.0
                )
                .context("Failed to write report")?;
                for occurrence in &task.occurrences {
                    let stop_str = occurrence
                        .stop
                        .map(|stop| stop.format("%H:%M:%S").to_string())
                        .unwrap_or_else(|| ONGOING.to_string());
                    writeln!(
                        self.writer,
                        "  - {} ~ {}: {:.2}",
                        occurrence.start.format("%H:%M:%S"),
                        stop_str,
                        occurrence.duration / 3600.0
                    )
                    .context("Failed to write report")?;
                }
            }
        }

        Ok(())
    }
}
