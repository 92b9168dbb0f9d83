use anyhow::{Context, Result};
use chrono_tz::Tz;
use log::{info, warn};

use crate::clockify::ClockifyRepository;
use crate::config::Config;
use crate::console::ConsolePresenter;
use crate::normalize::Normalizer;
use crate::report::aggregate;
use crate::time_entry::TimeEntry;

/// reportを表示する際のタイムゾーン(東欧時間)。
pub const DISPLAY_ZONE: Tz = chrono_tz::Europe::Kyiv;

/// 日付とtaskごとの集計を出力するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct ReportArgs {
    #[clap(
        long = "details",
        help = "Show the raw entry listing before the grouped report"
    )]
    details: bool,
}

pub struct ReportCommand<'a, T: ClockifyRepository> {
    clockify_client: &'a T,
    zone: Tz,
}

impl<'a, T: ClockifyRepository> ReportCommand<'a, T> {
    /// 新しい`ReportCommand`を返す。
    ///
    /// # Arguments
    /// * `clockify_client` - Clockify APIと通信するためのリポジトリ
    /// * `zone` - 表示用タイムゾーン
    pub fn new(clockify_client: &'a T, zone: Tz) -> Self {
        Self {
            clockify_client,
            zone,
        }
    }

    /// `report`サブコマンドの処理を行う。
    ///
    /// time entryを全件取得して正規化し、日付とtaskごとの集計をpresenterへ渡す。
    /// startが解釈できないentryは警告を出してスキップする。entryが1件も無い場合は何も出力しない。
    ///
    /// # Arguments
    ///
    /// * `args` - `report`サブコマンドの引数
    /// * `config` - workspaceとuserの識別子を含む設定値
    /// * `presenter` - reportの出力先
    pub async fn run(
        &self,
        args: ReportArgs,
        config: &Config,
        presenter: &mut impl ConsolePresenter,
    ) -> Result<()> {
        let raw_entries = self
            .clockify_client
            .read_time_entries(&config.workspace_id, &config.user_id)
            .await
            .context("Failed to fetch time entries")?;
        info!("Time entries retrieved successfully.");

        let normalizer = Normalizer::new(self.zone);
        let mut time_entries: Vec<TimeEntry> = Vec::with_capacity(raw_entries.len());
        for raw_entry in &raw_entries {
            match normalizer.normalize(raw_entry) {
                Ok(entry) => time_entries.push(entry),
                Err(err) => warn!("skipping malformed time entry: {}", err),
            }
        }

        if args.details {
            presenter
                .show_time_entries(&time_entries)
                .context("Failed to render time entries")?;
        }
        presenter
            .show_daily_report(&aggregate(&time_entries))
            .context("Failed to render daily report")?;

        Ok(())
    }
}
