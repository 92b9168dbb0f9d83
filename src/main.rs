use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod clockify;
mod config;
mod console;
mod datetime;
mod ids_command;
mod logger;
mod normalize;
mod report;
mod report_command;
mod time_entry;

use clockify::ClockifyClient;
use console::ConsoleMarkdownReport;
use ids_command::{IdsArgs, IdsCommand};
use report_command::{ReportArgs, ReportCommand, DISPLAY_ZONE};

/// Clockifyのtime entryからreportを作成するためのCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- report
/// $ cargo run -- ids
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    Report(ReportArgs),
    Ids(IdsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init()?;

    // 設定エラーのみ異常終了とし、取得失敗はメッセージを表示して正常終了する。
    match args.subcommand {
        SubCommands::Report(report) => {
            let config = config::Config::from_env()?;
            let client = ClockifyClient::new(config.api_key.clone());
            let command = ReportCommand::new(&client, DISPLAY_ZONE);
            let mut stdout = io::stdout();
            let mut presenter = ConsoleMarkdownReport::new(&mut stdout);
            if let Err(err) = command.run(report, &config, &mut presenter).await {
                println!("{:#}", err);
            }
        }
        SubCommands::Ids(_) => {
            let api_key = config::api_key_from_env()?;
            let client = ClockifyClient::new(api_key);
            let command = IdsCommand::new(&client);
            if let Err(err) = command.run(&mut io::stdout()).await {
                println!("{:#}", err);
            }
        }
    }

    Ok(())
}
