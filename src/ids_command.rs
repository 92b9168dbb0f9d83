use std::io::Write;

use anyhow::{Context, Result};

use crate::clockify::ClockifyRepository;

/// USER_IDとWORKSPACE_IDを調べて表示するためのサブコマンド。
///
/// `.env`の設定値を揃えるための補助コマンドで、APIキーのみで動作する。
#[derive(Debug, clap::Args)]
pub struct IdsArgs {}

pub struct IdsCommand<'a, T: ClockifyRepository> {
    clockify_client: &'a T,
}

impl<'a, T: ClockifyRepository> IdsCommand<'a, T> {
    /// 新しい`IdsCommand`を返す。
    pub fn new(clockify_client: &'a T) -> Self {
        Self { clockify_client }
    }

    /// `ids`サブコマンドの処理を行う。
    ///
    /// 認証済みuserのidと、APIキーから見えるworkspaceの一覧を表示する。
    pub async fn run(&self, writer: &mut impl Write) -> Result<()> {
        let user = self
            .clockify_client
            .read_current_user()
            .await
            .context("Failed to fetch user info")?;
        writeln!(writer, "USER_ID: {}", user.id).context("Failed to write user id")?;

        let workspaces = self
            .clockify_client
            .read_workspaces()
            .await
            .context("Failed to fetch workspaces")?;
        for workspace in workspaces {
            writeln!(
                writer,
                "Workspace Name: {}, WORKSPACE_ID: {}",
                workspace.name, workspace.id
            )
            .with_context(|| format!("Failed to write workspace: {}", workspace.id))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::IdsCommand;
    use crate::clockify::{
        ClockifyUser, ClockifyWorkspace, MockClockifyRepository, RemoteFetchError,
    };

    /// user idとworkspace一覧が表示されることを確認する。
    #[tokio::test]
    async fn test_ids_command() {
        let mut clockify = MockClockifyRepository::new();
        clockify.expect_read_current_user().times(1).returning(|| {
            Ok(ClockifyUser {
                id: "user1".to_string(),
            })
        });
        clockify.expect_read_workspaces().times(1).returning(|| {
            Ok(vec![
                ClockifyWorkspace {
                    id: "ws1".to_string(),
                    name: "workspace one".to_string(),
                },
                ClockifyWorkspace {
                    id: "ws2".to_string(),
                    name: "workspace two".to_string(),
                },
            ])
        });
        let mut writer = Vec::new();

        let command = IdsCommand::new(&clockify);
        command.run(&mut writer).await.unwrap();

        let expected = "\
USER_ID: user1
Workspace Name: workspace one, WORKSPACE_ID: ws1
Workspace Name: workspace two, WORKSPACE_ID: ws2
";
        assert_eq!(String::from_utf8(writer).unwrap(), expected);
    }

    /// user情報の取得に失敗した場合はworkspaceを取得せずエラーを返す。
    #[tokio::test]
    async fn test_ids_command_user_fetch_error() {
        let mut clockify = MockClockifyRepository::new();
        clockify.expect_read_current_user().times(1).returning(|| {
            Err(RemoteFetchError::Status {
                status: StatusCode::FORBIDDEN,
            })
        });
        clockify.expect_read_workspaces().times(0);
        let mut writer = Vec::new();

        let command = IdsCommand::new(&clockify);
        let result = command.run(&mut writer).await;

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to fetch user info"));
        assert_eq!(String::from_utf8(writer).unwrap(), "");
    }
}
