use std::fmt;

use log::info;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Clockify APIへのリクエストが失敗したことを表すエラー。
#[derive(Debug, Error)]
pub enum RemoteFetchError {
    /// APIが成功以外のステータスコードを返した。
    #[error("the Clockify API returned status {status}")]
    Status { status: StatusCode },
    /// 通信自体、またはレスポンスのデシリアライズに失敗した。
    #[error("failed to communicate with the Clockify API: {0}")]
    Transport(#[from] reqwest::Error),
}

/// time entryのduration。APIからは数値秒または文字列のどちらかで渡される。
///
/// Clockifyは"PT1H30M"のようなISO-8601のperiod文字列を返すことがあり、
/// その場合は整数秒として解釈できない値として扱う。
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(i64),
    Text(String),
}

impl RawDuration {
    /// 整数秒として解釈できる場合はその値を返す。
    pub fn as_seconds(&self) -> Option<i64> {
        match self {
            Self::Seconds(seconds) => Some(*seconds),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RawDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(seconds) => write!(f, "{}", seconds),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Clockify APIのtime entryをデシリアライズするための構造体。
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeEntry {
    pub description: Option<String>,
    pub time_interval: TimeInterval,
}

/// time entryの開始・終了・durationを保持する構造体。
///
/// endが無いentryは進行中を表す。startが無いentryは不正データとして正規化側で扱う。
#[derive(Clone, Debug, Deserialize)]
pub struct TimeInterval {
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<RawDuration>,
}

/// Clockify APIのuser情報をデシリアライズするための構造体。
#[derive(Clone, Debug, Deserialize)]
pub struct ClockifyUser {
    pub id: String,
}

/// Clockify APIのworkspace情報をデシリアライズするための構造体。
#[derive(Clone, Debug, Deserialize)]
pub struct ClockifyWorkspace {
    pub id: String,
    pub name: String,
}

/// Clockify APIと通信するためのリポジトリを表すtrait。
#[cfg_attr(test, mockall::automock)]
pub trait ClockifyRepository {
    /// 指定したworkspaceとuserのtime entry一覧を取得する。
    async fn read_time_entries(
        &self,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<Vec<RawTimeEntry>, RemoteFetchError>;

    /// 認証済みuser自身の情報を取得する。
    async fn read_current_user(&self) -> Result<ClockifyUser, RemoteFetchError>;

    /// APIキーから見えるworkspaceの一覧を取得する。
    async fn read_workspaces(&self) -> Result<Vec<ClockifyWorkspace>, RemoteFetchError>;
}

/// Clockify APIと通信するためのクライアント。
///
/// # Examples
///
/// ```
/// let client = ClockifyClient::new(api_key);
/// let time_entries = client.read_time_entries(&workspace_id, &user_id).await?;
/// ```
pub struct ClockifyClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ClockifyClient {
    /// 新しい`ClockifyClient`を返す。
    pub fn new(api_key: String) -> Self {
        Self::with_api_url("https://api.clockify.me/api/v1".to_string(), api_key)
    }

    /// API URLを指定して`ClockifyClient`を返す。テストでモックサーバーを利用するために分けている。
    pub fn with_api_url(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// 指定したパスへGETリクエストを送り、JSONレスポンスをデシリアライズする。
    ///
    /// 成功以外のステータスコードはボディを読まずに`RemoteFetchError::Status`として返す。
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteFetchError> {
        let response = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .header("X-Api-Key", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::Status { status });
        }

        Ok(response.json::<T>().await?)
    }
}

impl ClockifyRepository for ClockifyClient {
    async fn read_time_entries(
        &self,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<Vec<RawTimeEntry>, RemoteFetchError> {
        let time_entries: Vec<RawTimeEntry> = self
            .get_json(&format!(
                "/workspaces/{}/user/{}/time-entries",
                workspace_id, user_id
            ))
            .await?;
        info!("length of time entries: {}", time_entries.len());

        Ok(time_entries)
    }

    async fn read_current_user(&self) -> Result<ClockifyUser, RemoteFetchError> {
        self.get_json("/user").await
    }

    async fn read_workspaces(&self) -> Result<Vec<ClockifyWorkspace>, RemoteFetchError> {
        self.get_json("/workspaces").await
    }
}
