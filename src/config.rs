use std::env;

use anyhow::{Context, Result};

/// reportコマンドに必要な設定値。
///
/// WORKSPACE_IDとUSER_IDは`ids`サブコマンドで調べられる。
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub workspace_id: String,
    pub user_id: String,
}

impl Config {
    /// `.env`と環境変数から設定を読み込む。
    ///
    /// いずれかの値が欠けている場合はエラーを返す。ネットワークアクセスより前に呼び出すこと。
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_key: required_var("API_KEY")?,
            workspace_id: required_var("WORKSPACE_ID")?,
            user_id: required_var("USER_ID")?,
        })
    }
}

/// `ids`サブコマンド用にAPIキーのみを読み込む。
pub fn api_key_from_env() -> Result<String> {
    dotenvy::dotenv().ok();

    required_var("API_KEY")
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Please make sure {} is set in the .env file", name))
}
