use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Clockifyの詳細レポートAPIのベースURL。
pub const DEFAULT_REPORTS_URL: &str = "https://reports.api.clockify.me/v1";
/// APIリクエストのタイムアウト(秒)。
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Clockify APIと通信するための設定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockifyConfig {
    pub access_token: String,
    pub workspace_id: String,
    pub reports_url: String,
    pub timeout: Duration,
}

impl ClockifyConfig {
    /// 環境変数から設定を読み込む。
    ///
    /// - `CLOCKIFY_ACCESS_TOKEN`: 必須
    /// - `CLOCKIFY_WORKSPACE_ID`: 必須
    /// - `CLOCKIFY_REPORTS_URL`: 省略時は`DEFAULT_REPORTS_URL`
    /// - `CLOCKIFY_TIMEOUT_SECS`: 省略時は`DEFAULT_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の取得関数から設定を読み込む。
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token =
            lookup("CLOCKIFY_ACCESS_TOKEN").context("CLOCKIFY_ACCESS_TOKEN must be set")?;
        let workspace_id =
            lookup("CLOCKIFY_WORKSPACE_ID").context("CLOCKIFY_WORKSPACE_ID must be set")?;
        let reports_url =
            lookup("CLOCKIFY_REPORTS_URL").unwrap_or_else(|| DEFAULT_REPORTS_URL.to_string());
        let timeout_secs = match lookup("CLOCKIFY_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .with_context(|| format!("Failed to parse CLOCKIFY_TIMEOUT_SECS: {}", value))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            access_token,
            workspace_id,
            reports_url: reports_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
