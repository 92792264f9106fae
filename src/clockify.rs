use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
#[cfg(test)]
use mockall::automock;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};

use crate::config::ClockifyConfig;
use crate::time_entry::TimeEntry;

/// 1回のリクエストで取得するタイムエントリーの最大数。
const PAGE_SIZE: u32 = 100;
/// 詳細レポートのデフォルトの並び替え列。APIの列挙値は大文字で定義されている。
pub const DEFAULT_SORT_COLUMN: &str = "DATE";

/// タイムエントリーを取得するためのリポジトリ。
#[cfg_attr(test, automock)]
pub trait ClockifyRepository {
    /// 指定された日のタイムエントリーを取得する。
    ///
    /// # Arguments
    ///
    /// * `date` - 取得する日付
    /// * `sort_column` - 詳細レポートの並び替え列
    async fn read_time_entries(&self, date: NaiveDate, sort_column: &str)
        -> Result<Vec<TimeEntry>>;
}

/// 詳細レポートAPIのリクエストボディ。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailedReportRequest<'a> {
    date_range_start: String,
    date_range_end: String,
    detailed_filter: DetailedFilter<'a>,
    sort_order: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailedFilter<'a> {
    page: u32,
    page_size: u32,
    sort_column: &'a str,
}

/// 詳細レポートAPIのレスポンスをデシリアライズするための構造体。
#[derive(Debug, Deserialize)]
struct DetailedReport {
    #[serde(default, rename = "timeentries")]
    time_entries: Option<Vec<ClockifyTimeEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClockifyTimeEntry {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Option<Vec<ClockifyTag>>,
    time_interval: ClockifyTimeInterval,
}

#[derive(Debug, Deserialize)]
struct ClockifyTag {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClockifyTimeInterval {
    start: DateTime<Utc>,
    #[serde(default)]
    duration: Option<i64>,
}

impl From<ClockifyTimeEntry> for TimeEntry {
    fn from(entry: ClockifyTimeEntry) -> Self {
        Self {
            description: entry.description.unwrap_or_default(),
            tags: entry
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|tag| tag.name.unwrap_or_default())
                .collect(),
            start: entry.time_interval.start,
            duration: entry
                .time_interval
                .duration
                .map(|duration| duration.max(0) as u64)
                .unwrap_or_default(),
        }
    }
}

/// Clockifyの詳細レポートAPIと通信するためのクライアント。
///
/// # Examples
///
/// ```
/// let config = ClockifyConfig::from_env()?;
/// let client = ClockifyClient::new(&config)?;
/// let time_entries = client.read_time_entries(date, "DATE").await?;
/// ```
pub struct ClockifyClient {
    client: Client,
    reports_url: String,
    access_token: String,
    workspace_id: String,
}

impl ClockifyClient {
    /// 新しい`ClockifyClient`を返す。
    pub fn new(config: &ClockifyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            reports_url: config.reports_url.clone(),
            access_token: config.access_token.clone(),
            workspace_id: config.workspace_id.clone(),
        })
    }

    fn detailed_report_url(&self) -> String {
        format!(
            "{}/workspaces/{}/reports/detailed",
            self.reports_url, self.workspace_id
        )
    }
}

impl ClockifyRepository for ClockifyClient {
    async fn read_time_entries(
        &self,
        date: NaiveDate,
        sort_column: &str,
    ) -> Result<Vec<TimeEntry>> {
        let day = date.format("%Y-%m-%d");
        let body = DetailedReportRequest {
            date_range_start: format!("{}T00:00:00.000", day),
            date_range_end: format!("{}T23:59:59.999", day),
            detailed_filter: DetailedFilter {
                page: 1,
                page_size: PAGE_SIZE,
                sort_column,
            },
            sort_order: "ASCENDING",
        };
        info!(
            "Request detailed report: {} ~ {}",
            body.date_range_start, body.date_range_end
        );

        let url = self.detailed_report_url();
        let report = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.access_token)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Clockify API at {}", url))?
            .error_for_status()
            .context("Request returned an error status")?
            .json::<DetailedReport>()
            .await
            .context("Failed to deserialize response")?;

        let time_entries: Vec<TimeEntry> = report
            .time_entries
            .unwrap_or_default()
            .into_iter()
            .map(TimeEntry::from)
            .collect();
        info!("length of time entries: {}", time_entries.len());

        Ok(time_entries)
    }
}
