use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;

use crate::clockify::{ClockifyRepository, DEFAULT_SORT_COLUMN};
use crate::datetime;
use crate::report::{aggregate, AggregatedGroup};

/// 1日分のタイムエントリーをタグごとに集計するためのサブコマンド。
#[derive(Debug, clap::Args)]
pub struct DailyArgs {
    #[clap(
        short = 'd',
        long = "date",
        help = "Sets a custom date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    date: Option<NaiveDate>,

    #[clap(
        long = "sort-column",
        help = "Sort column of the detailed report request",
        default_value = DEFAULT_SORT_COLUMN,
    )]
    sort_column: String,
}

pub struct DailyCommand<'a, T: ClockifyRepository> {
    clockify_client: &'a T,
}

impl<'a, T: ClockifyRepository> DailyCommand<'a, T> {
    /// 新しい`DailyCommand`を返す。
    ///
    /// # Arguments
    /// * `clockify_client` - Clockify APIと通信するためのリポジトリ
    pub fn new(clockify_client: &'a T) -> Self {
        Self { clockify_client }
    }

    /// `daily`サブコマンドの処理を行う。
    ///
    /// 指定された日付のタイムエントリーを取得し、タグごとに集計する。
    /// 日付が指定されていない場合は、Localタイムゾーンで今日の日付を利用する。
    ///
    /// # Arguments
    ///
    /// * `daily` - `daily`サブコマンドの引数
    pub async fn run(&self, daily: DailyArgs) -> Result<Vec<AggregatedGroup>> {
        let date = daily.date.unwrap_or_else(datetime::today);
        info!("Target date: {}", date);

        let time_entries = self
            .clockify_client
            .read_time_entries(date, &daily.sort_column)
            .await
            .with_context(|| format!("Failed to retrieve time entries for {}", date))?;
        info!("Time entries retrieved successfully.");

        Ok(aggregate(&time_entries))
    }
}

/// 日付をパースする。
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Failed to parse date: {}", s))
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    use super::{parse_date, DailyArgs, DailyCommand};
    use crate::clockify::MockClockifyRepository;
    use crate::datetime::mock_datetime;
    use crate::report::{AggregatedGroup, AggregatedItem};
    use crate::time_entry::TimeEntry;

    fn args(date: Option<NaiveDate>) -> DailyArgs {
        DailyArgs {
            date,
            sort_column: "DATE".to_string(),
        }
    }

    #[tokio::test]
    async fn test_daily_command_no_date() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        mock_datetime::set_mock_today(today);
        let mut clockify = MockClockifyRepository::new();
        clockify
            .expect_read_time_entries()
            .withf(move |date, _| *date == today)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let command = DailyCommand::new(&clockify);
        let result = command.run(args(None)).await;
        mock_datetime::clear_mock_today();

        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    #[rstest]
    #[case(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())]
    #[case(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())]
    async fn test_daily_command_with_date(#[case] target: NaiveDate) {
        let mut clockify = MockClockifyRepository::new();
        clockify
            .expect_read_time_entries()
            .withf(move |date, sort_column| *date == target && sort_column.to_string() == "DATE")
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let command = DailyCommand::new(&clockify);
        let result = command.run(args(Some(target))).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_daily_command_aggregates_entries() {
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let entries = vec![
            TimeEntry {
                description: "Design".to_string(),
                tags: vec!["Dev".to_string()],
                start,
                duration: 1800,
            },
            TimeEntry {
                description: "Design".to_string(),
                tags: vec!["Dev".to_string(), "Review".to_string()],
                start: start + chrono::Duration::minutes(10),
                duration: 1800,
            },
            TimeEntry {
                description: "lunch".to_string(),
                tags: vec![],
                start,
                duration: 3600,
            },
        ];
        let mut clockify = MockClockifyRepository::new();
        clockify
            .expect_read_time_entries()
            .times(1)
            .returning(move |_, _| Ok(entries.clone()));

        let command = DailyCommand::new(&clockify);
        let groups = command
            .run(args(Some(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())))
            .await
            .unwrap();

        assert_eq!(
            groups,
            vec![AggregatedGroup {
                label: "Dev".to_string(),
                start,
                items: vec![AggregatedItem {
                    description: "Design".to_string(),
                    start,
                    duration: 3600,
                }],
            }]
        );
    }

    #[tokio::test]
    async fn test_daily_command_fetch_error() {
        let mut clockify = MockClockifyRepository::new();
        clockify
            .expect_read_time_entries()
            .times(1)
            .returning(|_, _| Err(anyhow!("connection refused")));

        let command = DailyCommand::new(&clockify);
        let result = command.run(args(None)).await;

        assert!(result.is_err());
    }

    #[rstest]
    #[case::valid("2024-04-01", true)]
    #[case::invalid_format("2024/04/01", false)]
    #[case::invalid_date("2024-02-30", false)]
    fn test_parse_date(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(parse_date(input).is_ok(), ok);
    }
}
