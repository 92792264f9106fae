use chrono::NaiveDate;

#[cfg(not(test))]
/// Localタイムゾーンでの今日の日付を取得する。
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}


#[cfg(test)]
pub use mock_datetime::today;

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};

    use super::mock_datetime;

    /// 何も設定しない場合は、今日の日付が取得できることを確認する。
    ///
    ///  - 日付が変わる瞬間に実行すると失敗する可能性がある。
    #[test]
    fn test_today() {
        assert_eq!(mock_datetime::today(), Local::now().date_naive());
    }

    #[test]
    fn test_today_specific_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        mock_datetime::set_mock_today(date);

        assert_eq!(mock_datetime::today(), date);
    }

    #[test]
    fn test_today_after_clear() {
        mock_datetime::set_mock_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        mock_datetime::clear_mock_today();

        assert_eq!(mock_datetime::today(), Local::now().date_naive());
    }
}
