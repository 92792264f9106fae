use std::io::Write;

use anyhow::{Context, Result};

use crate::report::AggregatedGroup;

/// Consoleに集計結果を表示するためのtrait。
pub trait ReportPresenter {
    /// タグごとの集計結果を表示する。
    ///
    /// # Arguments
    ///
    /// * `groups` - 表示する集計結果。与えられた順に表示する。
    fn show_report(&mut self, groups: &[AggregatedGroup]) -> Result<()>;
}

/// 集計結果をタグの見出しと時間付きの項目で表示する。
///
/// ```text
/// 【Dev】
///  └1.0 h Design
/// ```
pub struct ConsoleTagReport<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleTagReport<'a, W> {
    /// 新しい`ConsoleTagReport`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ReportPresenter for ConsoleTagReport<'a, W> {
    fn show_report(&mut self, groups: &[AggregatedGroup]) -> Result<()> {
        for line in render_lines(groups) {
            writeln!(self.writer, "{}", line)
                .with_context(|| format!("Failed to write report line: {}", line))?;
        }

        Ok(())
    }
}

/// 集計結果を表示用の行に変換する。
pub fn render_lines(groups: &[AggregatedGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| {
            std::iter::once(format!("【{}】", group.label)).chain(group.items.iter().map(|item| {
                format!(" └{} h {}", format_hours(item.duration), item.description)
            }))
        })
        .collect()
}

/// 秒を小数点以下1桁の時間表記にする。
///
/// 浮動小数点の丸めを避けるため0.1時間(360秒)単位の整数で計算し、半分以上は切り上げる。
pub fn format_hours(seconds: u64) -> String {
    let tenths = (seconds.saturating_mul(10).saturating_add(1800)) / 3600;
    format!("{}.{}", tenths / 10, tenths % 10)
}
