use chrono::{DateTime, Utc};

/// 集計対象となる1件のタイムエントリー。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeEntry {
    /// 作業内容。空文字列も許容する。
    pub description: String,
    /// エントリーに付与されたタグ名。先頭のタグが集計のキーになる。
    pub tags: Vec<String>,
    pub start: DateTime<Utc>,
    /// 経過時間(秒)。
    pub duration: u64,
}

impl TimeEntry {
    /// 集計に利用する先頭のタグを返す。タグがない場合は`None`。
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}
