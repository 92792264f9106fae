use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::time_entry::TimeEntry;

/// タグごとに集約されたタイムエントリー。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedGroup {
    /// タグ名。
    pub label: String,
    /// このタグで最初に現れたエントリーの開始時刻。グループの並び替えにのみ使う。
    pub start: DateTime<Utc>,
    pub items: Vec<AggregatedItem>,
}

/// 同じ作業内容をまとめた1項目。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatedItem {
    pub description: String,
    /// 同じ作業内容で最初に現れたエントリーの開始時刻。後からマージされたエントリーでは更新しない。
    pub start: DateTime<Utc>,
    /// 合計時間(秒)。
    pub duration: u64,
}

/// 集計途中のグループ。作業内容から`items`の位置を引けるようにしておく。
struct GroupBuilder {
    label: String,
    start: DateTime<Utc>,
    items: Vec<AggregatedItem>,
    item_index: HashMap<String, usize>,
}

impl GroupBuilder {
    fn new(label: &str, start: DateTime<Utc>) -> Self {
        Self {
            label: label.to_string(),
            start,
            items: Vec::new(),
            item_index: HashMap::new(),
        }
    }

    fn merge(&mut self, entry: &TimeEntry) {
        match self.item_index.get(&entry.description) {
            Some(&index) => self.items[index].duration += entry.duration,
            None => {
                self.item_index.insert(entry.description.clone(), self.items.len());
                self.items.push(AggregatedItem {
                    description: entry.description.clone(),
                    start: entry.start,
                    duration: entry.duration,
                });
            }
        }
    }

    fn build(self) -> AggregatedGroup {
        let mut items = self.items;
        items.sort_by_key(|item| item.start);

        AggregatedGroup {
            label: self.label,
            start: self.start,
            items,
        }
    }
}

/// タイムエントリーを先頭のタグごとにまとめ、同じ作業内容の時間を合算する。
///
/// - タグを持たないエントリーは集計対象外とする。
/// - グループはそのタグで最初に現れたエントリーの開始時刻順、
///   グループ内の項目は作業内容ごとに最初に現れたエントリーの開始時刻順に並べる。
/// - 開始時刻が同じ場合は入力順を保つ。
///
/// # Arguments
///
/// * `time_entries` - 集計するタイムエントリー。並び順は問わない。
pub fn aggregate(time_entries: &[TimeEntry]) -> Vec<AggregatedGroup> {
    let (mut builders, _) = time_entries.iter().fold(
        (Vec::<GroupBuilder>::new(), HashMap::<String, usize>::new()),
        |(mut builders, mut group_index), entry| {
            let Some(tag) = entry.primary_tag() else {
                return (builders, group_index);
            };

            let index = *group_index.entry(tag.to_string()).or_insert_with(|| {
                builders.push(GroupBuilder::new(tag, entry.start));
                builders.len() - 1
            });
            builders[index].merge(entry);
            (builders, group_index)
        },
    );
    builders.sort_by_key(|builder| builder.start);

    let groups: Vec<AggregatedGroup> = builders.into_iter().map(GroupBuilder::build).collect();
    debug!(
        "aggregated {} time entries into {} groups",
        time_entries.len(),
        groups.len()
    );

    groups
}
