//! Derives the displayed list from the loaded items
//!
//! Nothing here mutates the collection: the view is recomputed from a shared
//! slice every time the sort key changes or a frame is drawn.

use chrono::{DateTime, Local, Utc};

use crate::feed::{Created, Item};
use crate::sort::SortKey;

/// Returns the displayable items ordered by `key`.
///
/// Items without their nested payload are left out. The sort is stable, so
/// ties keep the order they arrived in.
pub fn visible_items(items: &[Item], key: SortKey) -> Vec<&Item> {
    let mut visible: Vec<&Item> = items.iter().filter(|item| item.is_displayable()).collect();
    visible.sort_by(|a, b| key.compare(a, b));
    visible
}

/// Text shown for one row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: i64,
    pub kudos: String,
    pub level: String,
    pub created: String,
}

impl ItemSummary {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            kudos: format!("Kudos number: {}", item.kudos_count()),
            level: format!("Level: {}", item.level_label()),
            created: format!("Created: {}", format_created(&item.created)),
        }
    }
}

/// Formats a creation time as local date and time
pub fn format_created(created: &Created) -> String {
    match created.instant() {
        Some(instant) => format_local(instant),
        None => "unknown".to_string(),
    }
}

fn format_local(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%x %X").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ItemData;
    use serde_json::{json, Map, Value};

    fn item(id: i64, seconds: i64, kudos: usize, level: Option<&str>) -> Item {
        Item {
            id,
            created: Created::Timestamp {
                seconds,
                nanoseconds: 0,
            },
            kudos_full: vec![Value::Null; kudos],
            data: Some(ItemData {
                level: level.map(|l| json!(l)),
                ..Default::default()
            }),
            extra: Map::new(),
        }
    }

    fn hidden(id: i64) -> Item {
        Item {
            data: None,
            ..item(id, 0, 0, None)
        }
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_sort_by_created_newest_first() {
        let items = vec![item(1, 100, 0, None), item(2, 300, 0, None), item(3, 200, 0, None)];
        let sorted = visible_items(&items, SortKey::Created);
        let seconds: Vec<_> = sorted
            .iter()
            .map(|item| item.created.instant().unwrap().timestamp())
            .collect();
        assert_eq!(seconds, [300, 200, 100]);
    }

    #[test]
    fn test_sort_by_created_uses_nanoseconds() {
        let mut a = item(1, 100, 0, None);
        let mut b = item(2, 100, 0, None);
        a.created = Created::Timestamp {
            seconds: 100,
            nanoseconds: 10,
        };
        b.created = Created::Timestamp {
            seconds: 100,
            nanoseconds: 900_000_000,
        };
        let items = vec![a, b];
        assert_eq!(ids(&visible_items(&items, SortKey::Created)), [2, 1]);
    }

    #[test]
    fn test_sort_by_kudos_most_first() {
        let items = vec![item(1, 0, 0, None), item(2, 0, 5, None), item(3, 0, 2, None)];
        let sorted = visible_items(&items, SortKey::KudosCount);
        let counts: Vec<_> = sorted.iter().map(|item| item.kudos_count()).collect();
        assert_eq!(counts, [5, 2, 0]);
    }

    #[test]
    fn test_sort_by_level_highest_first() {
        let items = vec![
            item(1, 0, 0, Some("medium")),
            item(2, 0, 0, Some("advanced")),
            item(3, 0, 0, Some("newbie")),
            item(4, 0, 0, None),
        ];
        let sorted = visible_items(&items, SortKey::Level);
        let labels: Vec<_> = sorted.iter().map(|item| item.level_label()).collect();
        assert_eq!(labels, ["advanced", "medium", "newbie", "undefined"]);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let items = vec![
            item(1, 0, 1, Some("medium")),
            item(2, 0, 1, Some("medium")),
            item(3, 0, 1, Some("medium")),
        ];
        for key in SortKey::ALL {
            assert_eq!(ids(&visible_items(&items, key)), [1, 2, 3]);
        }
    }

    #[test]
    fn test_filter_excludes_only_missing_payload() {
        let items = vec![
            hidden(1),
            item(2, 10, 0, None),
            hidden(3),
            item(4, 20, 0, Some("newbie")),
        ];
        for key in SortKey::ALL {
            let visible = visible_items(&items, key);
            assert_eq!(visible.len(), 2);
            assert!(visible.iter().all(|item| item.is_displayable()));
        }
    }

    #[test]
    fn test_sorting_is_deterministic_and_non_mutating() {
        let items = vec![
            item(1, 50, 3, Some("newbie")),
            item(2, 10, 7, Some("advanced")),
            item(3, 30, 1, None),
            hidden(4),
        ];
        let before = items.clone();
        for key in SortKey::ALL {
            let first = ids(&visible_items(&items, key));
            let second = ids(&visible_items(&items, key));
            assert_eq!(first, second);
        }
        assert_eq!(items, before);
    }

    #[test]
    fn test_summary_text() {
        let summary = ItemSummary::from_item(&item(9, 0, 3, Some("medium")));
        assert_eq!(summary.id, 9);
        assert_eq!(summary.kudos, "Kudos number: 3");
        assert_eq!(summary.level, "Level: medium");
        assert!(summary.created.starts_with("Created: "));
    }

    #[test]
    fn test_format_created_uses_local_time() {
        let created = Created::Timestamp {
            seconds: 1_700_000_000,
            nanoseconds: 0,
        };
        let expected = DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%x %X")
            .to_string();
        assert_eq!(format_created(&created), expected);
    }

    #[test]
    fn test_format_unresolvable_created() {
        assert_eq!(format_created(&Created::Other(json!([1, 2]))), "unknown");
    }
}
