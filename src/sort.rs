//! Sort keys and the comparator used to order the feed
//!
//! Every key sorts descending ("more is better"): newest first, most kudos
//! first, highest skill level first.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::feed::Item;

/// Field currently selected to order the displayed list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Created,
    KudosCount,
    Level,
}

impl SortKey {
    /// All keys in selector order
    pub const ALL: [SortKey; 3] = [SortKey::Created, SortKey::KudosCount, SortKey::Level];

    /// Label shown in the sort selector
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Created => "Created",
            SortKey::KudosCount => "Kudos",
            SortKey::Level => "Level",
        }
    }

    /// Position in [`SortKey::ALL`]
    pub fn index(self) -> usize {
        match self {
            SortKey::Created => 0,
            SortKey::KudosCount => 1,
            SortKey::Level => 2,
        }
    }

    /// Next key in selector order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous key in selector order, wrapping around
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Compares two items so that the one to display first is `Less`.
    ///
    /// Items whose creation time cannot be resolved go after every item
    /// that has one.
    pub fn compare(self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::Created => b.created.instant().cmp(&a.created.instant()),
            SortKey::KudosCount => b.kudos_count().cmp(&a.kudos_count()),
            SortKey::Level => b.skill_level().rank().cmp(&a.skill_level().rank()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a sort key name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid sort key: '{0}'. Valid keys: created, kudos, level")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" | "date" | "time" => Ok(SortKey::Created),
            "kudos" | "kudoscount" | "kudosfull" => Ok(SortKey::KudosCount),
            "level" | "data.level" => Ok(SortKey::Level),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Created, ItemData};
    use serde_json::{json, Map};

    fn item(id: i64, seconds: i64, nanoseconds: u32, kudos: usize, level: Option<&str>) -> Item {
        Item {
            id,
            created: Created::Timestamp {
                seconds,
                nanoseconds,
            },
            kudos_full: vec![json!({}); kudos],
            data: Some(ItemData {
                level: level.map(|l| json!(l)),
                ..Default::default()
            }),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_default_is_created() {
        assert_eq!(SortKey::default(), SortKey::Created);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(SortKey::Created.next(), SortKey::KudosCount);
        assert_eq!(SortKey::Level.next(), SortKey::Created);
        assert_eq!(SortKey::Created.previous(), SortKey::Level);
        for key in SortKey::ALL {
            assert_eq!(key.next().previous(), key);
            assert_eq!(SortKey::ALL[key.index()], key);
        }
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = SortKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["Created", "Kudos", "Level"]);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("created".parse::<SortKey>().unwrap(), SortKey::Created);
        assert_eq!("Kudos".parse::<SortKey>().unwrap(), SortKey::KudosCount);
        assert_eq!("kudosFull".parse::<SortKey>().unwrap(), SortKey::KudosCount);
        assert_eq!("data.level".parse::<SortKey>().unwrap(), SortKey::Level);
    }

    #[test]
    fn test_parse_invalid() {
        let err = "popularity".parse::<SortKey>().unwrap_err();
        assert!(err.to_string().contains("popularity"));
    }

    #[test]
    fn test_created_compares_nanoseconds() {
        let older = item(1, 100, 1, 0, None);
        let newer = item(2, 100, 2, 0, None);
        assert_eq!(SortKey::Created.compare(&newer, &older), Ordering::Less);
        assert_eq!(SortKey::Created.compare(&older, &newer), Ordering::Greater);
    }

    #[test]
    fn test_unresolvable_created_goes_last() {
        let dated = item(1, 0, 0, 0, None);
        let mut undated = item(2, 0, 0, 0, None);
        undated.created = Created::Other(json!(null));
        assert_eq!(SortKey::Created.compare(&dated, &undated), Ordering::Less);
    }

    #[test]
    fn test_kudos_and_level_descending() {
        let a = item(1, 0, 0, 5, Some("newbie"));
        let b = item(2, 0, 0, 2, Some("advanced"));
        assert_eq!(SortKey::KudosCount.compare(&a, &b), Ordering::Less);
        assert_eq!(SortKey::Level.compare(&a, &b), Ordering::Greater);
    }
}
