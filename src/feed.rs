//! Data model for workout feed entries
//!
//! Mirrors the JSON shape returned by the feed endpoint. Fields the display
//! does not use are kept in `extra` so that the cached snapshot is the same
//! document the API returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of the workout feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, used as a stable key for the list only
    pub id: i64,
    /// Creation time of the entry
    #[serde(default)]
    pub created: Created,
    /// Kudos given to the entry; only the number of entries matters.
    /// Anything other than an array reads as no kudos.
    #[serde(rename = "kudosFull", default, deserialize_with = "lenient_list")]
    pub kudos_full: Vec<Value>,
    /// Nested payload holding the skill level. Entries without it are hidden;
    /// a non-object payload reads as one without a level.
    #[serde(default, deserialize_with = "lenient_data")]
    pub data: Option<ItemData>,
    /// Remaining fields, preserved untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nested payload of an [`Item`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    /// Skill level label (`newbie`, `medium`, `advanced`), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(entries),
        _ => Ok(Vec::new()),
    }
}

fn lenient_data<'de, D>(deserializer: D) -> Result<Option<ItemData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value @ Value::Object(_) => Ok(Some(serde_json::from_value(value).unwrap_or_default())),
        _ => Ok(Some(ItemData::default())),
    }
}

/// Creation timestamp as delivered by the API
///
/// The feed normally sends `{ "_seconds": .., "_nanoseconds": .. }`; anything
/// else is kept verbatim and resolved best-effort by [`Created::instant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Created {
    Timestamp {
        #[serde(rename = "_seconds", alias = "seconds")]
        seconds: i64,
        #[serde(rename = "_nanoseconds", alias = "nanoseconds", default)]
        nanoseconds: u32,
    },
    Other(Value),
}

impl Default for Created {
    fn default() -> Self {
        Created::Other(Value::Null)
    }
}

impl Created {
    /// Resolves the timestamp to a single instant.
    ///
    /// Numbers are read as milliseconds since the epoch and strings as
    /// RFC 3339. Returns `None` when the value cannot be resolved.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Created::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            Created::Other(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|ms| ms as i64))
                .and_then(DateTime::from_timestamp_millis),
            Created::Other(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Created::Other(_) => None,
        }
    }
}

/// Skill levels the feed knows about, ordered by rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkillLevel {
    /// Missing or unrecognised label
    Unknown,
    Newbie,
    Medium,
    Advanced,
}

impl SkillLevel {
    /// Parses a level label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label {
            "advanced" => SkillLevel::Advanced,
            "medium" => SkillLevel::Medium,
            "newbie" => SkillLevel::Newbie,
            _ => SkillLevel::Unknown,
        }
    }

    /// Ordinal used for sorting: advanced 3, medium 2, newbie 1, otherwise 0
    pub fn rank(self) -> u8 {
        match self {
            SkillLevel::Advanced => 3,
            SkillLevel::Medium => 2,
            SkillLevel::Newbie => 1,
            SkillLevel::Unknown => 0,
        }
    }
}

impl Item {
    /// Number of kudos the entry received
    pub fn kudos_count(&self) -> usize {
        self.kudos_full.len()
    }

    /// Whether the entry carries its nested payload and may be displayed
    pub fn is_displayable(&self) -> bool {
        self.data.is_some()
    }

    fn level_value(&self) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.level.as_ref())
    }

    /// Parsed skill level
    pub fn skill_level(&self) -> SkillLevel {
        match self.level_value() {
            Some(Value::String(label)) => SkillLevel::from_label(label),
            _ => SkillLevel::Unknown,
        }
    }

    /// Level as shown to the user: the raw label, the JSON text of a
    /// non-string value, or `undefined` when missing
    pub fn level_label(&self) -> String {
        match self.level_value() {
            Some(Value::String(label)) => label.clone(),
            Some(Value::Null) | None => "undefined".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Parses a response body or cached snapshot into items
pub fn parse_items(json: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serializes items into the snapshot stored in the cache
pub fn snapshot(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}
