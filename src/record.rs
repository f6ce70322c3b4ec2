//! Creature records and the derived power metric

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier assigned by the data source (numeric or textual)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Missing, `null` or otherwise unusable ids deserialize as blank
    pub fn is_blank(&self) -> bool {
        matches!(self, RecordId::Text(id) if id.is_empty())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

/// One creature entry from the dataset.
///
/// Base stats are kept as `Option<u32>`: a stat that is missing or not a
/// non-negative integer is `None` and poisons [`Record::power`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub hp: Option<u32>,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub attack: Option<u32>,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub defense: Option<u32>,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub special_attack: Option<u32>,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub special_defense: Option<u32>,
    #[serde(default, deserialize_with = "lenient_stat")]
    pub speed: Option<u32>,
}

impl Record {
    /// Build a well-formed record (all six stats present)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        kind: impl Into<String>,
        hp: u32,
        attack: u32,
        defense: u32,
        special_attack: u32,
        special_defense: u32,
        speed: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            hp: Some(hp),
            attack: Some(attack),
            defense: Some(defense),
            special_attack: Some(special_attack),
            special_defense: Some(special_defense),
            speed: Some(speed),
        }
    }

    /// The six base stats in column order
    pub fn stats(&self) -> [Option<u32>; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
    }

    /// Sum of the six base stats, recomputed on every call.
    ///
    /// `None` when any stat is malformed or the sum overflows.
    pub fn power(&self) -> Option<u32> {
        self.stats()
            .into_iter()
            .try_fold(0u32, |total, stat| total.checked_add(stat?))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        RecordId::Int(i64::from(id))
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

/// Display text for a power value; malformed power shows as `NaN`
pub fn format_power(power: Option<u32>) -> String {
    match power {
        Some(value) => value.to_string(),
        None => "NaN".to_string(),
    }
}

/// Display text for a single stat; malformed stats show as `NaN`
pub fn format_stat(stat: Option<u32>) -> String {
    format_power(stat)
}

fn lenient_stat<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stat_from_value(&value))
}

// Integral floats such as `45.0` are still valid stats.
fn stat_from_value(value: &Value) -> Option<u32> {
    if let Some(stat) = value.as_u64() {
        return u32::try_from(stat).ok();
    }
    let stat = value.as_f64()?;
    let integral = stat.is_finite() && stat >= 0.0 && stat.fract() == 0.0;
    (integral && stat <= f64::from(u32::MAX)).then(|| stat as u32)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(number) => match number.as_i64() {
            Some(id) => RecordId::Int(id),
            None => RecordId::Text(number.to_string()),
        },
        Value::String(id) => RecordId::Text(id),
        _ => RecordId::default(),
    })
}

// Datasets in the wild carry `type` either as a string or as a list.
fn lenient_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(kind) => kind,
        Value::Array(kinds) => kinds
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("/"),
        _ => String::new(),
    })
}
