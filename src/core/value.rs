use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A single field value read from a record or supplied by a filter.
///
/// On the wire a `Value` is plain JSON: it deserializes from and serializes to
/// `serde_json::Value`, so filters read `{"value": 10}` rather than a tagged enum.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    // Numeric types
    Integer(i64),
    Real(f64),
    Numeric(Decimal),
    // String types
    Text(String),
    // Boolean
    Boolean(bool),
    // Date/Time types
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    // Special types
    Uuid(Uuid),
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric coercion used by the range operators.
    ///
    /// Booleans count as 1/0 and numeric text is parsed. Blank text, NaN and
    /// non-numeric values have no number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Integer(i) => *i as f64,
            Self::Real(r) => *r,
            Self::Numeric(d) => d.to_f64()?,
            Self::Boolean(b) => f64::from(u8::from(*b)),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            _ => return None,
        };
        if n.is_nan() { None } else { Some(n) }
    }

    /// Temporal coercion: dates, timestamps and ISO-8601 text
    #[must_use]
    pub fn as_instant(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Self::Timestamp(t) => Some(t.naive_utc()),
            Self::Text(s) => parse_instant(s.trim()),
            _ => None,
        }
    }

    /// Text rendering used by the substring operators and the shell.
    ///
    /// Null renders empty, whole reals drop the fraction, lists join with commas.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Integer(i) => i.to_string(),
            Self::Real(r) => r.to_string(),
            Self::Numeric(d) => d.normalize().to_string(),
            Self::Text(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            Self::Uuid(u) => u.to_string(),
            Self::List(items) => items
                .iter()
                .map(Self::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Falsy-or-empty test behind `isEmpty`/`isNotEmpty`
    #[must_use]
    pub fn is_empty_like(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Integer(i) => *i == 0,
            Self::Real(r) => *r == 0.0 || r.is_nan(),
            Self::Numeric(d) => d.is_zero(),
            Self::Boolean(b) => !*b,
            Self::List(items) => items.is_empty(),
            Self::Date(_) | Self::Timestamp(_) | Self::Uuid(_) => false,
        }
    }

    /// Strict equality: numbers compare by value across representations,
    /// text never equals a number, temporal and uuid values equal their text form.
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Numeric(a), Self::Numeric(b)) => a == b,
            (
                Self::Integer(_) | Self::Real(_) | Self::Numeric(_),
                Self::Integer(_) | Self::Real(_) | Self::Numeric(_),
            ) => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Uuid(u), Self::Text(s)) | (Self::Text(s), Self::Uuid(u)) => {
                Uuid::parse_str(s.trim()).is_ok_and(|parsed| parsed == *u)
            }
            (Self::Date(_) | Self::Timestamp(_), Self::Date(_) | Self::Timestamp(_) | Self::Text(_))
            | (Self::Text(_), Self::Date(_) | Self::Timestamp(_)) => {
                match (self.as_instant(), other.as_instant()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            _ => false,
        }
    }

    /// Ordering for the range operators: numeric when both sides coerce to a
    /// number, chronological when both are temporal, otherwise incomparable.
    #[must_use]
    pub fn compare_ordered(&self, other: &Self) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a.partial_cmp(&b);
        }
        if let (Some(a), Some(b)) = (self.as_instant(), other.as_instant()) {
            return Some(a.cmp(&b));
        }
        None
    }

    /// Integer, real or decimal value (booleans and numeric text excluded)
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_) | Self::Numeric(_))
    }

    /// Total ordering over non-null values used for sorting.
    ///
    /// Values are ranked by class first (numbers, then temporal values, then
    /// text-like values, then NaN) and compared within their class. With
    /// `numeric_text`, text that coerces to a number ranks and compares with
    /// the numbers; otherwise text always compares by code point.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self, numeric_text: bool) -> Ordering {
        let (rank_a, rank_b) = (self.sort_class(numeric_text), other.sort_class(numeric_text));
        if rank_a != rank_b {
            return rank_a.cmp(&rank_b);
        }
        match rank_a {
            0 => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
            1 => self.as_instant().cmp(&other.as_instant()),
            2 => self.to_text().cmp(&other.to_text()),
            _ => Ordering::Equal,
        }
    }

    fn sort_class(&self, numeric_text: bool) -> u8 {
        match self {
            Self::Real(r) if r.is_nan() => 3,
            Self::Integer(_) | Self::Real(_) | Self::Numeric(_) | Self::Boolean(_) => 0,
            Self::Text(_) if numeric_text && self.as_number().is_some() => 0,
            Self::Date(_) | Self::Timestamp(_) => 1,
            Self::Text(_) | Self::Uuid(_) | Self::List(_) => 2,
            Self::Null => 4,
        }
    }

    /// Convert into plain JSON for responses
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Self::Null => Json::Null,
            Self::Integer(i) => Json::from(*i),
            Self::Real(r) => serde_json::Number::from_f64(*r).map_or(Json::Null, Json::Number),
            Self::Numeric(d) => d
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map_or_else(|| Json::String(d.to_string()), Json::Number),
            Self::Text(s) => Json::String(s.clone()),
            Self::Boolean(b) => Json::Bool(*b),
            Self::Date(_) | Self::Timestamp(_) | Self::Uuid(_) => Json::String(self.to_text()),
            Self::List(items) => Json::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.naive_utc());
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(t);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            _ => write!(f, "{}", self.to_text()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Boolean(b),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Real(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(_) => Self::Text(json.to_string()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Self::Real(i as f64), Self::Integer)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Numeric(d)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items.into_iter().map(Self::Text).collect())
    }
}
