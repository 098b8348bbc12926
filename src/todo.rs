use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: Uuid,
    /// Whatever JSON value the client sent, kept as-is.
    pub title: Value,
    pub done: bool,
    /// `None` when the client sent a deadline that could not be read as a
    /// point in time. Serialized as `null`.
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /todos` and `PUT /todos/{id}`.
#[derive(Deserialize, Debug, Default)]
pub struct TodoFields {
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub deadline: Option<Value>,
}

impl TodoFields {
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        parse_deadline(self.deadline.as_ref())
    }
}

impl Todo {
    pub fn new(
        title: impl Into<Value>,
        deadline: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Todo {
            id: Uuid::new_v4(),
            title: title.into(),
            done: false,
            deadline,
            created_at,
        }
    }
}

/// Reads a client supplied deadline.
///
/// Strings may be RFC 3339, a date-time without offset (taken as UTC) or a
/// bare `YYYY-MM-DD` date (UTC midnight). Numbers are milliseconds since the
/// Unix epoch. Everything else is an invalid deadline.
pub fn parse_deadline(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_f64()?;
            if !millis.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `2024-01-01T00:00:00.000Z`. Years outside `0..=9999` use the six digit
/// signed form, `+010000-01-01T00:00:00.000Z`.
///
/// chrono only represents years up to about ±262143, so epoch millis past
/// that range are treated as invalid deadlines by [`parse_deadline`].
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let year = ts.year();
    if (0..=9999).contains(&year) {
        return ts.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{sign}{:06}{}",
        year.unsigned_abs(),
        ts.format("-%m-%dT%H:%M:%S%.3fZ")
    )
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

fn serialize_optional_timestamp<S: Serializer>(
    ts: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_timestamp(ts, serializer),
        None => serializer.serialize_none(),
    }
}
