//! Raw client input and its normalisation into validated domain values.
//!
//! Clients send loosely typed JSON: numbers may arrive as numbers or as
//! strings, timestamps in several textual shapes. Every entry point runs the
//! same step here and fails fast on anything that does not parse. Nothing is
//! coerced to `0`, `NaN` or the Unix epoch.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result, packing::PackingFields};

// ─── Raw shapes ──────────────────────────────────────────────────────────────

/// Body of `POST /pic`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOperatorInput {
  pub name: Option<Value>,
}

/// The seven packing fields exactly as the client sent them.
///
/// JSON `null` deserialises to `None` and counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPackingInput {
  pub datetime: Option<Value>,
  pub pic:      Option<Value>,
  pub weight:   Option<Value>,
  pub qty_a:    Option<Value>,
  pub qty_b:    Option<Value>,
  pub qty_c:    Option<Value>,
  pub reject:   Option<Value>,
}

/// Body of the bulk-style `PUT /reports`: the id travels with the fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPackingUpdate {
  pub id:     Option<Value>,
  #[serde(flatten)]
  pub fields: RawPackingInput,
}

impl RawPackingUpdate {
  /// The id as text, if the client sent one at all.
  pub fn id_text(&self) -> Option<String> {
    match &self.id {
      None | Some(Value::Null) => None,
      Some(Value::String(s)) => Some(s.clone()),
      Some(other) => Some(other.to_string()),
    }
  }
}

impl RawOperatorInput {
  /// Validate the operator name: a string, non-empty once trimmed.
  pub fn normalize(&self) -> Result<String> {
    let value = self
      .name
      .as_ref()
      .ok_or(Error::MissingFields(vec!["name"]))?;
    parse_text(value).map_err(|reason| invalid("name", reason))
  }
}

impl RawPackingInput {
  /// Names of the required fields the client left out, in wire order.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    [
      ("datetime", &self.datetime),
      ("pic", &self.pic),
      ("weight", &self.weight),
      ("qtyA", &self.qty_a),
      ("qtyB", &self.qty_b),
      ("qtyC", &self.qty_c),
      ("reject", &self.reject),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_none())
    .map(|(name, _)| name)
    .collect()
  }

  /// Check completeness, then parse every field.
  ///
  /// All missing fields are reported together; after that the first field
  /// that fails to parse is reported.
  pub fn normalize(&self) -> Result<PackingFields> {
    let missing = self.missing_fields();
    if !missing.is_empty() {
      return Err(Error::MissingFields(missing));
    }

    Ok(PackingFields {
      datetime: field("datetime", &self.datetime, parse_datetime)?,
      pic:      field("pic", &self.pic, parse_text)?,
      weight:   field("weight", &self.weight, parse_real)?,
      qty_a:    field("qtyA", &self.qty_a, parse_count)?,
      qty_b:    field("qtyB", &self.qty_b, parse_count)?,
      qty_c:    field("qtyC", &self.qty_c, parse_count)?,
      reject:   field("reject", &self.reject, parse_real)?,
    })
  }
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Resolve a client-supplied identifier.
///
/// - absent or blank: [`Error::MissingId`] naming `entity`
/// - present but not a UUID: `Ok(None)`, since it can never match a row
/// - otherwise: `Ok(Some(id))`
pub fn parse_id(entity: &'static str, raw: Option<&str>) -> Result<Option<Uuid>> {
  let raw = raw.map(str::trim).filter(|s| !s.is_empty());
  match raw {
    None => Err(Error::MissingId(entity)),
    Some(s) => Ok(Uuid::parse_str(s).ok()),
  }
}

// ─── Field parsers ───────────────────────────────────────────────────────────

fn invalid(field: &'static str, reason: String) -> Error {
  Error::InvalidField { field, reason }
}

fn field<T>(
  name: &'static str,
  value: &Option<Value>,
  parse: fn(&Value) -> std::result::Result<T, String>,
) -> Result<T> {
  match value {
    Some(v) => parse(v).map_err(|reason| invalid(name, reason)),
    None => Err(Error::MissingFields(vec![name])),
  }
}

fn describe(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

fn parse_text(value: &Value) -> std::result::Result<String, String> {
  match value {
    Value::String(s) => {
      let trimmed = s.trim();
      if trimmed.is_empty() {
        Err("must not be empty".to_owned())
      } else {
        Ok(trimmed.to_owned())
      }
    }
    other => Err(format!("expected a string, got {}", describe(other))),
  }
}

fn parse_real(value: &Value) -> std::result::Result<f64, String> {
  let n = match value {
    Value::Number(n) => n
      .as_f64()
      .ok_or_else(|| format!("{n} is not representable as a real number"))?,
    Value::String(s) => s
      .trim()
      .parse::<f64>()
      .map_err(|_| format!("{s:?} is not a number"))?,
    other => return Err(format!("expected a number, got {}", describe(other))),
  };

  if !n.is_finite() {
    return Err(format!("{n} is not a finite number"));
  }
  if n < 0.0 {
    return Err(format!("{n} is negative"));
  }
  // Fold `-0.0` into `0.0`.
  Ok(n + 0.0)
}

fn parse_count(value: &Value) -> std::result::Result<u32, String> {
  match value {
    Value::Number(n) => n
      .as_u64()
      .and_then(|n| u32::try_from(n).ok())
      .ok_or_else(|| format!("{n} is not a non-negative whole number")),
    Value::String(s) => s
      .trim()
      .parse::<u32>()
      .map_err(|_| format!("{s:?} is not a non-negative base-10 integer")),
    other => Err(format!("expected an integer, got {}", describe(other))),
  }
}

/// Naive layouts accepted after RFC 3339; all interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// Years representable as a four-digit RFC 3339 timestamp.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

fn parse_datetime(value: &Value) -> std::result::Result<DateTime<Utc>, String> {
  let dt = match value {
    Value::String(s) => parse_datetime_str(s.trim()),
    // Epoch milliseconds.
    Value::Number(n) => n
      .as_i64()
      .and_then(DateTime::from_timestamp_millis)
      .ok_or_else(|| format!("{n} is not a valid millisecond timestamp")),
    other => Err(format!("expected a date/time string, got {}", describe(other))),
  }?;

  if !YEAR_RANGE.contains(&dt.year()) {
    return Err(format!("year {} is outside 0000-9999", dt.year()));
  }
  Ok(dt)
}

fn parse_datetime_str(s: &str) -> std::result::Result<DateTime<Utc>, String> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }

  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
      return Ok(naive.and_utc());
    }
  }

  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
    .ok_or_else(|| format!("{s:?} is not a recognised date/time"))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
