//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, counts as `INTEGER`.

use chrono::{DateTime, Utc};
use packline_core::{
  operator::Operator,
  packing::{PackingFields, PackingRecord},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn decode_count(column: &'static str, value: i64) -> Result<u32> {
  u32::try_from(value).map_err(|_| Error::OutOfRange { column, value })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values bound for a `packing_records` insert or update.
pub struct PackingParams {
  pub datetime: String,
  pub pic:      String,
  pub weight:   f64,
  pub qty_a:    i64,
  pub qty_b:    i64,
  pub qty_c:    i64,
  pub reject:   f64,
}

impl From<&PackingFields> for PackingParams {
  fn from(f: &PackingFields) -> Self {
    PackingParams {
      datetime: encode_dt(f.datetime),
      pic:      f.pic.clone(),
      weight:   f.weight,
      qty_a:    i64::from(f.qty_a),
      qty_b:    i64::from(f.qty_b),
      qty_c:    i64::from(f.qty_c),
      reject:   f.reject,
    }
  }
}

/// Raw values read directly from an `operators` row.
pub struct RawOperator {
  pub id:   String,
  pub name: String,
}

impl RawOperator {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawOperator { id: row.get(0)?, name: row.get(1)? })
  }

  pub fn into_operator(self) -> Result<Operator> {
    Ok(Operator { id: decode_uuid(&self.id)?, name: self.name })
  }
}

/// Raw values read directly from a `packing_records` row.
pub struct RawPackingRecord {
  pub id:       String,
  pub datetime: String,
  pub pic:      String,
  pub weight:   f64,
  pub qty_a:    i64,
  pub qty_b:    i64,
  pub qty_c:    i64,
  pub reject:   f64,
}

/// Column list matching [`RawPackingRecord::from_row`].
pub const PACKING_COLUMNS: &str =
  "id, datetime, pic, weight, qty_a, qty_b, qty_c, reject";

impl RawPackingRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPackingRecord {
      id:       row.get(0)?,
      datetime: row.get(1)?,
      pic:      row.get(2)?,
      weight:   row.get(3)?,
      qty_a:    row.get(4)?,
      qty_b:    row.get(5)?,
      qty_c:    row.get(6)?,
      reject:   row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<PackingRecord> {
    Ok(PackingRecord {
      id:     decode_uuid(&self.id)?,
      fields: PackingFields {
        datetime: decode_dt(&self.datetime)?,
        pic:      self.pic,
        weight:   self.weight,
        qty_a:    decode_count("qty_a", self.qty_a)?,
        qty_b:    decode_count("qty_b", self.qty_b)?,
        qty_c:    decode_count("qty_c", self.qty_c)?,
        reject:   self.reject,
      },
    })
  }
}
