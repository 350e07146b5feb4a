//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use packline_core::{
  operator::Operator,
  packing::{PackingFields, PackingRecord},
  store::RecordStore,
};

use crate::{
  encode::{PACKING_COLUMNS, PackingParams, RawOperator, RawPackingRecord, encode_uuid},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Packline record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `DELETE ... WHERE id = ?1` and report whether a row went away.
  async fn delete_by_id(&self, sql: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id_str])?))
      .await?;

    Ok(affected > 0)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Operators ─────────────────────────────────────────────────────────────

  async fn add_operator(&self, name: String) -> Result<Operator> {
    let operator = Operator { id: Uuid::new_v4(), name };

    let id_str = encode_uuid(operator.id);
    let name   = operator.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO operators (id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(operator)
  }

  async fn list_operators(&self) -> Result<Vec<Operator>> {
    let raws: Vec<RawOperator> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM operators ORDER BY rowid")?;
        let rows = stmt
          .query_map([], RawOperator::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOperator::into_operator).collect()
  }

  async fn delete_operator(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("DELETE FROM operators WHERE id = ?1", id).await
  }

  // ── Packing records ───────────────────────────────────────────────────────

  async fn add_packing_record(&self, fields: PackingFields) -> Result<PackingRecord> {
    let record = PackingRecord { id: Uuid::new_v4(), fields };

    let id_str = encode_uuid(record.id);
    let p      = PackingParams::from(&record.fields);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO packing_records (
             id, datetime, pic, weight, qty_a, qty_b, qty_c, reject
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str, p.datetime, p.pic, p.weight, p.qty_a, p.qty_b, p.qty_c, p.reject,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_packing_records(&self) -> Result<Vec<PackingRecord>> {
    let raws: Vec<RawPackingRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PACKING_COLUMNS} FROM packing_records ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawPackingRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPackingRecord::into_record).collect()
  }

  async fn get_packing_record(&self, id: Uuid) -> Result<Option<PackingRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPackingRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PACKING_COLUMNS} FROM packing_records WHERE id = ?1"),
            rusqlite::params![id_str],
            RawPackingRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPackingRecord::into_record).transpose()
  }

  async fn replace_packing_record(
    &self,
    id:     Uuid,
    fields: PackingFields,
  ) -> Result<Option<PackingRecord>> {
    let id_str = encode_uuid(id);
    let p      = PackingParams::from(&fields);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE packing_records
              SET datetime = ?2, pic = ?3, weight = ?4,
                  qty_a = ?5, qty_b = ?6, qty_c = ?7, reject = ?8
            WHERE id = ?1",
          rusqlite::params![
            id_str, p.datetime, p.pic, p.weight, p.qty_a, p.qty_b, p.qty_c, p.reject,
          ],
        )?)
      })
      .await?;

    if affected == 0 {
      return Ok(None);
    }
    Ok(Some(PackingRecord { id, fields }))
  }

  async fn delete_packing_record(&self, id: Uuid) -> Result<bool> {
    self.delete_by_id("DELETE FROM packing_records WHERE id = ?1", id).await
  }
}
