//! SQL schema for the Packline SQLite store.
//!
//! Executed once at connection startup. The version is recorded in
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS operators (
    id    TEXT PRIMARY KEY,
    name  TEXT NOT NULL
);

-- `pic` is free text; deleting an operator never touches packing records.
CREATE TABLE IF NOT EXISTS packing_records (
    id        TEXT PRIMARY KEY,
    datetime  TEXT    NOT NULL,   -- ISO 8601 UTC; client-supplied
    pic       TEXT    NOT NULL,
    weight    REAL    NOT NULL CHECK (weight >= 0),
    qty_a     INTEGER NOT NULL CHECK (qty_a >= 0),
    qty_b     INTEGER NOT NULL CHECK (qty_b >= 0),
    qty_c     INTEGER NOT NULL CHECK (qty_c >= 0),
    reject    REAL    NOT NULL CHECK (reject >= 0)
);

CREATE INDEX IF NOT EXISTS packing_records_datetime_idx ON packing_records(datetime);

PRAGMA user_version = 1;
";
