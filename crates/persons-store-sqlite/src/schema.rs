//! SQL schema for the SQLite person store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps identifiers of deleted rows from being reused.
CREATE TABLE IF NOT EXISTS persons (
    id                     INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name             TEXT NOT NULL,
    last_name              TEXT NOT NULL,
    birth_date             TEXT NOT NULL,   -- YYYY-MM-DD
    creation_date          TEXT NOT NULL,   -- RFC 3339 UTC
    last_modification_date TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS persons_first_name_idx ON persons(first_name);

PRAGMA user_version = 1;
";
