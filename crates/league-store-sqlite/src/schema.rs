//! SQL schema for the league SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Every entity kind lives in this one table. Documents are only ever
-- inserted; no UPDATE or DELETE is issued against it.
CREATE TABLE IF NOT EXISTS documents (
    container     TEXT NOT NULL,
    partition_key TEXT NOT NULL,   -- tenant (account) id
    id            TEXT NOT NULL,
    item_type     TEXT NOT NULL,   -- JSON array of discriminator labels
    is_active     INTEGER NOT NULL,
    body          TEXT NOT NULL,   -- full JSON document
    written_at    TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    PRIMARY KEY (container, partition_key, id)
);

CREATE INDEX IF NOT EXISTS documents_item_type_idx
    ON documents(container, partition_key, item_type);

PRAGMA user_version = 1;
";
