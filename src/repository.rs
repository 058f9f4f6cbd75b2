//! SQLite-backed place store.
//!
//! Places are kept as whole JSON documents keyed by id, matching the
//! document-store shape the records originally lived in. The repository
//! only needs read-all and upsert-by-id; evaluation results are never
//! written back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::place::Place;

pub struct PlaceRepository {
    conn: Connection,
}

impl PlaceRepository {
    /// Open (creating if necessary) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open place database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS places (id TEXT PRIMARY KEY, doc TEXT NOT NULL)",
            [],
        )
        .context("Failed to create places table")?;
        Ok(Self { conn })
    }

    pub fn select_all(&self) -> Result<Vec<Place>> {
        let mut stmt = self.conn.prepare("SELECT id, doc FROM places ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut places = Vec::new();
        for row in rows {
            let (id, doc) = row?;
            let place: Place = serde_json::from_str(&doc)
                .with_context(|| format!("Corrupt place document '{id}'"))?;
            places.push(place);
        }
        Ok(places)
    }

    pub fn select_by_id(&self, id: &str) -> Result<Option<Place>> {
        let doc: Option<String> = self
            .conn
            .query_row("SELECT doc FROM places WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;

        match doc {
            Some(doc) => {
                let place = serde_json::from_str(&doc)
                    .with_context(|| format!("Corrupt place document '{id}'"))?;
                Ok(Some(place))
            }
            None => Ok(None),
        }
    }

    /// Insert the place, or replace the stored document if the id exists.
    pub fn upsert(&self, place: &Place) -> Result<()> {
        let doc = serde_json::to_string(place)
            .with_context(|| format!("Failed to serialize place '{}'", place.id))?;
        self.conn
            .execute(
                "INSERT INTO places (id, doc) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET doc = excluded.doc",
                params![place.id, doc],
            )
            .with_context(|| format!("Failed to upsert place '{}'", place.id))?;
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM places", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
