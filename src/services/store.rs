//! Record storage backed by a single SQLite table
//!
//! The layout is the legacy `database.db` one, `egg_laying(date TEXT,
//! count INTEGER, note TEXT)` with `dd.mm.yyyy` dates, so existing
//! databases open unchanged.

use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::types::{
    format_date, is_storable, parse_date, DateRange, Record, Result, TrackError,
};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS egg_laying (date TEXT, count INTEGER, note TEXT)";

/// `dd.mm.yyyy` reordered to `yyyymmdd` so text comparison follows the calendar
const SORT_KEY: &str = "(substr(date, 7, 4) || substr(date, 4, 2) || substr(date, 1, 2))";

/// CRUD surface over dated records. At most one record per date.
pub trait RecordStore {
    /// Every record, ascending by date
    fn fetch_all(&self) -> Result<Vec<Record>>;

    /// Records whose date lies in the inclusive range, ascending by date
    fn fetch_in_range(&self, range: DateRange) -> Result<Vec<Record>>;

    /// Insert, or replace count and note of the record at the same date
    fn upsert(&mut self, record: &Record) -> Result<()>;

    /// Rewrite the record stored at `original`. When `record.date` differs
    /// the record is renamed, which fails if the new date is already taken.
    fn update(&mut self, original: NaiveDate, record: &Record) -> Result<()>;

    /// Remove the record at `date`, returning whether one existed
    fn delete(&mut self, date: NaiveDate) -> Result<bool>;

    /// Fetch with optional bounds. Omitting both fetches everything; a
    /// single bound leaves the other side open.
    fn fetch_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Vec<Record>> {
        match (start, end) {
            (Some(start), Some(end)) => self.fetch_in_range(DateRange::new(start, end)?),
            (None, None) => self.fetch_all(),
            (start, end) => Ok(self
                .fetch_all()?
                .into_iter()
                .filter(|r| start.map_or(true, |s| r.date >= s) && end.map_or(true, |e| r.date <= e))
                .collect()),
        }
    }
}

/// SQLite-backed store holding one long-lived connection.
/// Each mutation runs in its own transaction.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened record store");
        Self::init(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    fn query(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(date, count, note)| decode_row(&date, count, note))
            .collect()
    }
}

impl RecordStore for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        let sql = format!("SELECT date, count, note FROM egg_laying ORDER BY {}", SORT_KEY);
        let records = self.query(&sql, [])?;
        debug!(count = records.len(), "fetched all records");
        Ok(records)
    }

    fn fetch_in_range(&self, range: DateRange) -> Result<Vec<Record>> {
        let sql = format!(
            "SELECT date, count, note FROM egg_laying WHERE {key} BETWEEN ?1 AND ?2 ORDER BY {key}",
            key = SORT_KEY
        );
        let records = self.query(
            &sql,
            params![sort_key(range.start()), sort_key(range.end())],
        )?;
        debug!(
            start = %range.start(),
            end = %range.end(),
            count = records.len(),
            "fetched records in range"
        );
        Ok(records)
    }

    fn upsert(&mut self, record: &Record) -> Result<()> {
        ensure_storable(record.date)?;
        let date = format_date(record.date);
        let tx = self.conn.transaction()?;
        let updated = tx.execute(
            "UPDATE egg_laying SET count = ?1, note = ?2 WHERE date = ?3",
            params![record.count, record.note_text(), date],
        )?;
        if updated == 0 {
            tx.execute(
                "INSERT INTO egg_laying (date, count, note) VALUES (?1, ?2, ?3)",
                params![date, record.count, record.note_text()],
            )?;
        }
        tx.commit()?;

        info!(date = %date, count = record.count, replaced = updated > 0, "saved record");
        Ok(())
    }

    fn update(&mut self, original: NaiveDate, record: &Record) -> Result<()> {
        ensure_storable(record.date)?;
        let original_text = format_date(original);
        let new_text = format_date(record.date);
        let tx = self.conn.transaction()?;

        if record.date != original {
            let taken: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM egg_laying WHERE date = ?1 LIMIT 1",
                    params![new_text],
                    |row| row.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Err(TrackError::DateTaken(record.date));
            }
        }

        let updated = tx.execute(
            "UPDATE egg_laying SET date = ?1, count = ?2, note = ?3 WHERE date = ?4",
            params![new_text, record.count, record.note_text(), original_text],
        )?;
        if updated == 0 {
            return Err(TrackError::NotFound(original));
        }
        tx.commit()?;

        info!(from = %original_text, to = %new_text, count = record.count, "updated record");
        Ok(())
    }

    fn delete(&mut self, date: NaiveDate) -> Result<bool> {
        let date_text = format_date(date);
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM egg_laying WHERE date = ?1", params![date_text])?;
        tx.commit()?;

        info!(date = %date_text, removed, "deleted record");
        Ok(removed > 0)
    }
}

/// Range bound as `yyyymmdd`. Bounds outside the storable years are
/// pinned to the first or last storable day.
fn sort_key(date: NaiveDate) -> String {
    match date.year() {
        y if y < 0 => "00000101".to_string(),
        y if y > 9999 => "99991231".to_string(),
        _ => date.format("%Y%m%d").to_string(),
    }
}

/// Dates whose text would not be `dd.mm.yyyy` never reach the table
fn ensure_storable(date: NaiveDate) -> Result<()> {
    if is_storable(date) {
        Ok(())
    } else {
        Err(TrackError::Validation(
            "Date must use the dd.mm.yyyy format.".into(),
        ))
    }
}

fn decode_row(date: &str, count: i64, note: Option<String>) -> Result<Record> {
    let date = parse_date(date)
        .map_err(|_| TrackError::Corrupt(format!("unreadable date '{}'", date)))?;
    let count = u32::try_from(count).map_err(|_| {
        TrackError::Corrupt(format!("count {} for {} is out of range", count, format_date(date)))
    })?;
    Ok(Record::new(date, count, note))
}
