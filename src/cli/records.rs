//! `add`, `edit`, `delete` and `list` subcommands

use clap::Args;
use tracing::info;

use crate::services::RecordStore;
use crate::types::{format_date, parse_count, parse_date, Record, Result, TrackError};

/// Add a record, replacing any record on the same date
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Date as dd.mm.yyyy
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Number of eggs laid
    #[arg(value_name = "COUNT")]
    pub count: String,

    /// Free-text note
    #[arg(long)]
    pub note: Option<String>,
}

impl AddArgs {
    pub fn run<S: RecordStore>(self, store: &mut S) -> Result<String> {
        let record = Record::new(parse_date(&self.date)?, parse_count(&self.count)?, self.note);
        store.upsert(&record)?;
        info!("cli: saved record for {}", format_date(record.date));
        Ok(format!(
            "Saved {} eggs for {}",
            record.count,
            format_date(record.date)
        ))
    }
}

/// Change the record stored on a date
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Date of the existing record (dd.mm.yyyy)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// New egg count
    #[arg(value_name = "COUNT")]
    pub count: String,

    /// Replace the note (kept as-is when omitted)
    #[arg(long)]
    pub note: Option<String>,

    /// Move the record to another date
    #[arg(long, value_name = "DATE")]
    pub new_date: Option<String>,
}

impl EditArgs {
    pub fn run<S: RecordStore>(self, store: &mut S) -> Result<String> {
        let original = parse_date(&self.date)?;
        let count = parse_count(&self.count)?;
        let date = match &self.new_date {
            Some(new_date) => parse_date(new_date)?,
            None => original,
        };

        let existing = store
            .fetch_range(Some(original), Some(original))?
            .into_iter()
            .next()
            .ok_or(TrackError::NotFound(original))?;
        let note = self.note.or(existing.note);

        let record = Record::new(date, count, note);
        store.update(original, &record)?;
        info!(
            "cli: updated record {} -> {}",
            format_date(original),
            format_date(record.date)
        );
        Ok(format!(
            "Updated record for {}: {} eggs",
            format_date(record.date),
            record.count
        ))
    }
}

/// Delete the record stored on a date
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Date as dd.mm.yyyy
    #[arg(value_name = "DATE")]
    pub date: String,
}

impl DeleteArgs {
    pub fn run<S: RecordStore>(self, store: &mut S) -> Result<String> {
        let date = parse_date(&self.date)?;
        if !store.delete(date)? {
            return Err(TrackError::NotFound(date));
        }
        info!("cli: deleted record for {}", format_date(date));
        Ok(format!("Deleted record for {}", format_date(date)))
    }
}

/// List stored records
#[derive(Args, Debug)]
pub struct ListArgs {
    /// First date to include (dd.mm.yyyy)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last date to include (dd.mm.yyyy)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run<S: RecordStore>(self, store: &S) -> Result<String> {
        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;
        let records = store.fetch_range(from, to)?;

        if self.json {
            return Ok(serde_json::to_string_pretty(&records)?);
        }
        Ok(format_table(&records))
    }
}

/// Plain-text table of records
fn format_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No records".to_string();
    }

    let mut lines = vec![format!("{:<12}{:>7}  {}", "Date", "Count", "Note")];
    lines.extend(records.iter().map(|r| {
        format!("{:<12}{:>7}  {}", format_date(r.date), r.count, r.note_text())
            .trim_end()
            .to_string()
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SqliteStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(store: &mut SqliteStore, day: &str, count: &str, note: Option<&str>) {
        AddArgs {
            date: day.to_string(),
            count: count.to_string(),
            note: note.map(str::to_string),
        }
        .run(store)
        .unwrap();
    }

    // ========== add tests ==========

    #[test]
    fn test_add_saves_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let output = AddArgs {
            date: "03.01.2024".into(),
            count: "5".into(),
            note: Some("sunny".into()),
        }
        .run(&mut store)
        .unwrap();

        assert_eq!(output, "Saved 5 eggs for 03.01.2024");
        assert_eq!(
            store.fetch_all().unwrap(),
            vec![Record::new(date(2024, 1, 3), 5, Some("sunny".into()))]
        );
    }

    #[test]
    fn test_add_rejects_bad_count_without_writing() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let err = AddArgs {
            date: "03.01.2024".into(),
            count: "-1".into(),
            note: None,
        }
        .run(&mut store)
        .unwrap_err();

        assert_eq!(err.to_string(), "Egg count must be a number.");
        assert!(store.fetch_all().unwrap().is_empty());
    }

    // ========== edit tests ==========

    #[test]
    fn test_edit_keeps_note_when_omitted() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add(&mut store, "03.01.2024", "5", Some("sunny"));

        EditArgs {
            date: "03.01.2024".into(),
            count: "6".into(),
            note: None,
            new_date: None,
        }
        .run(&mut store)
        .unwrap();

        assert_eq!(
            store.fetch_all().unwrap(),
            vec![Record::new(date(2024, 1, 3), 6, Some("sunny".into()))]
        );
    }

    #[test]
    fn test_edit_moves_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add(&mut store, "03.01.2024", "5", None);

        let output = EditArgs {
            date: "03.01.2024".into(),
            count: "5".into(),
            note: Some("typo".into()),
            new_date: Some("04.01.2024".into()),
        }
        .run(&mut store)
        .unwrap();

        assert_eq!(output, "Updated record for 04.01.2024: 5 eggs");
        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(2024, 1, 4));
    }

    #[test]
    fn test_edit_missing_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let err = EditArgs {
            date: "03.01.2024".into(),
            count: "5".into(),
            note: None,
            new_date: None,
        }
        .run(&mut store)
        .unwrap_err();

        assert!(matches!(err, TrackError::NotFound(d) if d == date(2024, 1, 3)));
    }

    // ========== delete tests ==========

    #[test]
    fn test_delete_record() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add(&mut store, "03.01.2024", "5", None);

        let output = DeleteArgs {
            date: "03.01.2024".into(),
        }
        .run(&mut store)
        .unwrap();
        assert_eq!(output, "Deleted record for 03.01.2024");
        assert!(store.fetch_all().unwrap().is_empty());

        let err = DeleteArgs {
            date: "03.01.2024".into(),
        }
        .run(&mut store)
        .unwrap_err();
        assert!(matches!(err, TrackError::NotFound(_)));
    }

    // ========== list tests ==========

    #[test]
    fn test_list_table() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add(&mut store, "05.01.2024", "2", None);
        add(&mut store, "03.01.2024", "5", Some("sunny"));

        let output = ListArgs {
            from: None,
            to: None,
            json: false,
        }
        .run(&store)
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Date"));
        assert_eq!(lines[1], "03.01.2024        5  sunny");
        assert_eq!(lines[2], "05.01.2024        2");
    }

    #[test]
    fn test_list_with_bounds_and_json() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        add(&mut store, "01.01.2024", "1", None);
        add(&mut store, "03.01.2024", "3", None);
        add(&mut store, "05.01.2024", "5", None);

        let output = ListArgs {
            from: Some("02.01.2024".into()),
            to: None,
            json: true,
        }
        .run(&store)
        .unwrap();

        let parsed: Vec<Record> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].date, date(2024, 1, 3));
        assert_eq!(parsed[1].count, 5);
    }

    #[test]
    fn test_list_inverted_bounds() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = ListArgs {
            from: Some("05.01.2024".into()),
            to: Some("01.01.2024".into()),
            json: false,
        }
        .run(&store)
        .unwrap_err();
        assert!(matches!(err, TrackError::InvalidRange { .. }));
    }

    #[test]
    fn test_list_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        let output = ListArgs {
            from: None,
            to: None,
            json: false,
        }
        .run(&store)
        .unwrap();
        assert_eq!(output, "No records");
    }
}
