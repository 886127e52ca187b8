// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed record store for bugs.
//!
//! The [`Database`] struct owns a single connection and provides every data
//! access operation the service needs: filtered listing, lookup, insert,
//! partial update, delete, and grouped counts.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;

use crate::bug::{Bug, BugStats, BugUpdate, NewBug, Priority, Severity, Status};
use crate::error::{Error, Result};

/// SQL schema for the bug tracker database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS bugs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    priority TEXT NOT NULL DEFAULT 'medium',
    bug_type TEXT NOT NULL DEFAULT 'other',
    sprint TEXT,
    ai_suggested_severity TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bugs_status ON bugs(status);
CREATE INDEX IF NOT EXISTS idx_bugs_priority ON bugs(priority);
CREATE INDEX IF NOT EXISTS idx_bugs_created ON bugs(created_at DESC);
"#;

const BUG_COLUMNS: &str = "id, title, description, status, priority, bug_type, sprint,
     ai_suggested_severity, created_at, updated_at";

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Format a timestamp for storage.
///
/// Fixed-width microsecond precision keeps lexical order equal to time order,
/// which `ORDER BY created_at` relies on.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Truncate to the precision that survives a storage round trip.
fn storage_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&format_timestamp(ts))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(ts)
}

fn row_to_bug(row: &Row<'_>) -> std::result::Result<Bug, rusqlite::Error> {
    let status_str: String = row.get(3)?;
    let priority_str: String = row.get(4)?;
    let type_str: String = row.get(5)?;
    let severity_str: Option<String> = row.get(7)?;
    let created_str: String = row.get(8)?;
    let updated_str: String = row.get(9)?;

    Ok(Bug {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_db(&status_str, "status")?,
        priority: parse_db(&priority_str, "priority")?,
        bug_type: parse_db(&type_str, "bug_type")?,
        sprint: row.get(6)?,
        ai_suggested_severity: severity_str
            .map(|s| parse_db::<Severity>(&s, "ai_suggested_severity"))
            .transpose()?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

/// Create the schema if it does not exist yet.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with bug record operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating the schema if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        init_schema(&db.conn)?;
        tracing::debug!("opened bug database at {}", path.display());
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        init_schema(&db.conn)?;
        Ok(db)
    }

    /// List bugs, most recently created first.
    ///
    /// Filters are optional and combine with AND.
    pub fn list_bugs(
        &self,
        status: Option<Status>,
        priority: Option<Priority>,
    ) -> Result<Vec<Bug>> {
        let mut sql = format!("SELECT {BUG_COLUMNS} FROM bugs");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<&'static str> = Vec::new();

        if let Some(s) = status {
            conditions.push("status = ?");
            params_vec.push(s.as_str());
        }

        if let Some(p) = priority {
            conditions.push("priority = ?");
            params_vec.push(p.as_str());
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let bugs = stmt
            .query_map(params_from_iter(params_vec), row_to_bug)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bugs)
    }

    /// Get a bug by ID, or `None` if no record matches.
    pub fn get_bug(&self, id: i64) -> Result<Option<Bug>> {
        let bug = self
            .conn
            .query_row(
                &format!("SELECT {BUG_COLUMNS} FROM bugs WHERE id = ?1"),
                params![id],
                row_to_bug,
            )
            .optional()?;
        Ok(bug)
    }

    /// Insert a new bug with status `open`, returning the stored record.
    pub fn insert_bug(&self, new: &NewBug, ai_severity: Option<Severity>) -> Result<Bug> {
        let now = storage_precision(Utc::now());
        let ts = format_timestamp(now);

        self.conn.execute(
            "INSERT INTO bugs (title, description, status, priority, bug_type, sprint,
             ai_suggested_severity, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                new.title,
                new.description,
                Status::Open.as_str(),
                new.priority.as_str(),
                new.bug_type.as_str(),
                new.sprint,
                ai_severity.map(|s| s.as_str()),
                ts,
                ts,
            ],
        )?;

        Ok(Bug {
            id: self.conn.last_insert_rowid(),
            title: new.title.clone(),
            description: new.description.clone(),
            status: Status::Open,
            priority: new.priority,
            bug_type: new.bug_type,
            sprint: new.sprint.clone(),
            ai_suggested_severity: ai_severity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite only the fields present in `update` and refresh `updated_at`.
    ///
    /// Returns `None` if the bug does not exist. The new `updated_at` is
    /// strictly later than the previous one even when the clock has not
    /// advanced.
    pub fn apply_partial_update(&mut self, id: i64, update: &BugUpdate) -> Result<Option<Bug>> {
        let tx = self.conn.transaction()?;

        let previous: Option<String> = tx
            .query_row(
                "SELECT updated_at FROM bugs WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(previous) = previous else {
            return Ok(None);
        };
        let previous = parse_timestamp(&previous, "updated_at")?;

        let now = storage_precision(Utc::now());
        let floor = previous + Duration::microseconds(1);
        let updated_at = if now > floor { now } else { floor };

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(title) = &update.title {
            assignments.push("title = ?");
            values.push(Value::Text(title.clone()));
        }
        if let Some(description) = &update.description {
            assignments.push("description = ?");
            values.push(Value::Text(description.clone()));
        }
        if let Some(status) = update.status {
            assignments.push("status = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(priority) = update.priority {
            assignments.push("priority = ?");
            values.push(Value::Text(priority.as_str().to_string()));
        }
        if let Some(bug_type) = update.bug_type {
            assignments.push("bug_type = ?");
            values.push(Value::Text(bug_type.as_str().to_string()));
        }
        if let Some(sprint) = &update.sprint {
            assignments.push("sprint = ?");
            values.push(match sprint {
                Some(s) => Value::Text(s.clone()),
                None => Value::Null,
            });
        }

        assignments.push("updated_at = ?");
        values.push(Value::Text(format_timestamp(updated_at)));
        values.push(Value::Integer(id));

        let sql = format!("UPDATE bugs SET {} WHERE id = ?", assignments.join(", "));
        tx.execute(&sql, params_from_iter(values))?;

        let bug = tx.query_row(
            &format!("SELECT {BUG_COLUMNS} FROM bugs WHERE id = ?1"),
            params![id],
            row_to_bug,
        )?;
        tx.commit()?;

        Ok(Some(bug))
    }

    /// Delete a bug. Returns whether a record was actually removed.
    pub fn delete_bug(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM bugs WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    /// Group counts by status, priority, bug type, and sprint.
    pub fn aggregate_counts(&self) -> Result<BugStats> {
        Ok(BugStats {
            status: self.count_by("status")?,
            priority: self.count_by("priority")?,
            bug_type: self.count_by("bug_type")?,
            sprint: self.count_by("sprint")?,
        })
    }

    /// Count bugs per distinct non-null value of `column`.
    ///
    /// `column` is always one of the fixed names above, never caller input.
    fn count_by(&self, column: &'static str) -> Result<BTreeMap<String, u64>> {
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM bugs WHERE {column} IS NOT NULL GROUP BY {column}"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let value: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((value, u64::try_from(count).unwrap_or(0)))
            })?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
