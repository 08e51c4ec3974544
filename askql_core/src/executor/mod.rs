use crate::error::{ExecuteError, GuardError};
use crate::sql::guard::ReadOnlyGuard;
use crate::sql::types::{QueryResult, Row, Value};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Runs generated statements against the student store.
///
/// The connection is opened read-only and kept for the whole session. Every
/// statement passes [`ReadOnlyGuard`]: sqlparser first, then SQLite's own
/// read-only verdict on the prepared statement before any row is stepped.
pub struct Executor {
    conn: Connection,
}

impl Executor {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExecuteError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path.as_ref(), flags)?;
        Ok(Self { conn })
    }

    /// Executes `sql` and materializes every row.
    ///
    /// Parse failures, rejected statements and engine errors all come back as
    /// `Err` with a printable diagnostic; nothing here panics on bad SQL.
    pub fn execute(&self, sql: &str) -> Result<QueryResult, ExecuteError> {
        let start = Instant::now();
        match ReadOnlyGuard::check(sql) {
            Ok(()) => {}
            // SQLite-specific syntax; SQLite's parser decides below.
            Err(GuardError::Parse(e)) => debug!(error = %e, "deferring parse to SQLite"),
            Err(e) => return Err(e.into()),
        }

        // The prepared statement is dropped at the end of this scope on every path.
        let mut stmt = self.conn.prepare(sql)?;
        ReadOnlyGuard::check_prepared(&stmt)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let values = (0..width)
                .map(|idx| row.get_ref(idx).map(Self::convert_value))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(Row { values });
        }

        debug!(elapsed = ?start.elapsed(), "query executed");
        info!(rows = rows.len(), columns = width, "query returned");

        Ok(QueryResult { columns, rows })
    }

    fn convert_value(value: ValueRef<'_>) -> Value {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Real(r),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}
