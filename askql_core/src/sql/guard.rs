use crate::error::GuardError;
use rusqlite::Statement as PreparedStatement;
use sqlparser::ast::{Query, SetExpr, Statement};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser as SqlParser;

/// Admits exactly one read-only query and nothing else.
///
/// Generated SQL is untrusted. [`check`](Self::check) parses it with
/// sqlparser and accepts a single SELECT-class query. sqlparser does not know
/// every SQLite construct (`LIMIT 2, 5`, `GLOB`), so a parse failure is not
/// final: the executor then lets SQLite prepare the statement and
/// [`check_prepared`](Self::check_prepared) asks SQLite whether it is a
/// read-only, row-returning statement. Anything else is rejected outright
/// rather than repaired.
pub struct ReadOnlyGuard;

impl ReadOnlyGuard {
    pub fn check(sql: &str) -> Result<(), GuardError> {
        let dialect = SQLiteDialect {};
        let statements = SqlParser::parse_sql(&dialect, sql)?;

        let stmt = match statements.as_slice() {
            [] => return Err(GuardError::Empty),
            [stmt] => stmt,
            many => return Err(GuardError::MultipleStatements(many.len())),
        };

        match stmt {
            Statement::Query(query) if Self::is_read_only_query(query) => Ok(()),
            Statement::Query(_) => Err(GuardError::NotReadOnly("SELECT INTO".to_string())),
            other => Err(GuardError::NotReadOnly(Self::statement_kind(other))),
        }
    }

    /// SQLite's own verdict on a prepared statement. Transaction control and
    /// `ATTACH` count as read-only to SQLite but return no rows, so they are
    /// refused too.
    pub fn check_prepared(stmt: &PreparedStatement<'_>) -> Result<(), GuardError> {
        if !stmt.readonly() {
            return Err(GuardError::NotReadOnly("statement that writes".to_string()));
        }
        if stmt.column_count() == 0 {
            return Err(GuardError::NotReadOnly("statement that returns no rows".to_string()));
        }
        Ok(())
    }

    fn is_read_only_query(query: &Query) -> bool {
        let ctes_read_only = query
            .with
            .as_ref()
            .map(|with| with.cte_tables.iter().all(|cte| Self::is_read_only_query(&cte.query)))
            .unwrap_or(true);

        ctes_read_only && Self::is_read_only_body(&query.body)
    }

    fn is_read_only_body(body: &SetExpr) -> bool {
        match body {
            SetExpr::Select(select) => select.into.is_none(),
            SetExpr::Query(query) => Self::is_read_only_query(query),
            SetExpr::SetOperation { left, right, .. } => {
                Self::is_read_only_body(left) && Self::is_read_only_body(right)
            }
            SetExpr::Values(_) | SetExpr::Table(_) => true,
            _ => false,
        }
    }

    fn statement_kind(stmt: &Statement) -> String {
        stmt.to_string()
            .split_whitespace()
            .next()
            .unwrap_or("statement")
            .to_uppercase()
    }
}
