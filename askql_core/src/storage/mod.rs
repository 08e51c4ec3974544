//! Dataset loading.
//!
//! The student spreadsheet arrives as a CSV export. Loading replaces the table
//! wholesale, so a restart always reflects the current file.

use crate::catalog::TableSchema;
use crate::error::LoadError;
use crate::sql::types::DataType;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use tracing::info;

pub struct DatasetLoader<'a> {
    schema: &'a TableSchema,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }

    /// Replaces the schema's table in the database at `db_path` with the rows
    /// of `csv_path`. Returns the number of rows written.
    pub fn load_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        db_path: P,
        csv_path: Q,
    ) -> Result<usize, LoadError> {
        info!(dataset = %csv_path.as_ref().display(), "loading dataset into store");
        let mut conn = Connection::open(db_path)?;
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(csv_path)?;
        let loaded = self.load(&mut conn, reader)?;
        info!(rows = loaded, table = self.schema.name, "dataset loaded");
        Ok(loaded)
    }

    pub fn load<R: std::io::Read>(
        &self,
        conn: &mut Connection,
        mut reader: csv::Reader<R>,
    ) -> Result<usize, LoadError> {
        let positions = self.column_positions(reader.headers()?)?;

        let tx = conn.transaction()?;
        tx.execute_batch(&self.schema.drop_table_sql())?;
        tx.execute_batch(&self.schema.create_table_sql())?;

        let mut count = 0;
        {
            let mut insert = tx.prepare(&self.schema.insert_sql())?;
            for record in reader.records() {
                let record = record?;
                let values = self.schema.columns.iter().zip(&positions).map(|(column, &pos)| {
                    Self::typed_cell(record.get(pos).unwrap_or_default(), column.data_type)
                });
                insert.execute(params_from_iter(values))?;
                count += 1;
            }
        }
        tx.commit()?;

        Ok(count)
    }

    /// Index of each schema column in the CSV header row.
    fn column_positions(&self, headers: &csv::StringRecord) -> Result<Vec<usize>, LoadError> {
        self.schema
            .columns
            .iter()
            .map(|column| {
                headers
                    .iter()
                    .position(|h| h == column.name)
                    .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(column.name)))
                    .ok_or_else(|| LoadError::MissingColumn(column.name.to_string()))
            })
            .collect()
    }

    fn typed_cell(cell: &str, data_type: DataType) -> SqlValue {
        if cell.is_empty() {
            return SqlValue::Null;
        }
        match data_type {
            DataType::Integer => cell
                .parse::<i64>()
                .map(SqlValue::Integer)
                .unwrap_or_else(|_| SqlValue::Text(cell.to_string())),
            DataType::Real => cell
                .parse::<f64>()
                .map(SqlValue::Real)
                .unwrap_or_else(|_| SqlValue::Text(cell.to_string())),
            DataType::Text => SqlValue::Text(cell.to_string()),
        }
    }
}
