//! The fixed description of the one queryable table.
//!
//! The descriptor feeds both the prompt (so the model knows which columns
//! exist) and the dataset loader (so the table it creates has exactly those
//! columns). The two must never drift apart.

use crate::sql::types::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub data_type: DataType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

/// The student records table.
pub static STUDENTS: TableSchema = TableSchema {
    name: "students",
    columns: &[
        Column { name: "Name", data_type: DataType::Text },
        Column { name: "CGPA", data_type: DataType::Real },
        Column { name: "Location", data_type: DataType::Text },
        Column { name: "Email", data_type: DataType::Text },
        Column { name: "Phone_Number", data_type: DataType::Text },
        Column { name: "Preferred_Work_Location", data_type: DataType::Text },
        Column { name: "Specialization_in_degree", data_type: DataType::Text },
    ],
};

impl TableSchema {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// One `- Name (TYPE)` line per column, in declaration order.
    pub fn describe_columns(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("- {} ({})", c.name, c.data_type))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(c.name), c.data_type))
            .collect();
        format!("CREATE TABLE {} ({})", quote_ident(self.name), columns.join(", "))
    }

    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quote_ident(self.name))
    }

    pub fn insert_sql(&self) -> String {
        let columns: Vec<String> = self.column_names().map(quote_ident).collect();
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(self.name),
            columns.join(", "),
            placeholders
        )
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_columns() {
        let described = STUDENTS.describe_columns();
        let lines: Vec<&str> = described.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "- Name (TEXT)");
        assert_eq!(lines[1], "- CGPA (REAL)");
        assert_eq!(lines[6], "- Specialization_in_degree (TEXT)");
    }

    #[test]
    fn test_create_table_sql() {
        let sql = STUDENTS.create_table_sql();
        assert!(sql.starts_with("CREATE TABLE \"students\" ("));
        assert!(sql.contains("\"CGPA\" REAL"));
        assert!(sql.contains("\"Phone_Number\" TEXT"));
    }

    #[test]
    fn test_insert_sql_has_one_placeholder_per_column() {
        let sql = STUDENTS.insert_sql();
        assert_eq!(sql.matches('?').count(), STUDENTS.columns.len());
    }
}
