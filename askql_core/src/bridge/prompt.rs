use crate::catalog::TableSchema;

/// Builds the model input for one question.
///
/// The question is embedded verbatim; an empty question still yields a
/// well-formed prompt and the model is left to cope with it.
pub fn build_prompt(question: &str, schema: &TableSchema) -> String {
    format!(
        "You are an assistant that converts natural language questions into SQL queries.\n\
         The SQLite table is named '{table}' with these columns:\n\
         {columns}\n\
         \n\
         Convert the following user question into an SQL SELECT query only (no explanation):\n\
         \n\
         \"{question}\"\n",
        table = schema.name,
        columns = schema.describe_columns(),
        question = question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::STUDENTS;

    #[test]
    fn test_prompt_contains_schema_and_question() {
        let question = "Show all students with CGPA above 8";
        let prompt = build_prompt(question, &STUDENTS);

        assert!(prompt.contains("named 'students'"));
        for column in STUDENTS.columns {
            assert!(prompt.contains(&format!("- {} ({})", column.name, column.data_type)));
        }
        assert!(prompt.contains(&format!("\"{}\"", question)));
        assert!(prompt.contains("SQL SELECT query only"));
    }

    #[test]
    fn test_question_is_not_altered() {
        let question = "  who's from \"Pune\"; DROP TABLE students -- ?\n";
        let prompt = build_prompt(question, &STUDENTS);
        assert!(prompt.contains(question));
    }

    #[test]
    fn test_empty_question_still_builds() {
        let prompt = build_prompt("", &STUDENTS);
        assert!(prompt.contains(&STUDENTS.describe_columns()));
        assert!(prompt.contains("\"\""));
    }
}
