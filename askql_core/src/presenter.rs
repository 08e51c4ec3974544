use crate::sql::types::QueryResult;

pub const RULE_WIDTH: usize = 50;
pub const SEPARATOR: &str = " | ";
pub const NO_RESULTS: &str = "[INFO] No results found or error in query execution.";

/// Renders a result as a ruled, pipe-separated table.
///
/// An empty result renders as [`NO_RESULTS`]. The executor's caller folds
/// failed executions into an empty result too, so the message covers both.
pub fn render(result: &QueryResult) -> String {
    if result.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&result.columns.join(SEPARATOR));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &result.rows {
        let cells: Vec<String> = row.values.iter().map(|v| v.to_string()).collect();
        out.push_str(&cells.join(SEPARATOR));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}
