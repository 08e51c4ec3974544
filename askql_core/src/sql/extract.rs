//! Pull a single statement out of free-form model output.
//!
//! Models often follow the statement with an explanation, or wrap it in a
//! markdown fence, sometimes after a line of prose. When a fenced block is
//! present its body is used. Everything after the first `;` is dropped. This is a
//! convention, not a parser: a `;` inside a string literal also ends the
//! statement. The guard in [`super::guard`] decides whether the result is safe
//! to run.

pub const TERMINATOR: char = ';';

const FENCE: &str = "```";

// Bare keywords that can open a statement split over lines; never a language tag.
const STATEMENT_KEYWORDS: &[&str] = &["SELECT", "WITH", "VALUES"];

/// Returns the first statement in `raw`, terminated by exactly one `;`, or
/// `None` when nothing precedes the first terminator.
///
/// Text without any terminator is taken whole. For every input `x`, a
/// `Some(s)` result satisfies `extract_statement(&s) == Some(s)`.
pub fn extract_statement(raw: &str) -> Option<String> {
    let text = fenced_body(raw);
    let head = text.split(TERMINATOR).next().unwrap_or_default().trim();

    if head.is_empty() {
        None
    } else {
        Some(format!("{}{}", head, TERMINATOR))
    }
}

/// Body of the first fenced block, or the text before the fence when that
/// block is empty. Text without a fence comes back trimmed. The result never
/// contains a fence.
fn fenced_body(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let rest = &text[open + FENCE.len()..];
    let block = match rest.find(FENCE) {
        Some(close) => &rest[..close],
        None => rest,
    };
    let block = strip_info_string(block).trim();

    if block.is_empty() {
        text[..open].trim()
    } else {
        block
    }
}

/// Drops the first line of a block only when it is a language tag (```sql).
fn strip_info_string(block: &str) -> &str {
    match block.split_once('\n') {
        Some((first, body)) if is_info_string(first) => body,
        _ => block,
    }
}

fn is_info_string(line: &str) -> bool {
    let tag = line.trim();
    tag.is_empty()
        || (!tag.contains(char::is_whitespace)
            && !STATEMENT_KEYWORDS.iter().any(|k| tag.eq_ignore_ascii_case(k)))
}
