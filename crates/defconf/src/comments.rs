//! comment removal
//!
//! Two comment forms exist:
//! - `::` up to the end of the line
//! - `/*` up to the next `*/`, possibly spanning lines
//!
//! Markers inside a quoted string belong to the string.
use crate::error::ParseError;

const LINE_COMMENT: &str = "::";
const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Remove all comments from `source` and trim the result
///
/// A block comment is replaced by a single space so the tokens on either side stay apart.
/// Line comments keep their terminating newline.
pub fn strip_comments(source: &str) -> Result<String, ParseError> {
    let mut cleaned = String::with_capacity(source.len());
    let mut rest = source;
    let mut in_string = false;

    while let Some(c) = rest.chars().next() {
        if in_string {
            in_string = c != '"';
        } else if rest.starts_with(LINE_COMMENT) {
            rest = match rest.find('\n') {
                Some(end) => &rest[end..],
                None => "",
            };
            continue;
        } else if let Some(after_open) = rest.strip_prefix(BLOCK_COMMENT_OPEN) {
            let Some(end) = after_open.find(BLOCK_COMMENT_CLOSE) else {
                return Err(ParseError::UnterminatedComment);
            };
            cleaned.push(' ');
            rest = &after_open[end + BLOCK_COMMENT_CLOSE.len()..];
            continue;
        } else {
            in_string = c == '"';
        }

        cleaned.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Ok(cleaned.trim().to_string())
}
