//! mapping bodies
//!
//! The body of a mapping `[a => 1, b => [c => 2]]` is split on commas that are not inside a nested
//! mapping or a quoted string. Each resulting item has the form `<key> => <value>`.
use crate::error::ParseError;
use crate::util;

const ITEM_SEPARATOR: char = ',';
const KEY_VALUE_SEPARATOR: &str = "=>";

/// Split a mapping body into trimmed items
///
/// An empty body has no items. A single trailing comma is ignored.
pub fn split_items(body: &str) -> Vec<&str> {
    if body.trim().is_empty() {
        return vec![];
    }

    let mut items = vec![];
    let mut depth = 0i32;
    let mut in_string = false;
    let mut start = 0;

    for (index, c) in body.char_indices() {
        match c {
            '"' => in_string = !in_string,
            _ if in_string => {}
            '[' => depth += 1,
            ']' => depth -= 1,
            ITEM_SEPARATOR if depth == 0 => {
                items.push(body[start..index].trim());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    let last = body[start..].trim();
    if !last.is_empty() || items.is_empty() {
        items.push(last);
    }

    items
}

/// One `key => value` entry of a mapping body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'s> {
    pub key: &'s str,
    pub expression: &'s str,
}

impl<'s> Item<'s> {
    pub fn parse(item: &'s str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidItem(item.to_string());

        let (key, rest) = util::split_identifier(item.trim());
        if key.is_empty() {
            return Err(invalid());
        }

        let expression = rest
            .trim_start()
            .strip_prefix(KEY_VALUE_SEPARATOR)
            .map(str::trim)
            .filter(|expression| !expression.is_empty())
            .ok_or_else(invalid)?;

        tracing::trace!(key, expression, "item found");
        Ok(Self { key, expression })
    }
}
