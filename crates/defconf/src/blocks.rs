//! declaration blocks
//!
//! Comment-free source is a sequence of blocks `(def <name> <value>);` separated by whitespace.
//! [tokenize_blocks] cuts the source into [Block]s by tracking bracket depth, so a value may
//! contain nested `( )`, `[ ]` and `{ }` as long as the block itself closes with `);`.
//! [Declaration::from_block] then splits a block into its name and raw value expression.
use crate::error::ParseError;
use crate::util;

const BLOCK_OPEN: &str = "(def";
const BLOCK_TERMINATOR: char = ';';

/// Textual span of one declaration, including `(def` and `);`
#[derive(derive_new::new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'s> {
    pub text: &'s str,
}

/// Split cleaned source into blocks, in source order
///
/// Blocks are cut lazily, one per call to [Iterator::next], so a caller that parses each block
/// before asking for the next one sees errors in source order. Anything that is not a block
/// (leading garbage, text between blocks, a block that never closes) is an error naming the
/// offending text and ends the iteration.
pub fn tokenize_blocks(text: &str) -> Blocks<'_> {
    Blocks {
        rest: text.trim_start(),
    }
}

/// Iterator over the [Block]s of cleaned source, see [tokenize_blocks]
#[derive(Debug, Clone)]
pub struct Blocks<'s> {
    rest: &'s str,
}

impl<'s> Iterator for Blocks<'s> {
    type Item = Result<Block<'s>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let len = match block_len(self.rest) {
            Ok(len) => len,
            Err(e) => {
                self.rest = "";
                return Some(Err(e));
            }
        };

        let block = Block::new(&self.rest[..len]);
        tracing::trace!(block = block.text, "block found");

        self.rest = self.rest[len..].trim_start();
        Some(Ok(block))
    }
}

impl std::iter::FusedIterator for Blocks<'_> {}

/// Length in bytes of the block at the start of `rest`
fn block_len(rest: &str) -> Result<usize, ParseError> {
    if !rest.starts_with(BLOCK_OPEN) {
        return Err(ParseError::InvalidBlock(fragment(rest).to_string()));
    }

    let mut depth = 0usize;
    let mut in_string = false;

    for (index, c) in rest.char_indices() {
        if in_string {
            in_string = c != '"';
            continue;
        }

        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth > 0 {
                    continue;
                }

                // the opening `(` was closed by something else
                if c != ')' {
                    return Err(ParseError::InvalidBlock(fragment(rest).to_string()));
                }

                let end = index + c.len_utf8();
                return if rest[end..].starts_with(BLOCK_TERMINATOR) {
                    Ok(end + BLOCK_TERMINATOR.len_utf8())
                } else {
                    Err(ParseError::UnterminatedBlock(fragment(rest).to_string()))
                };
            }
            _ => {}
        }
    }

    Err(ParseError::UnterminatedBlock(rest.to_string()))
}

/// Text up to and including the next `);`, or everything if there is none
fn fragment(rest: &str) -> &str {
    match rest.find(");") {
        Some(end) => &rest[..end + 2],
        None => rest,
    }
}

/// A block split into constant name and (untrimmed) value expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'s> {
    pub name: &'s str,
    pub expression: &'s str,
}

impl<'s> Declaration<'s> {
    pub fn from_block(block: Block<'s>) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidBlock(block.text.to_string());

        let inner = block
            .text
            .strip_prefix(BLOCK_OPEN)
            .and_then(|inner| inner.strip_suffix(");"))
            .ok_or_else(invalid)?;

        if !inner.starts_with(char::is_whitespace) {
            return Err(invalid());
        }

        let (name, expression) = util::split_identifier(inner.trim_start());
        if name.is_empty() || !expression.starts_with(char::is_whitespace) {
            return Err(invalid());
        }

        if expression.trim().is_empty() {
            return Err(invalid());
        }

        Ok(Self { name, expression })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(text: &str) -> Vec<&str> {
        tokenize_blocks(text)
            .map(|block| block.expect("must tokenize").text)
            .collect()
    }

    fn first_error(text: &str) -> Option<ParseError> {
        tokenize_blocks(text).find_map(Result::err)
    }

    #[test]
    fn blocks_in_source_order() {
        assert_eq!(
            texts("(def a 1); (def b [x => 2]);\n(def c \"three\");"),
            ["(def a 1);", "(def b [x => 2]);", "(def c \"three\");"]
        );
    }

    #[test]
    fn empty_source_has_no_blocks() {
        assert_eq!(tokenize_blocks("").next(), None);
        assert_eq!(tokenize_blocks("  \n ").next(), None);
    }

    #[test]
    fn nested_brackets_do_not_end_a_block() {
        assert_eq!(
            texts("(def a [b => [c => #{x}]]); (def d 4);"),
            ["(def a [b => [c => #{x}]]);", "(def d 4);"]
        );
    }

    #[test]
    fn terminator_inside_string_does_not_end_a_block() {
        assert_eq!(texts(r#"(def a "x);y");"#), [r#"(def a "x);y");"#]);
    }

    #[test]
    fn missing_terminator() {
        assert_eq!(
            first_error("(def timeout 30"),
            Some(ParseError::UnterminatedBlock("(def timeout 30".into()))
        );
        assert_eq!(
            first_error("(def timeout 30) (def b 1);"),
            Some(ParseError::UnterminatedBlock(
                "(def timeout 30) (def b 1);".into()
            ))
        );
    }

    #[test]
    fn residual_text_between_blocks() {
        let mut blocks = tokenize_blocks("(def a 1); stray (def b 2);");

        assert_eq!(blocks.next(), Some(Ok(Block::new("(def a 1);"))));
        assert_eq!(
            blocks.next(),
            Some(Err(ParseError::InvalidBlock("stray (def b 2);".into())))
        );
        assert_eq!(blocks.next(), None);
    }

    #[test]
    fn mismatched_close() {
        assert_eq!(
            first_error("(def a 1]);"),
            Some(ParseError::InvalidBlock("(def a 1]);".into()))
        );
    }

    #[test]
    fn declaration_split() {
        let declaration =
            Declaration::from_block(Block::new("(def settings  [a => 1]);")).unwrap();
        assert_eq!(declaration.name, "settings");
        assert_eq!(declaration.expression.trim(), "[a => 1]");
    }

    #[test]
    fn declaration_rejects_bad_names() {
        for text in [
            "(def Timeout 30);",
            "(def 30);",
            "(define a 1);",
            "(def a);",
            "(def  a   );",
        ] {
            assert_eq!(
                Declaration::from_block(Block::new(text)),
                Err(ParseError::InvalidBlock(text.into())),
                "{text}"
            );
        }
    }
}
