//! # defconf - def-style constant declarations
//!
//! `defconf` turns a small declaration language into a structured document that can be written as
//! json or yaml.
//!
//! ## The language
//!
//! ```text
//! :: single line comments work like this
//!
//! /* multi-line
//! comments
//! also work */
//!
//! (def timeout 30);
//! (def settings [
//!     mode => "production",
//!     retrylimit => #{timeout},
//!     database => [host => "127.0.0.1", port => 5432]
//! ]);
//! ```
//!
//! - a file is a list of `declarations`: `(def <name> <value>);`
//! - a `name` (and every mapping key) is a non-empty run of `a-z`
//! - a `value` is one of
//!   - an `integer`: decimal digits, no sign
//!   - a `string`: anything but `"` between double quotes, taken verbatim (no escapes)
//!   - a `mapping`: `[key => value, ...]`, may nest to any depth
//!   - a `substitution`: `#{name}`, the value of a constant declared before
//!
//! The example above becomes
//!
//! ```json
//! {
//!     "timeout": 30,
//!     "settings": {
//!         "mode": "production",
//!         "retrylimit": 30,
//!         "database": { "host": "127.0.0.1", "port": 5432 }
//!     }
//! }
//! ```
//!
//! ## Introduction for developers
//!
//! ### Parsing
//!
//! see [parser::Parser::parse]
//!
//! Parsing is a short pipeline over the source text:
//!
//! - [comments::strip_comments] removes comments
//! - [blocks::tokenize_blocks] cuts the rest into [blocks::Block]s one at a time, tracking bracket
//!   depth so a value may contain nested brackets; anything that is not a block is an error
//! - [blocks::Declaration::from_block] splits a block into name and value expression
//! - the value expression is parsed recursively; mapping bodies are split into `key => value`
//!   items by [items::split_items]
//! - every constant is recorded in the [constants::ConstantTable] as soon as it is parsed, which is
//!   what makes it available to the declarations that follow
//! - each block is parsed before the next one is cut, so the first error in the source wins
//!
//! Mappings nest at most [value::MAX_NESTING_DEPTH] levels, substitutions included.
//!
//! ### Substitution
//!
//! By default a substitution is replaced while parsing and must name a constant declared earlier.
//! With [parser::Resolution::Deferred] unknown names become [value::Value::Reference]s instead.
//!
//! Either way the document goes through a final resolution pass
//! ([constants::ConstantTable::resolve]) that walks every value (see [visit]) and replaces
//! remaining references. Under the default resolution nothing is left to replace and the pass
//! changes nothing.
//!
//! ### Output
//!
//! [parser::Document] and [value::Value] implement [serde::Serialize].
//!
pub mod blocks;
pub mod comments;
pub mod constants;
pub mod error;
pub mod items;
pub mod parser;
mod util;
pub mod value;
mod visit;

pub use error::{ErrorKind, ParseError};
pub use parser::{Document, Parser};

/// Parse `source` with the default [parser::ParserOptions]
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::default().parse(source)
}
