//! declarations into a [Document]
//!
//! [Parser::parse] runs the whole pipeline:
//! 1. strip comments ([crate::comments])
//! 2. cut the next declaration block off the source ([crate::blocks])
//! 3. parse its value expression and record the constant right away so later blocks can refer
//!    to it, then continue with the next block
//! 4. resolve whatever references are left ([ConstantTable::resolve])
//!
//! Blocks are cut and parsed one at a time, so the first error in source order is the one reported.
use crate::blocks::{self, Declaration};
use crate::comments;
use crate::constants::ConstantTable;
use crate::error::ParseError;
use crate::items::{self, Item};
use crate::util;
use crate::value::{Mapping, Value, MAX_NESTING_DEPTH};
use indexmap::IndexMap;

/// When substitutions are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    /// A substitution must name a constant declared earlier in the source
    #[default]
    Eager,
    /// Substitutions of constants not declared yet are kept as [Value::Reference] and resolved
    /// after all declarations are known. This permits forward references.
    Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub resolution: Resolution,
}

#[derive(derive_new::new, Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn with_resolution(resolution: Resolution) -> Self {
        Self::new(ParserOptions { resolution })
    }

    /// Parse `source` into a fully resolved [Document]
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let (mut document, constants) = self.parse_declarations(source)?;
        document.resolve(&constants)?;
        Ok(document)
    }

    /// Parse all declarations without the final resolution pass
    ///
    /// With [Resolution::Deferred] the returned document and table may still contain references.
    pub fn parse_declarations(
        &self,
        source: &str,
    ) -> Result<(Document, ConstantTable), ParseError> {
        let cleaned = comments::strip_comments(source)?;

        let mut state = ParseState::new(self.options.resolution);
        let mut document = Document::default();

        for block in blocks::tokenize_blocks(&cleaned) {
            let declaration = Declaration::from_block(block?)?;
            let value = state.parse_value(declaration.expression, 0)?;

            state.constants.declare(declaration.name, value.clone());
            document.insert(declaration.name, value);
        }

        Ok((document, state.constants))
    }
}

/// State of a single parse
#[derive(derive_new::new)]
struct ParseState {
    resolution: Resolution,
    #[new(default)]
    constants: ConstantTable,
}

impl ParseState {
    /// Parse a value expression found inside `depth` enclosing mappings
    fn parse_value(&self, expression: &str, depth: usize) -> Result<Value, ParseError> {
        let expression = expression.trim();

        if !expression.is_empty() && expression.bytes().all(|b| b.is_ascii_digit()) {
            return expression
                .parse()
                .map(Value::Integer)
                .map_err(|_| ParseError::IntegerOutOfRange(expression.to_string()));
        }

        if let Some(name) = expression
            .strip_prefix("#{")
            .and_then(|rest| rest.strip_suffix('}'))
        {
            return self.substitute(name, expression, depth);
        }

        if let Some(text) = expression
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            if text.contains('"') {
                return Err(ParseError::InvalidValue(expression.to_string()));
            }
            return Ok(Value::Text(text.to_string()));
        }

        if let Some(body) = expression
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if depth >= MAX_NESTING_DEPTH {
                return Err(ParseError::NestingTooDeep(expression.to_string()));
            }
            return self.parse_mapping(body, depth + 1).map(Value::Mapping);
        }

        Err(ParseError::InvalidValue(expression.to_string()))
    }

    fn substitute(&self, name: &str, expression: &str, depth: usize) -> Result<Value, ParseError> {
        if !util::is_identifier(name) {
            return Err(ParseError::InvalidValue(expression.to_string()));
        }

        match (self.constants.get(name), self.resolution) {
            (Some(value), _) if depth + value.depth() > MAX_NESTING_DEPTH => {
                Err(ParseError::NestingTooDeep(expression.to_string()))
            }
            (Some(value), _) => Ok(value.clone()),
            (None, Resolution::Eager) => Err(ParseError::UndefinedConstant(name.to_string())),
            (None, Resolution::Deferred) => {
                tracing::debug!(constant = name, "reference deferred");
                Ok(Value::Reference(name.to_string()))
            }
        }
    }

    fn parse_mapping(&self, body: &str, depth: usize) -> Result<Mapping, ParseError> {
        let mut mapping = Mapping::new();

        for item in items::split_items(body) {
            let item = Item::parse(item)?;
            let value = self.parse_value(item.expression, depth)?;

            if mapping.insert(item.key.to_string(), value).is_some() {
                tracing::debug!(key = item.key, "duplicate key, previous value replaced");
            }
        }

        Ok(mapping)
    }
}

/// Parse result: every declared constant by name, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    constants: IndexMap<String, Value>,
}

impl Document {
    fn insert(&mut self, name: &str, value: Value) {
        self.constants.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.constants
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Final resolution pass over every constant of the document
    ///
    /// Fails if resolving a constant nests it deeper than [MAX_NESTING_DEPTH].
    pub fn resolve(&mut self, constants: &ConstantTable) -> Result<(), ParseError> {
        for (name, value) in self.constants.iter_mut() {
            constants.resolve(value)?;

            if value.depth() > MAX_NESTING_DEPTH {
                return Err(ParseError::NestingTooDeep(name.clone()));
            }
        }
        Ok(())
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.constants)
    }
}

impl serde::ser::Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut ser = serializer.serialize_map(Some(self.constants.len()))?;
        for (name, value) in &self.constants {
            ser.serialize_entry(name, value)?;
        }
        ser.end()
    }
}
