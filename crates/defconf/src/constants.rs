//! constant table and final resolution
//!
//! The [ConstantTable] records every declared constant in source order. It lives for one parse
//! only; there is no shared state between parses.
use crate::error::ParseError;
use crate::util::ReferenceResolver;
use crate::value::Value;
use crate::visit::VisitValuesMut;
use indexmap::IndexMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstantTable {
    constants: IndexMap<String, Value>,
}

impl ConstantTable {
    /// Record a constant
    ///
    /// Redeclaring a name replaces the earlier value but keeps its position.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        tracing::debug!(constant = %name, "constant declared");

        if self.constants.insert(name, value).is_some() {
            tracing::debug!("constant redeclared, previous value replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constants.contains_key(name)
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

    /// Replace every remaining reference in `value` with the constant it names
    ///
    /// Values without references are left untouched, so resolving twice is the same as resolving
    /// once.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve(&self, value: &mut Value) -> Result<(), ParseError> {
        value.visit_values_mut(&mut ReferenceResolver::new(self))
    }
}
