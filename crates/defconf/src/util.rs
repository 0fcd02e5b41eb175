use crate::constants::ConstantTable;
use crate::error::ParseError;
use crate::value::{Value, MAX_NESTING_DEPTH};
use crate::visit::{self, VisitValuesMut};

/// Identifiers are non-empty runs of `a-z`
pub(crate) fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_lowercase())
}

/// Split the leading identifier off `text`
///
/// The identifier is empty if `text` does not start with one.
pub(crate) fn split_identifier(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(text.len());
    text.split_at(end)
}

/// Replaces [Value::Reference]s with the referenced constant
///
/// Referenced values are resolved themselves before they are inserted. `in_progress` holds the
/// chain of constants currently being resolved so a constant that ends up referring to itself is
/// reported instead of being expanded forever. A resolved value deeper than [MAX_NESTING_DEPTH] is
/// rejected before it can be nested any further.
#[derive(derive_new::new)]
pub(crate) struct ReferenceResolver<'t> {
    constants: &'t ConstantTable,
    #[new(default)]
    in_progress: Vec<String>,
}

impl<'t> visit::VisitMut<Value> for ReferenceResolver<'t> {
    type Error = ParseError;

    #[tracing::instrument(level = "trace", skip_all)]
    fn visit_mut(&mut self, value: &mut Value) -> Result<(), ParseError> {
        let Value::Reference(name) = &*value else {
            return Ok(());
        };
        let name = name.clone();

        if self.in_progress.contains(&name) {
            return Err(ParseError::ReferenceLoop(name));
        }

        let Some(referenced) = self.constants.get(&name) else {
            return Err(ParseError::UndefinedConstant(name));
        };

        let mut resolved = referenced.clone();
        self.in_progress.push(name.clone());
        resolved.visit_values_mut(self)?;
        self.in_progress.pop();

        if resolved.depth() > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep(format!("#{{{name}}}")));
        }

        tracing::trace!(constant = %name, "reference resolved");
        *value = resolved;
        Ok(())
    }
}
