use super::VisitMut;
use crate::value::Value;

/// Recursively visit all [Value]s mutably
///
/// A value is visited before its children, so a visitor that replaces a value has the children of
/// the replacement walked as well.
pub trait VisitValuesMut {
    fn visit_values_mut<V>(&mut self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: VisitMut<Value> + ?Sized;
}

impl VisitValuesMut for Value {
    fn visit_values_mut<V>(&mut self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: VisitMut<Value> + ?Sized,
    {
        visitor.visit_mut(self)?;

        if let Value::Mapping(mapping) = self {
            for value in mapping.values_mut() {
                value.visit_values_mut(visitor)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn visits_parents_before_children() {
        let mut value = Value::from(vec![
            ("a", Value::Integer(1)),
            ("b", Value::from(vec![("c", 2i64)])),
        ]);

        let mut seen = vec![];
        let mut visitor = |value: &mut Value| -> Result<(), ()> {
            seen.push(value.depth());
            Ok(())
        };
        value.visit_values_mut(&mut visitor).unwrap();

        assert_eq!(seen, [2, 0, 1, 0]);
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        let mut value = Value::from(vec![("a", 1i64), ("b", 2i64), ("c", 3i64)]);

        let mut visited = 0;
        let mut visitor = |value: &mut Value| {
            visited += 1;
            match value {
                Value::Integer(2) => Err("two"),
                _ => Ok(()),
            }
        };

        assert_eq!(value.visit_values_mut(&mut visitor), Err("two"));
        assert_eq!(visited, 3);
    }

    #[test]
    fn replacements_are_walked() {
        let mut value = Value::from(vec![("a", Value::Reference("x".into()))]);

        let mut visitor = |value: &mut Value| -> Result<(), ()> {
            match value {
                Value::Reference(_) => {
                    *value = Value::from(vec![("inner", Value::Text("old".into()))])
                }
                Value::Text(text) => *text = "new".into(),
                _ => {}
            }
            Ok(())
        };
        value.visit_values_mut(&mut visitor).unwrap();

        assert_eq!(
            value,
            Value::from(vec![("a", Value::from(vec![("inner", "new")]))])
        );
    }
}
