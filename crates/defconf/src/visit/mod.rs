//! visitor pattern helpers
mod visit_values;
pub use visit_values::VisitValuesMut;

/// Visitor that visits its subjects mutably and may abort the walk
pub trait VisitMut<T> {
    type Error;

    fn visit_mut(&mut self, value: &mut T) -> Result<(), Self::Error>;
}

// blanket impl for FnMut
impl<T, E, F> VisitMut<T> for F
where
    F: FnMut(&mut T) -> Result<(), E>,
{
    type Error = E;

    fn visit_mut(&mut self, value: &mut T) -> Result<(), E> {
        self(value)
    }
}
