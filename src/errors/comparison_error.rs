use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// An error occurring during the relational comparison of two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonError {
    /// The comparator reported no defined order between the operands.
    Incomparable,
}

impl super::Error for ComparisonError {}

impl Display for ComparisonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Error during comparison: ")?;
        match self {
            ComparisonError::Incomparable => {
                write!(f, "The operands have no defined relative order")
            }
        }
    }
}
