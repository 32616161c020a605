//! Various errors occurring during use of the runtime primitives.

use std::fmt::{Debug, Display};

mod comparison_error;
mod file_error;
mod system_error;

pub use self::comparison_error::ComparisonError;
pub use self::file_error::FileError;
pub use self::system_error::SystemError;

/// An error occurring while using the runtime primitives.
pub trait Error: PartialEq + Debug + Display {
    /// Generate a human-readable version of the error.
    fn error_message(&self) -> String {
        format!("{}", &self)
    }
}
