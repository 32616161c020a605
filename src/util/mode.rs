use std::convert::TryFrom;

use const_format::concatcp;
use regex::Regex;

use crate::errors::FileError;

pub use nix::fcntl::OFlag as Flags;

/// A resolved set of access flags, fixed when a file is opened.
///
/// A mode is built either from a symbolic form such as `"r"`, `"w"` or
/// `"a"`, or from a combination of primitive [`Flags`] joined by bitwise OR.
/// Both forms resolve to the identical flag set for identical semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode(Flags);

impl Mode {
    /// Resolves a symbolic access mode such as `"r"`, `"w+"` or `"a"`.
    pub fn from_symbolic<T: AsRef<str>>(value: T) -> Result<Self, FileError> {
        SymbolicMode::default()
            .resolve(value.as_ref())
            .ok_or_else(|| {
                FileError::InvalidArgument(format!("invalid access mode '{}'", value.as_ref()))
            })
    }

    /// Wraps a combination of primitive flags.
    pub const fn from_flags(flags: Flags) -> Self {
        Mode(flags)
    }

    /// Returns the raw flag set handed to the OS-level open call.
    pub const fn flags(&self) -> Flags {
        self.0
    }

    /// Checks whether writes through this mode always land at the end of file.
    pub fn is_append(&self) -> bool {
        self.0.contains(Flags::O_APPEND)
    }
}

impl TryFrom<Flags> for Mode {
    type Error = FileError;

    fn try_from(flags: Flags) -> Result<Self, Self::Error> {
        Ok(Mode::from_flags(flags))
    }
}

impl TryFrom<&str> for Mode {
    type Error = FileError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Mode::from_symbolic(value)
    }
}

impl TryFrom<String> for Mode {
    type Error = FileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Mode::from_symbolic(value)
    }
}

#[derive(Debug, Clone)]
/// An internal resolver for symbolic access modes.
struct SymbolicMode(Regex);

impl Default for SymbolicMode {
    fn default() -> Self {
        SymbolicMode(
            Regex::new(concatcp!("^([", SymbolicMode::PRIMARY_MODES, "])(\\+)?$"))
                .expect("Encounter invalid mode RegEx"),
        )
    }
}

impl SymbolicMode {
    const PRIMARY_MODES: &'static str = "rwa";

    fn resolve<T: AsRef<str>>(&self, value: T) -> Option<Mode> {
        let captures = self.0.captures(value.as_ref())?;
        let update = captures.get(2).is_some();
        let access = match update {
            true => Flags::O_RDWR,
            false => Flags::O_WRONLY,
        };
        let flags = match captures.get(1)?.as_str() {
            "r" if update => Flags::O_RDWR,
            "r" => Flags::O_RDONLY,
            "w" => access | Flags::O_CREAT | Flags::O_TRUNC,
            "a" => access | Flags::O_CREAT | Flags::O_APPEND,
            _ => return None,
        };
        Some(Mode(flags))
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use test_case::test_case;

    use crate::errors::FileError;

    use super::{Flags, Mode};

    #[test]
    fn test_read_only() {
        assert_eq!(
            Mode::from_symbolic("r").unwrap(),
            Mode::from_flags(Flags::O_RDONLY)
        );
    }

    #[test]
    fn test_truncating_write() {
        assert_eq!(
            Mode::from_symbolic("w").unwrap(),
            Mode::from_flags(Flags::O_WRONLY | Flags::O_CREAT | Flags::O_TRUNC)
        );
    }

    #[test]
    fn test_append() {
        let mode = Mode::from_symbolic("a").unwrap();
        assert_eq!(
            mode,
            Mode::from_flags(Flags::O_WRONLY | Flags::O_CREAT | Flags::O_APPEND)
        );
        assert!(mode.is_append());
    }

    #[test]
    fn test_update_variants() {
        assert_eq!(
            Mode::from_symbolic("r+").unwrap(),
            Mode::from_flags(Flags::O_RDWR)
        );
        assert_eq!(
            Mode::from_symbolic("w+").unwrap(),
            Mode::from_flags(Flags::O_RDWR | Flags::O_CREAT | Flags::O_TRUNC)
        );
        assert_eq!(
            Mode::from_symbolic("a+").unwrap(),
            Mode::from_flags(Flags::O_RDWR | Flags::O_CREAT | Flags::O_APPEND)
        );
    }

    #[test_case(""; "Empty mode")]
    #[test_case("x"; "Unknown primary mode")]
    #[test_case("rw"; "Combined primary modes")]
    #[test_case("w++"; "Doubled update marker")]
    #[test_case("+r"; "Leading update marker")]
    fn test_invalid(value: &str) {
        match Mode::try_from(value) {
            Err(FileError::InvalidArgument(_)) => {}
            other => panic!("Mode '{}' resolved unexpectedly: {:?}", value, other),
        }
    }
}
