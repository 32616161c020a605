use nix::unistd::Whence;

use crate::errors::FileError;

/// The reference point of a seek offset.
///
/// Both the symbolic variants and the defined whence constants 0, 1 and 2
/// (resolved through [`SeekOrigin::from_raw`]) address the same origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    /// Absolute positioning from the start of the file.
    Start,
    /// Positioning relative to the current offset.
    Current,
    /// Positioning relative to the end of the file.
    End,
}

impl SeekOrigin {
    /// Resolves the defined integer constant form of an origin.
    pub fn from_raw(value: i32) -> Result<Self, FileError> {
        match value {
            0 => Ok(SeekOrigin::Start),
            1 => Ok(SeekOrigin::Current),
            2 => Ok(SeekOrigin::End),
            other => Err(FileError::InvalidArgument(format!(
                "invalid seek origin {}",
                other
            ))),
        }
    }

    pub(crate) fn whence(self) -> Whence {
        match self {
            SeekOrigin::Start => Whence::SeekSet,
            SeekOrigin::Current => Whence::SeekCur,
            SeekOrigin::End => Whence::SeekEnd,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::errors::FileError;

    use super::SeekOrigin;

    #[test_case(0, SeekOrigin::Start; "Start of file")]
    #[test_case(1, SeekOrigin::Current; "Current offset")]
    #[test_case(2, SeekOrigin::End; "End of file")]
    fn test_from_raw(value: i32, expected: SeekOrigin) {
        assert_eq!(SeekOrigin::from_raw(value).unwrap(), expected);
    }

    #[test_case(-1; "Negative constant")]
    #[test_case(3; "Constant out of range")]
    fn test_invalid(value: i32) {
        match SeekOrigin::from_raw(value) {
            Err(FileError::InvalidArgument(_)) => {}
            other => panic!("Origin {} resolved unexpectedly: {:?}", value, other),
        }
    }
}
