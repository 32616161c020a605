use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use nix::errno::Errno;

/// An error raised and described by the operating system.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SystemError {
    errno: Errno,
}

impl SystemError {
    /// The numeric error code reported by the OS.
    pub fn code(&self) -> i32 {
        self.errno as i32
    }
}

impl Debug for SystemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "'{}' ({:?})", self.errno.desc(), self.errno)
    }
}

impl Display for SystemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.errno.desc())
    }
}

impl From<Errno> for SystemError {
    fn from(errno: Errno) -> Self {
        SystemError { errno }
    }
}

impl From<i32> for SystemError {
    fn from(raw_code: i32) -> Self {
        SystemError {
            errno: Errno::from_raw(raw_code),
        }
    }
}
