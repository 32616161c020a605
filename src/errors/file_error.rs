use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::io::{Error as IoError, ErrorKind};

use nix::errno::Errno;

use super::SystemError;

/// An error occurring during access of a file, a path, or an open descriptor.
#[derive(Debug, PartialEq)]
pub enum FileError {
    /// The path does not exist and the access mode does not request creation.
    NotFound,
    /// The caller lacks the permissions required for the requested access.
    PermissionDenied,
    /// The path already exists although exclusive creation was requested.
    AlreadyExists,
    /// The request itself is malformed, e.g. a bad access mode or seek offset.
    InvalidArgument(String),
    /// The handle was closed before the operation started.
    ClosedHandle,
    /// A system error not otherwise classified.
    System(SystemError),
}

impl super::Error for FileError {}

impl From<Errno> for FileError {
    fn from(errno: Errno) -> Self {
        match errno {
            Errno::ENOENT => FileError::NotFound,
            Errno::EACCES | Errno::EPERM => FileError::PermissionDenied,
            Errno::EEXIST => FileError::AlreadyExists,
            Errno::EINVAL => {
                FileError::InvalidArgument(String::from("invalid offset or access mode"))
            }
            Errno::EBADF => FileError::ClosedHandle,
            other => FileError::System(SystemError::from(other)),
        }
    }
}

impl From<IoError> for FileError {
    fn from(error: IoError) -> Self {
        match error.kind() {
            ErrorKind::NotFound => FileError::NotFound,
            ErrorKind::PermissionDenied => FileError::PermissionDenied,
            ErrorKind::AlreadyExists => FileError::AlreadyExists,
            ErrorKind::InvalidInput => FileError::InvalidArgument(error.to_string()),
            _ => FileError::System(SystemError::from(error.raw_os_error().unwrap_or(0))),
        }
    }
}

impl Display for FileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Error during file access: ")?;
        match self {
            FileError::NotFound => write!(f, "The path does not exist"),
            FileError::PermissionDenied => write!(f, "The required permissions are missing"),
            FileError::AlreadyExists => write!(f, "The path does already exist"),
            FileError::InvalidArgument(reason) => {
                write!(f, "The request is malformed ('{}')", reason)
            }
            FileError::ClosedHandle => write!(f, "The handle was closed beforehand"),
            FileError::System(error) => {
                write!(f, "The underlying system call failed ('{}')", error)
            }
        }
    }
}
