//! A POSIX-style file abstraction owning a single OS descriptor.

use std::convert::TryFrom;
use std::os::unix::io::{AsRawFd, OwnedFd};
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::fcntl;
use nix::sys::stat::{self, Mode as Permissions};
use nix::unistd;

use super::errors::FileError;
use super::util::ExpandedPath;
pub use super::util::{Descriptor, Flags, Mode, SeekOrigin};

mod constants {
    /// Chunk size used while draining a file of unknown remaining length.
    pub const READ_BUFFER_SIZE: usize = 1024;
    /// Permission bits applied when the open call creates a new file.
    pub const CREATION_PERMISSIONS: u32 = 0o644;
    /// Value reported to callers after a successful seek.
    pub const SEEK_SUCCESS: i64 = 0;
}

/// A file opened from the host file system.
///
/// The handle is the exclusive owner of one OS-level descriptor. The
/// descriptor is released exactly once, either by an explicit [`FileHandle::close`]
/// or when the handle goes out of scope. The read/write offset lives in the
/// kernel and is never cached on this side, so `seek`, `read` and `write`
/// cannot drift apart.
#[derive(Debug)]
pub struct FileHandle {
    descriptor: Option<OwnedFd>,
    mode: Mode,
}

impl FileHandle {
    /// Open the file at `path`.
    ///
    /// The mode is given either in its symbolic form (`"r"`, `"w"`, `"a"` and
    /// their `+` variants) or as a combination of primitive [`Flags`]; both
    /// forms resolve to the identical flag set. Opening a missing path
    /// without requesting creation fails with [`FileError::NotFound`],
    /// exclusive creation of an existing path with [`FileError::AlreadyExists`].
    pub fn open<P: AsRef<Path>, M>(path: P, mode: M) -> Result<FileHandle, FileError>
    where
        Mode: TryFrom<M, Error = FileError>,
    {
        let mode = Mode::try_from(mode)?;
        let descriptor = fcntl::open(
            path.as_ref(),
            mode.flags(),
            Permissions::from_bits_truncate(constants::CREATION_PERMISSIONS),
        )?;
        Ok(FileHandle {
            descriptor: Some(descriptor),
            mode,
        })
    }

    /// Open the file at `path`, run `action` on it, and release the descriptor.
    ///
    /// The descriptor is returned to the OS on every exit path, including an
    /// error raised inside `action` and unwinding through it.
    pub fn open_with<P: AsRef<Path>, M, T, F>(path: P, mode: M, action: F) -> Result<T, FileError>
    where
        Mode: TryFrom<M, Error = FileError>,
        F: FnOnce(&mut FileHandle) -> Result<T, FileError>,
    {
        let mut handle = FileHandle::open(path, mode)?;
        let result = action(&mut handle);
        handle.close();
        result
    }

    /// Read all remaining bytes from the current position to the end of file.
    ///
    /// A handle with nothing left to read returns an empty buffer, not an
    /// end-of-stream marker. This deliberately differs from [`FileHandle::read`].
    pub fn read_all(&mut self) -> Result<Vec<u8>, FileError> {
        let descriptor = self.descriptor()?;
        let mut buffer = [0u8; constants::READ_BUFFER_SIZE];
        let mut data = Vec::new();
        loop {
            match unistd::read(descriptor, &mut buffer) {
                Ok(0) => break,
                Ok(size) => data.extend_from_slice(&buffer[..size]),
                Err(Errno::EINTR) => {
                    // Just try again...
                }
                Err(errno) => return Err(errno.into()),
            }
        }
        Ok(data)
    }

    /// Read up to `count` bytes from the current position.
    ///
    /// At the end of the stream this returns `None`, an explicit no-data
    /// marker distinct from an empty buffer. A single partial read is
    /// returned as-is; the method never gathers multiple OS reads.
    pub fn read(&mut self, count: usize) -> Result<Option<Vec<u8>>, FileError> {
        let descriptor = self.descriptor()?;
        let mut buffer = vec![0u8; count];
        loop {
            match unistd::read(descriptor, &mut buffer) {
                Ok(0) => return Ok(None),
                Ok(size) => {
                    buffer.truncate(size);
                    return Ok(Some(buffer));
                }
                Err(Errno::EINTR) => {
                    // Just try again...
                }
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    /// Write `data` at the current position and return the number of bytes
    /// the OS accepted.
    ///
    /// Under an append mode the write lands at the end of file regardless of
    /// any seek performed before, per OS append semantics.
    pub fn write<T: AsRef<[u8]>>(&mut self, data: T) -> Result<usize, FileError> {
        let descriptor = self.descriptor()?;
        loop {
            match unistd::write(descriptor, data.as_ref()) {
                Ok(size) => return Ok(size),
                Err(Errno::EINTR) => {
                    // Just try again...
                }
                Err(errno) => return Err(errno.into()),
            }
        }
    }

    /// Write the whole of `data`, retrying partial writes until it is drained.
    pub fn write_all<T: AsRef<[u8]>>(&mut self, data: T) -> Result<(), FileError> {
        let mut remaining = data.as_ref();
        while !remaining.is_empty() {
            let written = self.write(remaining)?;
            remaining = &remaining[written..];
        }
        Ok(())
    }

    /// Move the kernel offset to `offset` bytes relative to `origin`.
    ///
    /// Returns 0 on success, not the new absolute position. Seeking past the
    /// end of file is permitted; a later write then creates a sparse region.
    /// A negative absolute offset fails with [`FileError::InvalidArgument`].
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<i64, FileError> {
        let descriptor = self.descriptor()?;
        unistd::lseek(descriptor, offset, origin.whence())?;
        Ok(constants::SEEK_SUCCESS)
    }

    /// Move the kernel offset back to the start of the file.
    pub fn rewind(&mut self) -> Result<(), FileError> {
        self.seek(0, SeekOrigin::Start).map(|_| ())
    }

    /// The stable OS-assigned identifier of the underlying descriptor.
    pub fn fileno(&self) -> Result<Descriptor, FileError> {
        self.descriptor()
            .map(|descriptor| Descriptor::from(descriptor.as_raw_fd()))
    }

    /// The resolved access mode the file was opened with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Release the descriptor back to the OS.
    ///
    /// Closing an already-closed handle is a no-op. Any later `read`, `write`,
    /// `seek`, `rewind` or `fileno` fails with [`FileError::ClosedHandle`].
    pub fn close(&mut self) {
        self.descriptor.take();
    }

    fn descriptor(&self) -> Result<&OwnedFd, FileError> {
        self.descriptor.as_ref().ok_or(FileError::ClosedHandle)
    }
}

/// Read the whole content of the file at `path`.
///
/// The file is opened read-only, drained, and closed again.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, FileError> {
    FileHandle::open_with(path, "r", |file| file.read_all())
}

/// Checks whether `path` exists. A missing path is reported as `false`,
/// never as an error.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    stat::stat(path.as_ref()).is_ok()
}

/// Remove the file at `path`.
///
/// A missing path fails with [`FileError::NotFound`]; the second of two
/// consecutive unlinks on the same path therefore fails.
pub fn unlink<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
    Ok(unistd::unlink(path.as_ref())?)
}

/// Resolve `path` into an absolute path.
///
/// An already-absolute path is returned unchanged. A relative path is
/// resolved against `base` (itself expanded first) or, without a base,
/// against the current working directory; `.` and `..` segments collapse
/// and a trailing slash is stripped.
pub fn expand_path<P: AsRef<Path>>(path: P, base: Option<&Path>) -> Result<String, FileError> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_string_lossy().into_owned());
    }
    let base = match base {
        Some(value) => PathBuf::from(expand_path(value, None)?),
        None => std::env::current_dir()?,
    };
    Ok(ExpandedPath::from(base.join(path)).into_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{exists, expand_path, read_file, FileError, FileHandle, Flags};

    #[test]
    fn test_open_missing() {
        assert_eq!(
            FileHandle::open("file_does_not_exist.txt", "r").unwrap_err(),
            FileError::NotFound
        );
    }

    #[test]
    fn test_mode_forms_share_flags() {
        let file = tempfile::NamedTempFile::new().expect("Creating temporary file failed");
        let symbolic = FileHandle::open(file.path(), "a").expect("Symbolic open failed");
        let bitmask = FileHandle::open(
            file.path(),
            Flags::O_WRONLY | Flags::O_CREAT | Flags::O_APPEND,
        )
        .expect("Bitmask open failed");
        assert_eq!(symbolic.mode(), bitmask.mode());
        assert!(symbolic.mode().is_append());
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Creating temporary file failed");
        file.write_all(b"42").expect("Writing fixture failed");
        assert_eq!(read_file(file.path()).expect("Reading file failed"), b"42");
    }

    #[test]
    fn test_exists() {
        let file = tempfile::NamedTempFile::new().expect("Creating temporary file failed");
        assert!(exists(file.path()));
        assert!(!exists("should_not_exist"));
    }

    #[test]
    fn test_expand_absolute() {
        assert_eq!(expand_path("/42/PI", None).unwrap(), "/42/PI");
    }

    #[test]
    fn test_expand_relative() {
        let expanded = expand_path("42/PI", Some("/base".as_ref())).unwrap();
        assert_eq!(expanded, "/base/42/PI");
        assert_eq!(expand_path("..", Some("/base/42".as_ref())).unwrap(), "/base");
    }

    #[test]
    fn test_expand_against_working_directory() {
        let expanded = expand_path("42/PI", None).unwrap();
        assert!(expanded.starts_with('/'));
        assert!(expanded.ends_with("42/PI"));
    }
}
