use std::os::unix::io::RawFd;

/// A raw identifier of an open descriptor in the underlying OS.
#[derive(Clone, Copy, Debug, PartialOrd, PartialEq, Eq, Ord)]
pub struct Descriptor(pub RawFd);

impl From<RawFd> for Descriptor {
    fn from(raw_value: RawFd) -> Self {
        Descriptor(raw_value)
    }
}
